/*
 * error.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Fattorino, a content-type-aware HTTP request helper.
 *
 * Fattorino is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Fattorino is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Fattorino.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Request dispatch errors.

use std::fmt;
use std::io;

/// Everything that can go wrong while issuing a request.
///
/// Note that an unparseable Content-Type header is not an error: it falls
/// back to `text/plain` and the body is returned as raw bytes.
#[derive(Debug)]
pub enum HttpError {
    /// The URL was not an absolute http/https URL.
    Url(String),
    /// Connection, TLS, or protocol failure from the transport.
    Transport(io::Error),
    /// The server answered with a non-2xx status. The body is carried as
    /// (lossy) text for diagnostics.
    Status {
        code: u16,
        reason: String,
        body: String,
    },
    /// The response declared `application/json` but the body failed to parse.
    Decode(serde_json::Error),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Url(msg) => write!(f, "{}", msg),
            HttpError::Transport(e) => write!(f, "transport error: {}", e),
            HttpError::Status { code, reason, body } => {
                if body.is_empty() {
                    write!(f, "HTTP error {} {}", code, reason)
                } else {
                    write!(f, "HTTP error {} {}: {}", code, reason, body)
                }
            }
            HttpError::Decode(e) => write!(f, "JSON decode failed: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Transport(e) => Some(e),
            HttpError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        HttpError::Transport(e)
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(e: serde_json::Error) -> Self {
        HttpError::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_body() {
        let e = HttpError::Status {
            code: 404,
            reason: "Not Found".to_string(),
            body: "missing".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP error 404 Not Found: missing");
    }

    #[test]
    fn status_display_without_body() {
        let e = HttpError::Status {
            code: 500,
            reason: "Internal Server Error".to_string(),
            body: String::new(),
        };
        assert_eq!(e.to_string(), "HTTP error 500 Internal Server Error");
    }

    #[test]
    fn transport_keeps_source() {
        let e = HttpError::from(io::Error::new(io::ErrorKind::TimedOut, "connect timed out"));
        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().contains("connect timed out"));
    }
}
