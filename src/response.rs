/*
 * response.rs
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

//! Fully read response: status, headers, parsed content type, decoded body.

use bytes::Bytes;
use serde_json::Value;

use crate::http::Response;
use crate::mime::ContentType;

/// Response payload, decoded by content type: a JSON value when the
/// Content-Type was `application/json`, raw bytes for everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Bytes(Bytes),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(v) => Some(v),
            Body::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Bytes(b) => Some(b),
            Body::Json(_) => None,
        }
    }
}

/// A completed 2xx response as handed out by `HttpClient`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status line of the response.
    pub raw: Response,
    /// Response headers in arrival order; names keep their wire spelling.
    pub headers: Vec<(String, String)>,
    /// Parsed Content-Type; `text/plain` when the header was absent or malformed.
    pub content_type: ContentType,
    /// Decoded body.
    pub data: Body,
}

impl HttpResponse {
    /// First header with the given name, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_accessors() {
        let json_body = Body::Json(json!({"x": 1}));
        assert_eq!(json_body.as_json(), Some(&json!({"x": 1})));
        assert!(json_body.as_bytes().is_none());

        let raw_body = Body::Bytes(Bytes::from_static(b"hi"));
        assert_eq!(raw_body.as_bytes(), Some(b"hi".as_slice()));
        assert!(raw_body.as_json().is_none());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            raw: Response::with_reason(200, "OK"),
            headers: vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("X-Request-Id".to_string(), "42".to_string()),
            ],
            content_type: ContentType::default(),
            data: Body::Bytes(Bytes::new()),
        };
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("42"));
        assert_eq!(response.header("etag"), None);
    }
}
