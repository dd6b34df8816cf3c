/*
 * request.rs
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

//! HTTP request: method, target, headers, optional body.
//!
//! Built via RequestBuilder; sending is done by the connection (send with handler).

use std::collections::HashMap;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Other(&'static str),
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Other(s) => s,
        }
    }
}

/// Mutable request builder: method, target, headers, body.
///
/// Obtain from `HttpConnection::request(method, target)`, add headers,
/// optionally set a body, then pass to `HttpConnection::send`.
pub struct RequestBuilder {
    pub method: Method,
    pub target: String,
    pub headers: HashMap<String, String>,
    /// If set, the body is sent with Content-Length when given, chunked otherwise.
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, target: String) -> Self {
        Self {
            method,
            target,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add or replace a header. Name is stored as given.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// True if a header with this name is present, compared case-insensitively per HTTP.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Set the request body.
    pub fn body(&mut self, data: Vec<u8>) -> &mut Self {
        self.body = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Other("PURGE").as_str(), "PURGE");
    }

    #[test]
    fn has_header_ignores_case() {
        let mut request = RequestBuilder::new(Method::Post, "/".to_string());
        request.header("Content-Length", "5");
        assert!(request.has_header("content-length"));
        assert!(request.has_header("CONTENT-LENGTH"));
        assert!(!request.has_header("Content-Type"));
    }
}
