/*
 * client.rs
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

//! Request dispatcher: append the query string, issue the request once,
//! decode the body by content type.

use bytes::BytesMut;
use log::debug;

use crate::error::HttpError;
use crate::http::{HttpConnection, Method, Response, ResponseHandler};
use crate::mime::ContentType;
use crate::response::{Body, HttpResponse};
use crate::uri::{append_query, parse_url};

/// Stateless request dispatcher. Each call opens one connection, sends one
/// request, and reads the response to completion.
pub struct HttpClient;

impl HttpClient {
    /// Issue a request and decode the response.
    ///
    /// Query pairs are percent-encoded and appended to the URL. A body, when
    /// given, is sent with a Content-Length header (kept as-is if the caller
    /// already set one). A non-2xx status becomes `HttpError::Status`. For
    /// 2xx responses the body is decoded by Content-Type: `application/json`
    /// is parsed into a JSON value, everything else (including responses
    /// with a missing or malformed Content-Type header) is returned as raw
    /// bytes.
    pub async fn request(
        url: &str,
        method: Method,
        query: &[(&str, &str)],
        data: Option<Vec<u8>>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let url = append_query(url, query);
        debug!("{}: {}", method.as_str(), url);

        let parts = parse_url(&url).map_err(HttpError::Url)?;
        let mut connection = HttpConnection::open(&parts.host, parts.port, parts.secure).await?;
        let mut request = connection.request(method, parts.target);
        for (name, value) in headers {
            request.header(*name, *value);
        }
        if let Some(body) = data {
            if !request.has_header("Content-Length") {
                request.header("Content-Length", body.len().to_string());
            }
            request.body(body);
        }

        let mut collector = Collector::new();
        connection.send(&request, &mut collector).await?;

        let Collector {
            success,
            code,
            reason,
            headers,
            body,
        } = collector;

        if !success {
            return Err(HttpError::Status {
                code,
                reason: reason.unwrap_or_default(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| ContentType::parse(v))
            .unwrap_or_default();
        let data = if content_type.is_json() {
            Body::Json(serde_json::from_slice(&body)?)
        } else {
            Body::Bytes(body.freeze())
        };
        let raw = match reason {
            Some(r) => Response::with_reason(code, r),
            None => Response::new(code),
        };
        Ok(HttpResponse {
            raw,
            headers,
            content_type,
            data,
        })
    }

    /// GET the URL. No request body.
    pub async fn get(
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        Self::request(url, Method::Get, query, None, headers).await
    }

    /// PATCH the URL with an optional body (anything convertible to bytes,
    /// such as `&str` or `Vec<u8>`).
    pub async fn patch(
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        data: Option<impl Into<Vec<u8>>>,
    ) -> Result<HttpResponse, HttpError> {
        Self::request(url, Method::Patch, query, data.map(Into::into), headers).await
    }

    /// POST to the URL with an optional body (anything convertible to bytes,
    /// such as `&str` or `Vec<u8>`).
    pub async fn post(
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        data: Option<impl Into<Vec<u8>>>,
    ) -> Result<HttpResponse, HttpError> {
        Self::request(url, Method::Post, query, data.map(Into::into), headers).await
    }
}

/// ResponseHandler that records the status, all headers, and the whole body.
struct Collector {
    success: bool,
    code: u16,
    reason: Option<String>,
    headers: Vec<(String, String)>,
    body: BytesMut,
}

impl Collector {
    fn new() -> Self {
        Self {
            success: false,
            code: 0,
            reason: None,
            headers: Vec::new(),
            body: BytesMut::with_capacity(8192),
        }
    }
}

impl ResponseHandler for Collector {
    fn ok(&mut self, response: Response) {
        self.success = true;
        self.code = response.code;
        self.reason = response.reason;
    }

    fn error(&mut self, response: Response) {
        self.success = false;
        self.code = response.code;
        self.reason = response.reason;
    }

    fn header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn start_body(&mut self) {}

    fn body_chunk(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    fn end_body(&mut self) {}

    fn complete(&mut self) {}
}
