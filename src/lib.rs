/*
 * lib.rs
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

//! Content-type-aware HTTP request helper.
//!
//! `HttpClient` issues one-shot GET, PATCH and POST requests over an
//! in-tree HTTP/1.1 transport (tokio + rustls). Responses come back
//! decoded: the Content-Type header is parsed per RFC 1521 (falling back
//! to `text/plain` when absent or malformed), `application/json` bodies
//! are deserialized into a `serde_json::Value`, and everything else is
//! handed over as raw bytes.
//!
//! The lower layers are usable on their own: `mime::ContentType` for
//! header parsing, `uri` for URL splitting and query encoding, and
//! `http::HttpConnection` with a custom `ResponseHandler` for streaming
//! access to a response.

pub mod client;
pub mod error;
pub mod http;
pub mod mime;
mod net;
pub mod response;
pub mod uri;

pub use client::HttpClient;
pub use error::HttpError;
pub use http::Method;
pub use mime::{ContentType, Parameter};
pub use response::{Body, HttpResponse};
