/*
 * mod.rs
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

//! HTTP/1.1 client transport: one request per connection, push-parsed
//! responses delivered through `ResponseHandler` callbacks.
//!
//! - Buffers: `bytes` crate (BytesMut for the parse buffer).
//! - TLS: rustls via tokio-rustls, ALPN pinned to http/1.1.
//! - Body framing: Content-Length, chunked, or read-until-close.

mod connection;
mod handler;
mod parser;
mod request;
mod response;

pub use connection::{HttpConnection, HttpStream};
pub use handler::ResponseHandler;
pub use parser::{ParseState, ResponseParser};
pub use request::{Method, RequestBuilder};
pub use response::Response;
