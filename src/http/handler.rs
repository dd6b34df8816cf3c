/*
 * handler.rs
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

//! HTTP response handler trait.
//!
//! Events: status → headers → start_body → body_chunk (×n) → end_body →
//! trailers → complete.

use crate::http::response::Response;

/// Handler for HTTP response events (push model). The connection drives this
/// as data arrives.
///
/// Flow for a response with body:
/// 1. `ok(response)` or `error(response)` — status received
/// 2. `header(name, value)` — for each response header
/// 3. `start_body()` — body begins
/// 4. `body_chunk(data)` — for each chunk of body data
/// 5. `end_body()` — body complete
/// 6. `header(name, value)` — for each trailer of a chunked response
/// 7. `complete()` — response fully received
///
/// Responses without a body (204, 304, replies to HEAD, Content-Length 0)
/// skip steps 3 to 6. Transport failures surface as errors from
/// `HttpConnection::send`, not through this trait.
pub trait ResponseHandler {
    /// Called when a successful (2xx) status is received.
    fn ok(&mut self, response: Response);

    /// Called when a non-2xx status is received. Headers and body still follow.
    fn error(&mut self, response: Response);

    /// Called for each response or trailer header. Name may repeat for multi-value headers.
    fn header(&mut self, name: &str, value: &str);

    /// Called when the response body is about to start.
    fn start_body(&mut self);

    /// Called for each chunk of body data. Data is only valid for the duration of the call.
    fn body_chunk(&mut self, data: &[u8]);

    /// Called when the response body is complete. Trailers may follow.
    fn end_body(&mut self);

    /// Called exactly once when the response is fully received.
    fn complete(&mut self);
}
