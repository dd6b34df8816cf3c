/*
 * parser.rs
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

//! HTTP/1.1 response push parser: status line, headers, body.
//!
//! Body framing is taken from the headers as they stream through: chunked
//! when Transfer-Encoding says so, fixed-size with Content-Length, read
//! until close otherwise. 204, 304 and replies to HEAD never have a body.

use bytes::Buf;
use bytes::BytesMut;
use std::io;

use crate::http::handler::ResponseHandler;
use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    StatusLine,
    Headers,
    Body,
    ChunkSize,
    ChunkData,
    ChunkTrailer,
    Done,
}

/// Push parser for one HTTP/1.1 response. Feed bytes via `receive`; the
/// handler is invoked as complete tokens are parsed. Signal end of stream
/// with `finish_on_eof` so close-delimited bodies can complete.
pub struct ResponseParser {
    state: ParseState,
    /// Request was HEAD: the response has headers but never a body.
    head_request: bool,
    status_code: u16,
    /// Body length from Content-Length (-1 when unknown: chunked or read-until-close).
    content_length: i64,
    bytes_received: i64,
    chunked: bool,
    /// Remaining bytes of the current chunk (for chunked encoding).
    chunk_remaining: i64,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            head_request: false,
            status_code: 0,
            content_length: -1,
            bytes_received: 0,
            chunked: false,
            chunk_remaining: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Prepare for the next response. `head_request` marks a reply to HEAD,
    /// which carries no body regardless of its framing headers.
    pub fn reset(&mut self, head_request: bool) {
        *self = Self {
            head_request,
            ..Self::new()
        };
    }

    /// Find CRLF in buf; return the number of bytes before it, or None if not found.
    fn find_crlf(buf: &[u8]) -> Option<usize> {
        let mut i = 0;
        while i + 1 < buf.len() {
            if buf[i] == b'\r' && buf[i + 1] == b'\n' {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Consume and parse as much as possible from buf. The handler is called
    /// for each complete token; partial data remains in buf for the next call.
    pub fn receive<H: ResponseHandler>(
        &mut self,
        buf: &mut BytesMut,
        handler: &mut H,
    ) -> Result<(), io::Error> {
        while !buf.is_empty() {
            match self.state {
                ParseState::StatusLine => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    let line = buf.split_to(line_end + 2); // include CRLF
                    let line_str = std::str::from_utf8(&line[..line_end]).map_err(|_| {
                        io::Error::new(io::ErrorKind::InvalidData, "invalid status line UTF-8")
                    })?;
                    // HTTP/1.1 200 OK or HTTP/1.1 200
                    let parts: Vec<&str> = line_str.splitn(3, ' ').collect();
                    let code = parts
                        .get(1)
                        .and_then(|s| s.parse::<u16>().ok())
                        .unwrap_or(0);
                    self.status_code = code;
                    let response = match parts.get(2) {
                        Some(reason) => Response::with_reason(code, *reason),
                        None => Response::new(code),
                    };
                    if response.is_success() {
                        handler.ok(response);
                    } else {
                        handler.error(response);
                    }
                    self.state = ParseState::Headers;
                }
                ParseState::Headers => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    if line_end == 0 {
                        buf.advance(2);
                        self.begin_body(handler);
                        continue;
                    }
                    let line = buf.split_to(line_end + 2);
                    let line_str = std::str::from_utf8(&line[..line_end]).map_err(|_| {
                        io::Error::new(io::ErrorKind::InvalidData, "invalid header UTF-8")
                    })?;
                    if let Some(colon) = line_str.find(':') {
                        let name = line_str[..colon].trim();
                        let value = line_str[colon + 1..].trim();
                        if name.eq_ignore_ascii_case("content-length") {
                            if let Ok(cl) = value.parse::<i64>() {
                                self.content_length = cl;
                            }
                        } else if name.eq_ignore_ascii_case("transfer-encoding")
                            && value.to_ascii_lowercase().contains("chunked")
                        {
                            self.chunked = true;
                        }
                        handler.header(name, value);
                    }
                }
                ParseState::Body => {
                    if self.content_length >= 0 {
                        let remaining = (self.content_length - self.bytes_received) as usize;
                        let to_read = remaining.min(buf.len());
                        if to_read > 0 {
                            let chunk = buf.split_to(to_read);
                            handler.body_chunk(&chunk);
                            self.bytes_received += to_read as i64;
                        }
                        if self.bytes_received >= self.content_length {
                            handler.end_body();
                            handler.complete();
                            self.state = ParseState::Done;
                        }
                    } else {
                        // Read until close; finish_on_eof ends the body.
                        let chunk = buf.split_to(buf.len());
                        handler.body_chunk(&chunk);
                    }
                }
                ParseState::ChunkSize => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    let line = buf.split_to(line_end + 2);
                    let line_str = std::str::from_utf8(&line[..line_end]).map_err(|_| {
                        io::Error::new(io::ErrorKind::InvalidData, "invalid chunk size")
                    })?;
                    let hex_part = line_str.split(';').next().unwrap_or(line_str).trim();
                    self.chunk_remaining = i64::from_str_radix(hex_part, 16).unwrap_or(0);
                    if self.chunk_remaining == 0 {
                        handler.end_body();
                        self.state = ParseState::ChunkTrailer;
                    } else {
                        self.state = ParseState::ChunkData;
                    }
                }
                ParseState::ChunkData => {
                    let to_read = (self.chunk_remaining as usize).min(buf.len());
                    if to_read > 0 {
                        let chunk = buf.split_to(to_read);
                        handler.body_chunk(&chunk);
                        self.chunk_remaining -= to_read as i64;
                    }
                    if self.chunk_remaining == 0 {
                        // Consume the CRLF after the chunk data
                        if buf.len() >= 2 {
                            buf.advance(2);
                            self.state = ParseState::ChunkSize;
                        } else {
                            return Ok(());
                        }
                    } else {
                        return Ok(());
                    }
                }
                ParseState::ChunkTrailer => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    if line_end == 0 {
                        buf.advance(2);
                        handler.complete();
                        self.state = ParseState::Done;
                    } else {
                        let line = buf.split_to(line_end + 2);
                        let line_str = std::str::from_utf8(&line[..line_end]).map_err(|_| {
                            io::Error::new(io::ErrorKind::InvalidData, "invalid trailer")
                        })?;
                        if let Some(colon) = line_str.find(':') {
                            let name = line_str[..colon].trim();
                            let value = line_str[colon + 1..].trim();
                            handler.header(name, value);
                        }
                    }
                }
                ParseState::Done => return Ok(()),
            }
        }
        Ok(())
    }

    /// Headers are done; pick the body framing and move on.
    fn begin_body<H: ResponseHandler>(&mut self, handler: &mut H) {
        if self.head_request || self.status_code == 204 || self.status_code == 304 {
            handler.complete();
            self.state = ParseState::Done;
        } else if self.chunked {
            handler.start_body();
            self.state = ParseState::ChunkSize;
        } else if self.content_length == 0 {
            handler.complete();
            self.state = ParseState::Done;
        } else {
            handler.start_body();
            self.bytes_received = 0;
            self.state = ParseState::Body;
        }
    }

    /// End of stream from the transport. A close-delimited body completes
    /// here; returns true if the response is complete, false if the stream
    /// ended mid-response.
    pub fn finish_on_eof<H: ResponseHandler>(&mut self, handler: &mut H) -> bool {
        if self.state == ParseState::Body && self.content_length < 0 {
            handler.end_body();
            handler.complete();
            self.state = ParseState::Done;
        }
        self.state == ParseState::Done
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records handler callbacks in order; body bytes are accumulated separately.
    struct RecordingHandler {
        events: Vec<String>,
        body: Vec<u8>,
    }

    impl RecordingHandler {
        fn new() -> Self {
            Self {
                events: Vec::new(),
                body: Vec::new(),
            }
        }
    }

    impl ResponseHandler for RecordingHandler {
        fn ok(&mut self, response: Response) {
            self.events.push(format!("ok {}", response.code));
        }
        fn error(&mut self, response: Response) {
            self.events.push(format!("error {}", response.code));
        }
        fn header(&mut self, name: &str, value: &str) {
            self.events.push(format!("header {}={}", name, value));
        }
        fn start_body(&mut self) {
            self.events.push("start".to_string());
        }
        fn body_chunk(&mut self, data: &[u8]) {
            self.body.extend_from_slice(data);
        }
        fn end_body(&mut self) {
            self.events.push("end".to_string());
        }
        fn complete(&mut self) {
            self.events.push("complete".to_string());
        }
    }

    fn feed(parser: &mut ResponseParser, handler: &mut RecordingHandler, data: &[u8]) {
        let mut buf = BytesMut::from(data);
        parser.receive(&mut buf, handler).unwrap();
    }

    #[test]
    fn content_length_body() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello",
        );
        assert!(parser.is_complete());
        assert_eq!(handler.body, b"hello");
        assert_eq!(
            handler.events,
            vec![
                "ok 200",
                "header Content-Type=text/plain",
                "header Content-Length=5",
                "start",
                "end",
                "complete",
            ]
        );
    }

    #[test]
    fn split_feed_resumes() {
        let response =
            b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n0123456789".as_slice();
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        let mut buf = BytesMut::new();
        for piece in response.chunks(3) {
            buf.extend_from_slice(piece);
            parser.receive(&mut buf, &mut handler).unwrap();
        }
        assert!(parser.is_complete());
        assert_eq!(handler.body, b"0123456789");
    }

    #[test]
    fn chunked_with_trailer() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n\
              4\r\nWiki\r\n5\r\npedia\r\n0\r\nX-Checksum: abc\r\n\r\n",
        );
        assert!(parser.is_complete());
        assert_eq!(handler.body, b"Wikipedia");
        assert_eq!(
            handler.events,
            vec![
                "ok 200",
                "header Transfer-Encoding=chunked",
                "start",
                "end",
                "header X-Checksum=abc",
                "complete",
            ]
        );
    }

    #[test]
    fn close_delimited_until_eof() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nstream",
        );
        assert!(!parser.is_complete());
        feed(&mut parser, &mut handler, b"-end");
        assert!(parser.finish_on_eof(&mut handler));
        assert!(parser.is_complete());
        assert_eq!(handler.body, b"stream-end");
        assert_eq!(handler.events.last().unwrap(), "complete");
    }

    #[test]
    fn eof_mid_headers_is_incomplete() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(&mut parser, &mut handler, b"HTTP/1.1 200 OK\r\nContent-");
        assert!(!parser.finish_on_eof(&mut handler));
    }

    #[test]
    fn no_body_for_204() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(&mut parser, &mut handler, b"HTTP/1.1 204 No Content\r\n\r\n");
        assert!(parser.is_complete());
        assert_eq!(handler.events, vec!["ok 204", "complete"]);
        assert!(handler.body.is_empty());
    }

    #[test]
    fn no_body_for_head_request() {
        let mut parser = ResponseParser::new();
        parser.reset(true);
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Length: 1234\r\n\r\n",
        );
        assert!(parser.is_complete());
        assert_eq!(handler.body, b"");
        assert_eq!(handler.events.last().unwrap(), "complete");
    }

    #[test]
    fn content_length_zero_completes_without_body() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n",
        );
        assert!(parser.is_complete());
        assert_eq!(
            handler.events,
            vec!["ok 200", "header Content-Length=0", "complete"]
        );
    }

    #[test]
    fn error_status_still_delivers_body() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 4\r\n\r\nnope",
        );
        assert!(parser.is_complete());
        assert_eq!(handler.events[0], "error 404");
        assert_eq!(handler.body, b"nope");
    }

    #[test]
    fn status_without_reason() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200\r\nContent-Length: 0\r\n\r\n",
        );
        assert_eq!(handler.events[0], "ok 200");
    }

    #[test]
    fn unparseable_content_length_reads_until_close() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Length: banana\r\n\r\ndata",
        );
        assert!(!parser.is_complete());
        assert!(parser.finish_on_eof(&mut handler));
        assert_eq!(handler.body, b"data");
    }

    #[test]
    fn reset_clears_previous_response() {
        let mut parser = ResponseParser::new();
        let mut handler = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler,
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok",
        );
        assert!(parser.is_complete());
        parser.reset(false);
        assert!(!parser.is_complete());
        let mut handler2 = RecordingHandler::new();
        feed(
            &mut parser,
            &mut handler2,
            b"HTTP/1.1 204 No Content\r\n\r\n",
        );
        assert!(parser.is_complete());
    }
}
