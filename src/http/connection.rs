/*
 * connection.rs
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

//! HTTP connection: one TCP or TLS stream, drives the response parser,
//! invokes the ResponseHandler. One request per connection; the transport
//! writes the Host header and `Connection: close` itself unless the
//! caller supplies them.

use bytes::BytesMut;
use rustls::pki_types::ServerName;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream as TokioTlsStream;

use crate::http::handler::ResponseHandler;
use crate::http::parser::ResponseParser;
use crate::http::request::{Method, RequestBuilder};
use crate::net;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Unified stream: plain TCP or TLS. Implements AsyncRead + AsyncWrite.
pub enum HttpStream {
    Plain(TcpStream),
    Tls(TokioTlsStream<TcpStream>),
}

impl AsyncRead for HttpStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            HttpStream::Tls(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for HttpStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            HttpStream::Tls(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_flush(cx),
            HttpStream::Tls(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            HttpStream::Tls(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

/// HTTP/1.1 connection to one host. Call `send` to issue a request and run
/// the read loop until the response is complete.
pub struct HttpConnection {
    stream: HttpStream,
    host: String,
    port: u16,
    secure: bool,
    read_buf: BytesMut,
    parser: ResponseParser,
}

impl HttpConnection {
    /// Connect to host:port, with a TLS handshake when `secure` is set.
    pub async fn open(host: &str, port: u16, secure: bool) -> io::Result<Self> {
        let addr = format!("{}:{}", host, port);
        let tcp = tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;
        let stream = if secure {
            let server_name = ServerName::try_from(host.to_string())
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid host name"))?;
            let tls = net::connector()
                .connect(server_name, tcp)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e))?;
            HttpStream::Tls(tls)
        } else {
            HttpStream::Plain(tcp)
        };
        Ok(Self {
            stream,
            host: host.to_string(),
            port,
            secure,
            read_buf: BytesMut::with_capacity(8192),
            parser: ResponseParser::new(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Build a request for this connection. Pass to `send` to execute it.
    pub fn request(&mut self, method: Method, target: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, target.into())
    }

    /// Send the request and run the read loop until the response is complete.
    /// The handler is invoked as data arrives. A stream that closes early is
    /// an error unless the response body is delimited by the close itself.
    pub async fn send<H: ResponseHandler>(
        &mut self,
        request: &RequestBuilder,
        handler: &mut H,
    ) -> io::Result<()> {
        self.parser.reset(request.method == Method::Head);
        self.read_buf.clear();
        self.write_request(request).await?;

        let mut tmp = [0u8; 8192];
        loop {
            let n = self.stream.read(&mut tmp).await?;
            if n == 0 {
                if self.parser.finish_on_eof(handler) {
                    return Ok(());
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed before the response was complete",
                ));
            }
            self.read_buf.extend_from_slice(&tmp[..n]);
            self.parser.receive(&mut self.read_buf, handler)?;
            if self.parser.is_complete() {
                return Ok(());
            }
        }
    }

    async fn write_request(&mut self, request: &RequestBuilder) -> io::Result<()> {
        let use_chunked = request.body.is_some()
            && !request.has_header("Content-Length")
            && !request.has_header("Transfer-Encoding");
        let mut head = format!(
            "{} {} HTTP/1.1\r\n",
            request.method.as_str(),
            request.target
        );
        if !request.has_header("Host") {
            let host_header =
                if (self.secure && self.port != 443) || (!self.secure && self.port != 80) {
                    format!("{}:{}", self.host, self.port)
                } else {
                    self.host.clone()
                };
            head.push_str("Host: ");
            head.push_str(&host_header);
            head.push_str("\r\n");
        }
        for (k, v) in &request.headers {
            head.push_str(k);
            head.push_str(": ");
            head.push_str(v);
            head.push_str("\r\n");
        }
        if !request.has_header("Connection") {
            head.push_str("Connection: close\r\n");
        }
        if use_chunked {
            head.push_str("Transfer-Encoding: chunked\r\n");
        }
        head.push_str("\r\n");
        self.stream.write_all(head.as_bytes()).await?;
        if let Some(body) = &request.body {
            if use_chunked {
                let hex_len = format!("{:x}\r\n", body.len());
                self.stream.write_all(hex_len.as_bytes()).await?;
                self.stream.write_all(body).await?;
                self.stream.write_all(b"\r\n").await?;
                self.stream.write_all(b"0\r\n\r\n").await?;
            } else {
                self.stream.write_all(body).await?;
            }
        }
        self.stream.flush().await?;
        Ok(())
    }
}
