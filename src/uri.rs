/*
 * uri.rs
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

//! HTTP URL splitting and query string encoding. Only absolute http/https
//! URLs are handled; query values are percent-encoded per RFC 3986.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Query component set: encode everything except the RFC 3986 unreserved
/// characters (ALPHA / DIGIT / "-" / "." / "_" / "~"). Space becomes %20.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Pieces of an absolute http/https URL as the transport needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// True for https.
    pub secure: bool,
    /// Host name or IP; a bracketed IPv6 literal keeps its brackets.
    pub host: String,
    pub port: u16,
    /// Request target: path plus query, always starting with `/`.
    pub target: String,
}

/// Split an absolute http/https URL into host, port, and request target.
/// The port defaults to 80 or 443 by scheme; a fragment is dropped. An
/// IPv6 host keeps its bracket form.
pub fn parse_url(url: &str) -> Result<UrlParts, String> {
    let (secure, rest) = if let Some(rest) = url.strip_prefix("https://") {
        (true, rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        (false, rest)
    } else {
        return Err(format!("expected an absolute http or https URL: {}", url));
    };
    // Fragments are client-side only and never sent.
    let rest = match rest.find('#') {
        Some(i) => &rest[..i],
        None => rest,
    };
    let (authority, target) = match rest.find(|c| c == '/' || c == '?') {
        Some(i) if rest.as_bytes()[i] == b'/' => (&rest[..i], rest[i..].to_string()),
        Some(i) => (&rest[..i], format!("/{}", &rest[i..])),
        None => (rest, "/".to_string()),
    };
    let (host, port) = if authority.starts_with('[') {
        // Bracketed IPv6 literal, [::1] or [::1]:8080; brackets stay in the host.
        let close = authority
            .find(']')
            .ok_or_else(|| format!("unclosed IPv6 literal in URL: {}", url))?;
        let port = match &authority[close + 1..] {
            "" => {
                if secure {
                    443
                } else {
                    80
                }
            }
            after => after
                .strip_prefix(':')
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| format!("invalid port in URL: {}", url))?,
        };
        (&authority[..close + 1], port)
    } else {
        match authority.find(':') {
            Some(i) => {
                let port = authority[i + 1..]
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port in URL: {}", url))?;
                (&authority[..i], port)
            }
            None => (authority, if secure { 443 } else { 80 }),
        }
    };
    if host.is_empty() {
        return Err(format!("missing host in URL: {}", url));
    }
    Ok(UrlParts {
        secure,
        host: host.to_string(),
        port,
        target,
    })
}

/// Encode name/value pairs as a query string: `a=1&b=2`, values
/// percent-encoded. Pair order is preserved.
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.extend(utf8_percent_encode(name, QUERY));
        out.push('=');
        out.extend(utf8_percent_encode(value, QUERY));
    }
    out
}

/// Append query pairs to a URL: `?` when the URL has no query yet, `&`
/// otherwise. No pairs leaves the URL untouched.
pub fn append_query(url: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, encode_query(pairs))
}
