/*
 * mime.rs
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

//! Content-Type header field (RFC 1521, section 4).
//!
//! Parsing is total: any value that does not match the grammar yields the
//! `text/plain` fallback, so a missing or garbled header can never fail a
//! request. At most one `attribute=value` parameter is kept; anything after
//! a second `;` is part of the first parameter's value.

use std::fmt;

/// Single `attribute=value` parameter of a Content-Type header.
///
/// The attribute is kept exactly as it appeared after the `;` (leading
/// whitespace removed, trailing whitespace retained); the value is the
/// untouched remainder of the header after the first `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    attribute: String,
    value: String,
}

impl Parameter {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn get_attribute(&self) -> &str {
        &self.attribute
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

/// Parsed Content-Type: primary type, subtype, optional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    primary_type: String,
    sub_type: String,
    parameter: Option<Parameter>,
}

impl ContentType {
    pub fn new(
        primary_type: impl Into<String>,
        sub_type: impl Into<String>,
        parameter: Option<Parameter>,
    ) -> Self {
        Self {
            primary_type: primary_type.into(),
            sub_type: sub_type.into(),
            parameter,
        }
    }

    /// Parse a Content-Type header value. Never fails: values that do not
    /// match the grammar (including the empty string) yield `text/plain`
    /// with no parameter.
    pub fn parse(value: &str) -> ContentType {
        scan(value).unwrap_or_default()
    }

    pub fn get_primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn get_sub_type(&self) -> &str {
        &self.sub_type
    }

    pub fn get_parameter(&self) -> Option<&Parameter> {
        self.parameter.as_ref()
    }

    pub fn is_primary_type(&self, t: &str) -> bool {
        self.primary_type.eq_ignore_ascii_case(t)
    }

    pub fn is_sub_type(&self, t: &str) -> bool {
        self.sub_type.eq_ignore_ascii_case(t)
    }

    pub fn is_mime_type(&self, primary: &str, sub: &str) -> bool {
        self.is_primary_type(primary) && self.is_sub_type(sub)
    }

    /// True for `application/json`, compared case-insensitively. Parameters
    /// (such as `charset`) do not affect the result.
    pub fn is_json(&self) -> bool {
        self.is_mime_type("application", "json")
    }
}

impl Default for ContentType {
    /// The fallback type for unparseable headers: `text/plain`.
    fn default() -> Self {
        ContentType::new("text", "plain", None)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.primary_type, self.sub_type)?;
        if let Some(p) = &self.parameter {
            write!(f, "; {}={}", p.attribute, p.value)?;
        }
        Ok(())
    }
}

/// Scan a header value against the RFC 1521 shape:
/// `type/subtype` optionally followed by `;` and one `attribute=value`.
///
/// The type runs to the first `/` and may not contain whitespace. The
/// subtype is the longest following run without `;` or whitespace (a
/// further `/` is allowed). The attribute runs to the first `=`; the value
/// is everything after it and may itself contain `;` and `=`, so a header
/// with several parameters collapses them into the value of the first.
fn scan(value: &str) -> Option<ContentType> {
    let slash = value.find('/')?;
    let primary = &value[..slash];
    if primary.is_empty() || primary.chars().any(char::is_whitespace) {
        return None;
    }
    let rest = &value[slash + 1..];
    let sub_len = rest
        .chars()
        .take_while(|&c| c != ';' && !c.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>();
    if sub_len == 0 {
        return None;
    }
    let sub = &rest[..sub_len];
    let tail = &rest[sub_len..];
    if tail.is_empty() {
        return Some(ContentType::new(primary, sub, None));
    }
    let tail = tail.trim_start().strip_prefix(';')?.trim_start();
    let eq = tail.find('=')?;
    if eq == 0 {
        return None;
    }
    let attribute = &tail[..eq];
    let param_value = &tail[eq + 1..];
    if param_value.is_empty() {
        return None;
    }
    Some(ContentType::new(
        primary,
        sub,
        Some(Parameter::new(attribute, param_value)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let ct = ContentType::parse("text/plain");
        assert_eq!(ct.get_primary_type(), "text");
        assert_eq!(ct.get_sub_type(), "plain");
        assert!(ct.get_parameter().is_none());
        assert!(!ct.is_json());
    }

    #[test]
    fn parse_json() {
        let ct = ContentType::parse("application/json");
        assert!(ct.is_json());
    }

    #[test]
    fn parse_with_parameter() {
        let ct = ContentType::parse("application/json; charset=UTF-8");
        assert!(ct.is_json());
        let p = ct.get_parameter().unwrap();
        assert_eq!(p.get_attribute(), "charset");
        assert_eq!(p.get_value(), "UTF-8");
    }

    #[test]
    fn parse_parameter_without_spaces() {
        let ct = ContentType::parse("text/html;level=1");
        let p = ct.get_parameter().unwrap();
        assert_eq!(p.get_attribute(), "level");
        assert_eq!(p.get_value(), "1");
    }

    #[test]
    fn is_json_ignores_case() {
        assert!(ContentType::parse("Application/JSON").is_json());
        assert!(ContentType::parse("APPLICATION/json; charset=utf-8").is_json());
    }

    #[test]
    fn parameter_value_keeps_case() {
        let ct = ContentType::parse("text/plain; charset=UTF-8");
        assert_eq!(ct.get_parameter().unwrap().get_value(), "UTF-8");
    }

    #[test]
    fn second_parameter_collapses_into_value() {
        let ct = ContentType::parse("multipart/form-data; boundary=x; charset=utf-8");
        let p = ct.get_parameter().unwrap();
        assert_eq!(p.get_attribute(), "boundary");
        assert_eq!(p.get_value(), "x; charset=utf-8");
    }

    #[test]
    fn subtype_may_contain_slash() {
        let ct = ContentType::parse("a/b/c");
        assert_eq!(ct.get_primary_type(), "a");
        assert_eq!(ct.get_sub_type(), "b/c");
    }

    #[test]
    fn fallback_for_unparseable_values() {
        let fallback = ContentType::default();
        for value in [
            "",
            "garbage",
            "/plain",
            "text/",
            "text /plain",
            "text/plain ",
            "text/plain;",
            "text/plain; charset",
            "text/plain; charset=",
            "text/plain; =utf-8",
        ] {
            assert_eq!(ContentType::parse(value), fallback, "value: {:?}", value);
        }
    }

    #[test]
    fn whitespace_around_semicolon_accepted() {
        let ct = ContentType::parse("text/plain ; charset=us-ascii");
        assert_eq!(ct.get_sub_type(), "plain");
        assert_eq!(ct.get_parameter().unwrap().get_attribute(), "charset");
    }

    #[test]
    fn default_is_text_plain() {
        let ct = ContentType::default();
        assert!(ct.is_mime_type("text", "plain"));
        assert!(ct.get_parameter().is_none());
    }

    #[test]
    fn display_round_trip() {
        for value in ["text/plain", "application/json", "application/json; charset=UTF-8"] {
            assert_eq!(ContentType::parse(value).to_string(), value);
        }
    }

    #[test]
    fn mime_type_predicates() {
        let ct = ContentType::parse("Text/HTML");
        assert!(ct.is_primary_type("text"));
        assert!(ct.is_sub_type("html"));
        assert!(ct.is_mime_type("TEXT", "html"));
        assert!(!ct.is_mime_type("text", "plain"));
    }
}
