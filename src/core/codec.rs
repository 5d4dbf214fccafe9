//! Field codecs
//!
//! Small pure functions converting between VCF text and typed values.
//! Numeric parsers never fail loudly: malformed numbers come back as `None`
//! (or a documented default) and are left to the caller to report.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::core::error::HeaderError;

/// Declared value type of an INFO/FORMAT field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

impl FromStr for ValueType {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(ValueType::Integer),
            "FLOAT" => Ok(ValueType::Float),
            "FLAG" => Ok(ValueType::Flag),
            "CHARACTER" => Ok(ValueType::Character),
            "STRING" => Ok(ValueType::String),
            _ => Err(HeaderError::UnknownType(s.to_string())),
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Integer => "Integer",
            ValueType::Float => "Float",
            ValueType::Flag => "Flag",
            ValueType::Character => "Character",
            ValueType::String => "String",
        };
        f.write_str(name)
    }
}

/// A value decoded according to its declared type
///
/// Missing list elements (`.`) and unparsable numbers are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Flag(bool),
    Character(Vec<Option<char>>),
    String(Vec<String>),
}

/// Decode raw text using a declared type
pub fn parse_typed(value: &str, value_type: ValueType) -> TypedValue {
    match value_type {
        ValueType::Integer => TypedValue::Integer(split_list(value).into_iter().map(parse_int).collect()),
        ValueType::Float => TypedValue::Float(split_list(value).into_iter().map(parse_float).collect()),
        ValueType::Flag => TypedValue::Flag(parse_flag(Some(value))),
        ValueType::Character => TypedValue::Character(
            split_list(value)
                .into_iter()
                .map(|s| if s == "." { None } else { s.chars().next() })
                .collect(),
        ),
        ValueType::String => TypedValue::String(split_list(value).into_iter().map(str::to_string).collect()),
    }
}

/// Parse an integer; `.`, empty and malformed input give `None`
#[inline]
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || s == "." {
        return None;
    }
    s.parse().ok()
}

/// Parse a float; `.`, empty and malformed input give `None`
#[inline]
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "." {
        return None;
    }
    s.parse().ok()
}

/// Integer with a zero default
#[inline]
pub fn parse_int_safe(s: &str) -> i64 {
    parse_int(s).unwrap_or(0)
}

/// Float with a NaN default
#[inline]
pub fn parse_float_safe(s: &str) -> f64 {
    parse_float(s).unwrap_or(f64::NAN)
}

/// A flag is set whenever its key is present, regardless of value
#[inline]
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some()
}

/// Format a float, writing `.` for NaN
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        ".".to_string()
    } else {
        value.to_string()
    }
}

/// Format an optional value, writing `.` for `None`
pub fn format_opt<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => ".".to_string(),
    }
}

/// Split a comma separated list; empty text or a lone `.` is the empty list
pub fn split_list(s: &str) -> Vec<&str> {
    if s.is_empty() || s == "." {
        Vec::new()
    } else {
        s.split(',').collect()
    }
}

/// Parse a comma separated list of integers
pub fn parse_int_list(s: &str) -> Vec<Option<i64>> {
    split_list(s).into_iter().map(parse_int).collect()
}

/// Parse a comma separated list of floats
pub fn parse_float_list(s: &str) -> Vec<Option<f64>> {
    split_list(s).into_iter().map(parse_float).collect()
}

/// Join values with commas; the empty list becomes `.`
pub fn join_list<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return ".".to_string();
    }
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Number of elements in an INFO value, as counted against a cardinality
///
/// A bare key (flag) has zero elements.
pub fn count_values(value: &str) -> usize {
    if value.is_empty() {
        0
    } else {
        value.split(',').count()
    }
}

/// Replace characters that are illegal inside an INFO or annotation value
///
/// # Examples
/// ```
/// use fast_vcf::core::codec::value_safe;
///
/// assert_eq!(value_safe("a b;c=d"), "a_b_c_d");
/// assert_eq!(value_safe("p.(Gly12Asp)"), "p._Gly12Asp_");
/// ```
pub fn value_safe(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' | '\t' | ';' | '=' | '|' | '(' | ')' | '[' | ']' | ',' => '_',
            c => c,
        })
        .collect()
}

/// Collapse runs of separators into a single `_` for effect annotations
pub fn effect_safe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        let sep = c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ';' | ',' | '|');
        if sep {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Keys must match `[A-Za-z_][0-9A-Za-z._]*`
pub fn is_valid_info_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

const INFO_ESCAPES: [(char, &str); 3] = [(';', "%3B"), ('=', "%3D"), (',', "%2C")];

/// Percent-escape the separators of an INFO value
pub fn encode_info_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match INFO_ESCAPES.iter().find(|(ch, _)| *ch == c) {
            Some((_, code)) => out.push_str(code),
            None => out.push(c),
        }
    }
    out
}

/// Inverse of [`encode_info_value`]
pub fn decode_info_value(s: &str) -> String {
    let mut out = s.to_string();
    for (ch, code) in INFO_ESCAPES {
        if out.contains(code) {
            out = out.replace(code, &ch.to_string());
        }
    }
    out
}

/// Split raw INFO text into a key to value map
///
/// Flags map to the empty string.
pub fn parse_info(info: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (key, value) in info_tokens(info) {
        map.insert(key.to_string(), value.unwrap_or("").to_string());
    }
    map
}

/// Look up one key in raw INFO text without building the map
pub fn find_info_value<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info_tokens(info)
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.unwrap_or(""))
}

/// Iterate `(key, value)` pairs of raw INFO text
pub fn info_tokens(info: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    let info = if info == "." { "" } else { info };
    info.split(';').filter(|t| !t.is_empty()).map(|token| match token.find('=') {
        Some(eq) => (&token[..eq], Some(&token[eq + 1..])),
        None => (token, None),
    })
}
