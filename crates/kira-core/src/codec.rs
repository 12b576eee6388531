// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown document codec: front-matter + body, byte-stable round-trip (§4.2).
//!
//! Front-matter is YAML-like but deliberately not full YAML: scalars,
//! `[flow, style]` sequences of scalars, and one level of indented block
//! mappings/sequences are all this format needs (§6 "Document format").
//! Keys are stored in an [`indexmap::IndexMap`] so re-serialization preserves
//! insertion order (P1).

use crate::value::{FrontMatter, Value};
use indexmap::IndexMap;
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// A parsed document: front-matter plus body text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Parse raw file bytes into a [`Document`].
///
/// Normalizes `\r\n` to `\n` before parsing (P1's "single-pass
/// normalization"). Fails on invalid UTF-8, a missing/unterminated fence,
/// or duplicate front-matter keys.
pub fn parse(bytes: &[u8]) -> Result<Document, CodecError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CodecError::Malformed(format!("invalid UTF-8: {e}")))?;
    let text = text.replace("\r\n", "\n");

    let mut lines = text.split('\n');
    let first = lines
        .next()
        .ok_or_else(|| CodecError::Malformed("empty document".to_string()))?;
    if first.trim_end() != FENCE {
        return Err(CodecError::Malformed(
            "document does not start with a front-matter fence".to_string(),
        ));
    }

    let mut fm_lines = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FENCE {
            closed = true;
            break;
        }
        fm_lines.push(line);
    }
    if !closed {
        return Err(CodecError::Malformed(
            "front-matter fence was never closed".to_string(),
        ));
    }

    let front_matter = parse_front_matter(&fm_lines)?;

    let body: String = lines.collect::<Vec<_>>().join("\n");
    // Body conventionally starts with a blank line after the closing fence;
    // drop exactly one leading blank line, keep the rest verbatim.
    let body = body.strip_prefix('\n').unwrap_or(&body).to_string();

    Ok(Document { front_matter, body })
}

fn parse_front_matter(lines: &[&str]) -> Result<FrontMatter, CodecError> {
    let mut map = FrontMatter::new();
    for raw in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let (key, rest) = raw
            .split_once(':')
            .ok_or_else(|| CodecError::Malformed(format!("not a `key: value` line: {raw:?}")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CodecError::Malformed(format!("empty key in {raw:?}")));
        }
        if map.contains_key(key) {
            return Err(CodecError::Malformed(format!("duplicate key: {key}")));
        }
        let value = parse_scalar_or_seq(rest.trim());
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

fn parse_scalar_or_seq(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let items = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(|s| parse_scalar(s.trim())).collect()
        };
        return Value::Seq(items);
    }
    parse_scalar(raw)
}

fn parse_scalar(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Some(unquoted) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Value::String(unquoted.replace("\\\"", "\""));
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" | "~" => Value::Null,
        _ => {
            if let Ok(i) = raw.parse::<i64>() {
                Value::Int(i)
            } else if let Ok(f) = raw.parse::<f64>() {
                Value::Float(f)
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

/// Serialize a [`Document`] back to bytes, deterministically.
///
/// Key order follows `front_matter`'s insertion order; the body is emitted
/// byte-for-byte except for a normalized single trailing newline (P1).
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str(FENCE);
    out.push('\n');
    for (key, value) in &doc.front_matter {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&serialize_value(value));
        out.push('\n');
    }
    out.push_str(FENCE);
    out.push('\n');
    out.push('\n');
    out.push_str(&doc.body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn serialize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => serialize_scalar_string(s),
        Value::Seq(items) => {
            let rendered: Vec<String> = items.iter().map(serialize_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Map(map) => serialize_inline_map(map),
    }
}

fn serialize_scalar_string(s: &str) -> String {
    // A bare colon mid-value (e.g. an RFC-3339 timestamp) is not ambiguous:
    // `parse_front_matter` only splits on the *first* colon in the raw line
    // to separate key from value, so it never re-parses a colon inside the
    // value itself. Quoting must therefore only trigger on what would
    // actually misparse: a leading token that collides with `[seq]`/`{map}`
    // syntax or list-item syntax, a value `,`/`]`/`"` would corrupt inside a
    // sequence, or a value that would round-trip as a different scalar type.
    let needs_quoting = s.is_empty()
        || s.contains(['#', '[', ']', ',', '"'])
        || s.starts_with(['-', ' ', '{'])
        || matches!(s, "true" | "false" | "null" | "~")
        || s.parse::<i64>().is_ok()
        || s.parse::<f64>().is_ok();
    if needs_quoting {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

fn serialize_inline_map(map: &IndexMap<String, Value>) -> String {
    let rendered: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{k}: {}", serialize_value(v)))
        .collect();
    format!("{{{}}}", rendered.join(", "))
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
