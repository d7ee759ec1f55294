//! Compact and pretty JSON emission.
//!
//! The writers walk an installed AST and append text to any [`OutputSink`].
//! Compact mode emits no whitespace at all; pretty mode puts every element
//! on its own line, indents two spaces per depth, and writes a single space
//! after each key's colon.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::ast::ValueKind;
use crate::value::{Array, Object, Value};

/// Anything serialized output can be appended to.
pub trait OutputSink {
    fn append(&mut self, text: &str);
    fn append_char(&mut self, c: char);
}

impl OutputSink for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }

    fn append_char(&mut self, c: char) {
        self.push(c);
    }
}

impl OutputSink for Vec<u8> {
    fn append(&mut self, text: &str) {
        self.extend_from_slice(text.as_bytes());
    }

    fn append_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}

/// Serializes `value` compactly.
pub fn to_string(value: &Value<'_>) -> String {
    let mut out = String::new();
    write(&mut out, value);
    out
}

/// Serializes `value` with two-space indentation.
pub fn to_string_pretty(value: &Value<'_>) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value);
    out
}

/// Writes `value` compactly into `sink`.
pub fn write<S: OutputSink>(sink: &mut S, value: &Value<'_>) {
    write_value(sink, value, None);
}

/// Writes `value` into `sink` with two-space indentation.
pub fn write_pretty<S: OutputSink>(sink: &mut S, value: &Value<'_>) {
    write_value(sink, value, Some(0));
}

fn write_value<S: OutputSink>(sink: &mut S, value: &Value<'_>, indent: Option<usize>) {
    match value.kind() {
        ValueKind::Null => sink.append("null"),
        ValueKind::False => sink.append("false"),
        ValueKind::True => sink.append("true"),
        ValueKind::Integer => {
            sink.append(&value.integer_value().unwrap_or_default().to_string());
        }
        ValueKind::Double => write_double(sink, value.double_value().unwrap_or_default()),
        ValueKind::String => write_escaped(sink, value.as_str().unwrap_or_default()),
        ValueKind::Array => {
            if let Some(array) = value.as_array() {
                write_array(sink, &array, indent);
            }
        }
        ValueKind::Object => {
            if let Some(object) = value.as_object() {
                write_object(sink, &object, indent);
            }
        }
    }
}

/// Doubles keep their kind across a round trip: integral finite values get
/// a trailing `.0` so they re-parse as doubles, and the infinities (only
/// reachable through exponent overflow) are spelled as literals that
/// overflow right back.
fn write_double<S: OutputSink>(sink: &mut S, value: f64) {
    if value == f64::INFINITY {
        sink.append("1e999");
    } else if value == f64::NEG_INFINITY {
        sink.append("-1e999");
    } else {
        let text = value.to_string();
        sink.append(&text);
        if !text.contains('.') {
            sink.append(".0");
        }
    }
}

fn write_escaped<S: OutputSink>(sink: &mut S, text: &str) {
    sink.append_char('"');
    for c in text.chars() {
        match c {
            '"' => sink.append("\\\""),
            '\\' => sink.append("\\\\"),
            '\u{0008}' => sink.append("\\b"),
            '\u{000C}' => sink.append("\\f"),
            '\n' => sink.append("\\n"),
            '\r' => sink.append("\\r"),
            '\t' => sink.append("\\t"),
            c if (c as u32) < 0x20 => sink.append(&format!("\\u{:04X}", c as u32)),
            c => sink.append_char(c),
        }
    }
    sink.append_char('"');
}

fn write_array<S: OutputSink>(sink: &mut S, array: &Array<'_>, indent: Option<usize>) {
    sink.append_char('[');
    if array.is_empty() {
        sink.append_char(']');
        return;
    }
    let inner = indent.map(|depth| depth + 1);
    let mut first = true;
    for element in array {
        if !first {
            sink.append_char(',');
        }
        first = false;
        if let Some(depth) = inner {
            newline_indent(sink, depth);
        }
        write_value(sink, &element, inner);
    }
    if let Some(depth) = indent {
        newline_indent(sink, depth);
    }
    sink.append_char(']');
}

fn write_object<S: OutputSink>(sink: &mut S, object: &Object<'_>, indent: Option<usize>) {
    sink.append_char('{');
    if object.is_empty() {
        sink.append_char('}');
        return;
    }
    let inner = indent.map(|depth| depth + 1);
    let mut first = true;
    for (key, element) in object {
        if !first {
            sink.append_char(',');
        }
        first = false;
        if let Some(depth) = inner {
            newline_indent(sink, depth);
        }
        write_escaped(sink, key);
        sink.append_char(':');
        if indent.is_some() {
            sink.append_char(' ');
        }
        write_value(sink, &element, inner);
    }
    if let Some(depth) = indent {
        newline_indent(sink, depth);
    }
    sink.append_char('}');
}

fn newline_indent<S: OutputSink>(sink: &mut S, depth: usize) {
    sink.append_char('\n');
    for _ in 0..depth {
        sink.append("  ");
    }
}
