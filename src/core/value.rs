//! Attribute values and formatting instructions
//!
//! Log attributes are alternating key/value pairs. A `Value` is either plain
//! data or a formatting instruction for the plain-text encoder (radix
//! wrappers, printf-style composites). The JSON encoder serializes the
//! underlying data structurally instead.

use super::error::{LoggerError, Result};
use std::fmt;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Rendered as `0x` + base-16 digits by the plain-text encoder.
    Hex(u64),
    /// Rendered as `0` + base-8 digits by the plain-text encoder.
    Octal(u64),
    /// Rendered as `0b` + base-2 digits by the plain-text encoder.
    Binary(u64),
    /// Printf-style composite: a template with `{}` placeholders and its
    /// substitution arguments. Rendered to its final string in both encoders.
    Fmt(String, Vec<Value>),
    /// A sequence, rendered `[v1, v2, ...]` with per-element quoting.
    List(Vec<Value>),
    /// An error description. The JSON encoder stores the description string.
    Error(String),
    /// A captured stack trace. Both encoders pull this out of the attribute
    /// list and attach it to the record instead.
    Stacktrace(String),
}

/// True if the rendered value needs quoting in the plain-text encoding.
pub(crate) fn needs_quoting(s: &str) -> bool {
    s.contains([' ', '\t', '\n', '\r'])
}

impl Value {
    /// Convenience constructor for composite format values.
    ///
    /// ```
    /// use kvlog::Value;
    ///
    /// let v = Value::fmt("{} beans/day", vec![Value::Int(12)]);
    /// assert_eq!(v.render(), "12 beans/day");
    /// ```
    pub fn fmt(template: impl Into<String>, args: Vec<Value>) -> Self {
        Value::Fmt(template.into(), args)
    }

    /// Wrap an error's description for logging.
    pub fn error<E: fmt::Display>(err: &E) -> Self {
        Value::Error(err.to_string())
    }

    /// Capture the current call stack as a stack-trace payload.
    ///
    /// When passed as a trailing attribute, the encoders attach the trace to
    /// the record (plain text: appended after the log line; JSON: stored
    /// under `"stacktrace"`) instead of treating it as a key/value pair.
    #[must_use]
    pub fn capture_stacktrace() -> Self {
        Value::Stacktrace(std::backtrace::Backtrace::force_capture().to_string())
    }

    /// Render this value for the plain-text encoding.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Uint(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Hex(u) => format!("0x{:x}", u),
            Value::Octal(u) => format!("0{:o}", u),
            Value::Binary(u) => format!("0b{:b}", u),
            Value::Fmt(template, args) => render_template(template, args),
            Value::List(items) => render_list(items),
            Value::Error(msg) => msg.clone(),
            Value::Stacktrace(trace) => trace.clone(),
        }
    }

    /// Raw values are emitted verbatim, without outer whitespace quoting.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Convert to a `serde_json::Value` for the JSON encoding.
    ///
    /// Radix wrappers serialize structurally (their integer), composites are
    /// rendered to their final string first. A non-finite float is the one
    /// value JSON cannot represent and fails here; the JSON encoder recovers
    /// by substituting a fallback record.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let val = match self {
            Value::Null => serde_json::Value::Null,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    LoggerError::formatter("json", format!("non-finite float value: {}", f))
                })?,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Hex(u) | Value::Octal(u) | Value::Binary(u) => {
                serde_json::Value::Number((*u).into())
            }
            Value::Fmt(template, args) => {
                serde_json::Value::String(render_template(template, args))
            }
            Value::List(items) => {
                let mut arr = Vec::with_capacity(items.len());
                for item in items {
                    arr.push(item.to_json()?);
                }
                serde_json::Value::Array(arr)
            }
            Value::Error(msg) => serde_json::Value::String(msg.clone()),
            Value::Stacktrace(trace) => serde_json::Value::String(trace.clone()),
        };
        Ok(val)
    }
}

/// Substitute `{}` placeholders in order. Placeholders beyond the argument
/// list are kept literally; surplus arguments are ignored.
fn render_template(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut next = args.iter();
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        match next.next() {
            Some(arg) => out.push_str(&arg.render()),
            None => out.push_str("{}"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

fn render_list(items: &[Value]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let rendered = item.render();
        if needs_quoting(&rendered) {
            out.push('"');
            out.push_str(&rendered);
            out.push('"');
        } else {
            out.push_str(&rendered);
        }
    }
    out.push(']');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
