//! Typed literal values and their `OData` text rendering.
//!
//! Rendering is pure and infallible. The rules are wire-exact:
//!
//! - strings are single-quoted, with backslash, `'` and `"` characters
//!   C-style backslash-escaped;
//! - lists are flat-joined with `,` and quoted as one string; elements are
//!   **not** individually escaped or quoted (`["a","b"]` renders `'a,b'`);
//! - numbers and booleans render as their bare literal text.

use std::fmt;

/// A scalar (or flat list) value destined for a filter expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Flat list of scalars. Only meaningful as a comparison value; rendered
    /// as one comma-joined quoted string.
    List(Vec<Value>),
}

impl Value {
    /// Render as an `OData` literal: quoted/escaped for strings and lists,
    /// bare text for everything else.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", escape_str(s)),
            Value::List(items) => {
                let joined = items
                    .iter()
                    .map(Value::raw_text)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("'{joined}'")
            }
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => self.raw_text(),
        }
    }

    /// Bare text without quoting or escaping. Used for the flat list join.
    fn raw_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items
                .iter()
                .map(Value::raw_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Backslash-escape quote and backslash characters.
fn escape_str(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' | '\'' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
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
