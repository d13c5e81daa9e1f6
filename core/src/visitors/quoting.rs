//! Identifier and literal quoting.
//!
//! Kept apart from the visitors so a collector can quote values inline
//! without knowing which dialect it renders for.

use core::fmt::Write;

use crate::value::Value;

/// Pluggable quoting rules.
///
/// Identifier quotes and string quotes embedded in a name or value are
/// escaped by doubling.
pub trait Quoting: Send + Sync {
    /// Opening and closing identifier quote.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Whether backslashes inside string literals must be escaped.
    fn escapes_backslash(&self) -> bool {
        false
    }

    fn quote_identifier(&self, name: &str, out: &mut String) {
        let quote = self.identifier_quote();
        out.reserve(name.len() + 2);
        out.push(quote);
        for c in name.chars() {
            if c == quote {
                out.push(quote);
            }
            out.push(c);
        }
        out.push(quote);
    }

    fn quote_bool(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn quote_string(&self, value: &str, out: &mut String) {
        let backslash = self.escapes_backslash();
        out.reserve(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' if backslash => out.push_str("\\\\"),
                c => out.push(c),
            }
        }
        out.push('\'');
    }

    /// `X'0a1b'`
    fn quote_bytes(&self, value: &[u8], out: &mut String) {
        out.push_str("X'");
        push_hex(value, out);
        out.push('\'');
    }

    fn quote_value(&self, value: &Value, out: &mut String) {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Bool(b) => out.push_str(self.quote_bool(*b)),
            Value::Integer(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(f) if f.is_nan() => self.quote_string("NaN", out),
            Value::Float(f) if f.is_infinite() => {
                self.quote_string(if *f > 0.0 { "Infinity" } else { "-Infinity" }, out)
            }
            Value::Float(f) => {
                let _ = write!(out, "{f:?}");
            }
            Value::Text(s) => self.quote_string(s, out),
            Value::Bytes(b) => self.quote_bytes(b, out),
            #[cfg(feature = "chrono")]
            Value::Date(d) => {
                let _ = write!(out, "'{d}'");
            }
            #[cfg(feature = "chrono")]
            Value::DateTime(d) => {
                let _ = write!(out, "'{d}'");
            }
            #[cfg(feature = "uuid")]
            Value::Uuid(u) => {
                let _ = write!(out, "'{}'", u.hyphenated());
            }
        }
    }
}

fn push_hex(bytes: &[u8], out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.reserve(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[usize::from(byte >> 4)] as char);
        out.push(HEX[usize::from(byte & 0x0f)] as char);
    }
}

/// Standard SQL: `"ident"`, `'text'`, `TRUE`/`FALSE`, `X'..'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiQuoting;

impl Quoting for AnsiQuoting {}

/// PostgreSQL: standard quoting with `'\x..'` bytea literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresQuoting;

impl Quoting for PostgresQuoting {
    fn quote_bytes(&self, value: &[u8], out: &mut String) {
        out.push_str("'\\x");
        push_hex(value, out);
        out.push('\'');
    }
}

/// MySQL: backtick identifiers and backslash-escaped strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlQuoting;

impl Quoting for MySqlQuoting {
    fn identifier_quote(&self) -> char {
        '`'
    }

    fn escapes_backslash(&self) -> bool {
        true
    }
}

/// SQLite: standard quoting with `1`/`0` booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteQuoting;

impl Quoting for SqliteQuoting {
    fn quote_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}
