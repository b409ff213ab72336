#![forbid(unsafe_code)]

//! Typed value conversion over the allowed parameter kinds
//!
//! Raw token strings are converted to [`Value`]s directed by a [`ValueKind`].
//! The kind set is a closed enum, so "is this type allowed?" is answered by
//! the type system: every representable kind is allowed.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of parameter value kinds a handler may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Bool,
    DateTime,
}

impl ValueKind {
    /// Every declarable kind, in a fixed order. Useful for exhaustive tests.
    pub const ALL: [ValueKind; 10] = [
        ValueKind::Text,
        ValueKind::I8,
        ValueKind::I16,
        ValueKind::I32,
        ValueKind::I64,
        ValueKind::F32,
        ValueKind::F64,
        ValueKind::Decimal,
        ValueKind::Bool,
        ValueKind::DateTime,
    ];
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Decimal => "decimal",
            ValueKind::Bool => "bool",
            ValueKind::DateTime => "date-time",
        };
        write!(f, "{name}")
    }
}

/// A typed parameter value, tagged by its [`ValueKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Value {
    /// The kind this value carries
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Bool(_) => ValueKind::Bool,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Value::I8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::I16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

/// Error produced when a raw string cannot convert to its declared kind
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unable to parse value '{value}' to type {kind}.")]
pub struct ConversionError {
    pub value: String,
    pub kind: ValueKind,
}

/// Returns true when `value` would convert to `kind` without error
pub fn can_parse(value: &str, kind: ValueKind) -> bool {
    parse(value, kind).is_ok()
}

/// Converts a raw token string to a typed [`Value`]
pub fn parse(value: &str, kind: ValueKind) -> Result<Value, ConversionError> {
    let err = || ConversionError {
        value: value.to_string(),
        kind,
    };

    match kind {
        ValueKind::Text => Ok(Value::Text(value.to_string())),
        ValueKind::I8 => value.parse().map(Value::I8).map_err(|_| err()),
        ValueKind::I16 => value.parse().map(Value::I16).map_err(|_| err()),
        ValueKind::I32 => value.parse().map(Value::I32).map_err(|_| err()),
        ValueKind::I64 => value.parse().map(Value::I64).map_err(|_| err()),
        ValueKind::F32 => value.parse().map(Value::F32).map_err(|_| err()),
        ValueKind::F64 => value.parse().map(Value::F64).map_err(|_| err()),
        ValueKind::Decimal => Decimal::from_str(value).map(Value::Decimal).map_err(|_| err()),
        ValueKind::Bool => parse_bool(value).map(Value::Bool).ok_or_else(err),
        ValueKind::DateTime => parse_date_time(value).map(Value::DateTime).ok_or_else(err),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Date-time parsing: the `now` and `today` sentinels are intercepted before
/// literal parsing. `today` is the current date at midnight.
fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if value.eq_ignore_ascii_case("now") {
        return Some(Local::now().naive_local());
    }
    if value.eq_ignore_ascii_case("today") {
        return Local::now().date_naive().and_hms_opt(0, 0, 0);
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    // A bare date literal is accepted as that date at midnight.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
