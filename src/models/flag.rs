use rocket::form::{self, FromFormField, ValueField};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Serialize, Serializer};
use std::fmt;

/// A 0/1 status flag as reported by backup agents.
///
/// Serializes to JSON as the integer `0` or `1` and is stored as an SQLite
/// integer, so the wire format and the `backup` table stay compatible with
/// agents that only speak integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(bool);

impl Flag {
    pub const UNSET: Flag = Flag(false);
    pub const SET: Flag = Flag(true);

    pub fn is_set(self) -> bool {
        self.0
    }

    pub fn as_int(self) -> u8 {
        u8::from(self.0)
    }

    /// Parse the spellings accepted at the HTTP boundary.
    pub fn parse(value: &str) -> Option<Flag> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "off" | "no" => Some(Flag::UNSET),
            "1" | "true" | "on" | "yes" => Some(Flag::SET),
            _ => None,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_int())
    }
}

impl<'v> FromFormField<'v> for Flag {
    fn from_value(field: ValueField<'v>) -> form::Result<'v, Self> {
        Flag::parse(field.value).ok_or_else(|| {
            form::Error::validation(format!("expected 0 or 1, got '{}'", field.value)).into()
        })
    }

    // Absent fields mean "not set"
    fn default() -> Option<Self> {
        Some(Flag::UNSET)
    }
}

impl ToSql for Flag {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.as_int())))
    }
}

impl FromSql for Flag {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Flag::UNSET),
            ValueRef::Integer(v) => Ok(Flag(v != 0)),
            ValueRef::Text(text) => std::str::from_utf8(text)
                .ok()
                .and_then(Flag::parse)
                .ok_or(FromSqlError::InvalidType),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}
