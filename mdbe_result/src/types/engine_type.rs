//! Engine type tags.
//!
//! These are the value kinds the embedded engine declares for result columns.
//! The tag is the only key the type mapping registry is consulted with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The engine's declared value kind for a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    /// `boolean`
    Boolean,
    /// `tinyint` (8-bit)
    TinyInt,
    /// `smallint` (16-bit)
    SmallInt,
    /// `int` (32-bit)
    Int,
    /// `bigint` (64-bit)
    BigInt,
    /// `hugeint` (128-bit)
    HugeInt,
    /// `real` (single precision)
    Real,
    /// `double` (double precision)
    Double,
    /// `decimal(p, s)`; the scale travels with each raw cell.
    Decimal,
    /// `char(n)`
    Char,
    /// `varchar(n)`
    Varchar,
    /// `clob`
    Clob,
    /// `blob`
    Blob,
    /// `date`, stored as days since 1970-01-01.
    Date,
    /// `time`, stored as milliseconds since midnight.
    Time,
    /// `timestamp`, stored as milliseconds since the Unix epoch.
    Timestamp,
    /// `month_interval`, stored as a month count.
    MonthInterval,
    /// `sec_interval`, stored as milliseconds.
    SecondInterval,
}

impl EngineType {
    /// Every engine type, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Boolean,
        Self::TinyInt,
        Self::SmallInt,
        Self::Int,
        Self::BigInt,
        Self::HugeInt,
        Self::Real,
        Self::Double,
        Self::Decimal,
        Self::Char,
        Self::Varchar,
        Self::Clob,
        Self::Blob,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::MonthInterval,
        Self::SecondInterval,
    ];

    /// The SQL name the engine reports for this type.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::TinyInt => "tinyint",
            Self::SmallInt => "smallint",
            Self::Int => "int",
            Self::BigInt => "bigint",
            Self::HugeInt => "hugeint",
            Self::Real => "real",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Varchar => "varchar",
            Self::Clob => "clob",
            Self::Blob => "blob",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::MonthInterval => "month_interval",
            Self::SecondInterval => "sec_interval",
        }
    }

    /// Whether values of this type are character strings.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Char | Self::Varchar | Self::Clob)
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// Returned when a type name is not an engine type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown engine type name: {0}")]
pub struct UnknownEngineType(pub String);

impl FromStr for EngineType {
    type Err = UnknownEngineType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let ty = match lowered.as_str() {
            "boolean" | "bool" => Self::Boolean,
            "tinyint" => Self::TinyInt,
            "smallint" => Self::SmallInt,
            "int" | "integer" => Self::Int,
            "bigint" => Self::BigInt,
            "hugeint" => Self::HugeInt,
            "real" => Self::Real,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "char" => Self::Char,
            "varchar" => Self::Varchar,
            "clob" => Self::Clob,
            "blob" => Self::Blob,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "month_interval" => Self::MonthInterval,
            "sec_interval" => Self::SecondInterval,
            _ => return Err(UnknownEngineType(s.to_string())),
        };
        Ok(ty)
    }
}
