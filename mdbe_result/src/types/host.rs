//! Host-side value representation.
//!
//! `HostType` is the closed set of target types the registry can map to, and
//! `HostValue` is the tagged union of values of those types. Requesting a
//! value "as" a type is a match over these enums, never an open-ended cast.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::decimal::Decimal;

/// A target host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// [`Decimal`]
    Decimal,
    /// `String`
    Text,
    /// `Vec<u8>`
    Bytes,
    /// [`NaiveDate`]
    Date,
    /// [`NaiveTime`]
    Time,
    /// [`NaiveDateTime`]
    Timestamp,
    /// [`TimeDelta`]
    Duration,
}

impl HostType {
    /// Whether a value whose mapped type is `self` can be handed out as
    /// `target` without loss.
    ///
    /// Identity always holds. Integers widen to wider integers, to
    /// [`HostType::Decimal`], and to floats with enough mantissa; `F32`
    /// widens to `F64`; dates widen to midnight timestamps.
    #[must_use]
    pub const fn can_widen_to(self, target: Self) -> bool {
        if self as u8 == target as u8 {
            return true;
        }
        matches!(
            (self, target),
            (
                Self::I8,
                Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::F32 | Self::F64 | Self::Decimal
            ) | (
                Self::I16,
                Self::I32 | Self::I64 | Self::I128 | Self::F32 | Self::F64 | Self::Decimal
            ) | (Self::I32, Self::I64 | Self::I128 | Self::F64 | Self::Decimal)
                | (Self::I64, Self::I128 | Self::Decimal)
                | (Self::I128, Self::Decimal)
                | (Self::F32, Self::F64)
                | (Self::Date, Self::Timestamp)
        )
    }

    /// The Rust type name this host type is represented by.
    #[must_use]
    pub const fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "Decimal",
            Self::Text => "String",
            Self::Bytes => "Vec<u8>",
            Self::Date => "NaiveDate",
            Self::Time => "NaiveTime",
            Self::Timestamp => "NaiveDateTime",
            Self::Duration => "TimeDelta",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// A converted cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit integer.
    I8(i8),
    /// 16-bit integer.
    I16(i16),
    /// 32-bit integer.
    I32(i32),
    /// 64-bit integer.
    I64(i64),
    /// 128-bit integer.
    I128(i128),
    /// Single precision float.
    F32(f32),
    /// Double precision float.
    F64(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// Character string.
    Text(String),
    /// Binary string.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time without zone.
    Timestamp(NaiveDateTime),
    /// Signed duration.
    Duration(TimeDelta),
}

impl HostValue {
    /// The host type of this value, or `None` for NULL.
    #[must_use]
    pub const fn host_type(&self) -> Option<HostType> {
        let ty = match self {
            Self::Null => return None,
            Self::Bool(_) => HostType::Bool,
            Self::I8(_) => HostType::I8,
            Self::I16(_) => HostType::I16,
            Self::I32(_) => HostType::I32,
            Self::I64(_) => HostType::I64,
            Self::I128(_) => HostType::I128,
            Self::F32(_) => HostType::F32,
            Self::F64(_) => HostType::F64,
            Self::Decimal(_) => HostType::Decimal,
            Self::Text(_) => HostType::Text,
            Self::Bytes(_) => HostType::Bytes,
            Self::Date(_) => HostType::Date,
            Self::Time(_) => HostType::Time,
            Self::Timestamp(_) => HostType::Timestamp,
            Self::Duration(_) => HostType::Duration,
        };
        Some(ty)
    }

    /// Whether this is SQL NULL.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert into `target` along a lossless widening.
    ///
    /// NULL stays NULL. Returns `None` if [`HostType::can_widen_to`] does not
    /// allow the conversion.
    #[must_use]
    pub fn widen(self, target: HostType) -> Option<Self> {
        let Some(source) = self.host_type() else {
            return Some(Self::Null);
        };
        if source == target {
            return Some(self);
        }
        if !source.can_widen_to(target) {
            return None;
        }
        let widened = match (self, target) {
            (Self::I8(v), HostType::I16) => Self::I16(v.into()),
            (Self::I8(v), HostType::I32) => Self::I32(v.into()),
            (Self::I8(v), HostType::I64) => Self::I64(v.into()),
            (Self::I8(v), HostType::I128) => Self::I128(v.into()),
            (Self::I8(v), HostType::F32) => Self::F32(v.into()),
            (Self::I8(v), HostType::F64) => Self::F64(v.into()),
            (Self::I8(v), HostType::Decimal) => Self::Decimal(Decimal::from_integer(v.into())),
            (Self::I16(v), HostType::I32) => Self::I32(v.into()),
            (Self::I16(v), HostType::I64) => Self::I64(v.into()),
            (Self::I16(v), HostType::I128) => Self::I128(v.into()),
            (Self::I16(v), HostType::F32) => Self::F32(v.into()),
            (Self::I16(v), HostType::F64) => Self::F64(v.into()),
            (Self::I16(v), HostType::Decimal) => Self::Decimal(Decimal::from_integer(v.into())),
            (Self::I32(v), HostType::I64) => Self::I64(v.into()),
            (Self::I32(v), HostType::I128) => Self::I128(v.into()),
            (Self::I32(v), HostType::F64) => Self::F64(v.into()),
            (Self::I32(v), HostType::Decimal) => Self::Decimal(Decimal::from_integer(v.into())),
            (Self::I64(v), HostType::I128) => Self::I128(v.into()),
            (Self::I64(v), HostType::Decimal) => Self::Decimal(Decimal::from_integer(v.into())),
            (Self::I128(v), HostType::Decimal) => Self::Decimal(Decimal::from_integer(v)),
            (Self::F32(v), HostType::F64) => Self::F64(v.into()),
            (Self::Date(d), HostType::Timestamp) => Self::Timestamp(d.and_time(NaiveTime::default())),
            _ => return None,
        };
        Some(widened)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::I128(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Bytes(v) => write!(f, "{:02x}", v.iter().format("")),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v}"),
        }
    }
}

/// Generates `From<native>` for `HostValue`.
macro_rules! impl_host_value_from {
    ($($native:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$native> for HostValue {
                fn from(v: $native) -> Self {
                    Self::$variant(v)
                }
            }
        )+
    };
}

impl_host_value_from!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => Text,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    TimeDelta => Duration,
);

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
