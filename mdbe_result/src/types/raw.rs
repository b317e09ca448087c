//! Raw cell values as the engine hands them over.

use std::fmt;

use itertools::Itertools;

use super::EngineType;

/// A cell before type-mapping conversion.
///
/// NULL arrives either as [`RawCell::Null`] or as the engine's in-band nil
/// sentinel for the storage width: the minimum value of a signed integer
/// width, or NaN for floating point.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Explicit NULL.
    Null,
    /// 8-bit boolean storage.
    Bool(bool),
    /// 8-bit integer storage.
    TinyInt(i8),
    /// 16-bit integer storage.
    SmallInt(i16),
    /// 32-bit integer storage (also dates, times and month intervals).
    Int(i32),
    /// 64-bit integer storage (also timestamps and second intervals).
    BigInt(i64),
    /// 128-bit integer storage.
    HugeInt(i128),
    /// Single precision float storage.
    Real(f32),
    /// Double precision float storage.
    Double(f64),
    /// Fixed-point storage: `unscaled * 10^-scale`.
    Decimal {
        /// Unscaled integer value.
        unscaled: i128,
        /// Number of fractional digits.
        scale: u8,
    },
    /// String storage.
    Text(String),
    /// Binary storage.
    Blob(Vec<u8>),
}

impl RawCell {
    /// Whether this cell is NULL, either explicitly or by nil sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::TinyInt(v) => *v == i8::MIN,
            Self::SmallInt(v) => *v == i16::MIN,
            Self::Int(v) => *v == i32::MIN,
            Self::BigInt(v) => *v == i64::MIN,
            Self::HugeInt(v) => *v == i128::MIN,
            Self::Real(v) => v.is_nan(),
            Self::Double(v) => v.is_nan(),
            Self::Decimal { unscaled, .. } => *unscaled == i128::MIN,
            Self::Bool(_) | Self::Text(_) | Self::Blob(_) => false,
        }
    }

    /// Whether this cell is NULL in a column of `engine_type`.
    ///
    /// A nil sentinel only counts when the storage kind is the one the engine
    /// uses for `engine_type`; a sentinel of any other kind is a malformed
    /// cell, left for the converter to reject.
    #[must_use]
    pub fn is_null_for(&self, engine_type: EngineType) -> bool {
        use EngineType as E;
        match (self, engine_type) {
            (Self::Null, _) => true,
            (Self::TinyInt(_), E::TinyInt)
            | (Self::SmallInt(_), E::SmallInt)
            | (Self::Int(_), E::Int | E::Date | E::Time | E::MonthInterval)
            | (Self::BigInt(_), E::BigInt | E::Timestamp | E::SecondInterval)
            | (Self::HugeInt(_), E::HugeInt)
            | (Self::Real(_), E::Real)
            | (Self::Double(_), E::Double)
            | (Self::Decimal { .. }, E::Decimal) => self.is_null(),
            _ => false,
        }
    }

    /// Name of the storage kind, used in conversion errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::TinyInt(_) => "i8",
            Self::SmallInt(_) => "i16",
            Self::Int(_) => "i32",
            Self::BigInt(_) => "i64",
            Self::HugeInt(_) => "i128",
            Self::Real(_) => "f32",
            Self::Double(_) => "f64",
            Self::Decimal { .. } => "decimal",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::TinyInt(v) => write!(f, "{v}"),
            Self::SmallInt(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::HugeInt(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal { unscaled, scale } => write!(f, "{unscaled}e-{scale}"),
            Self::Text(s) => f.write_str(s),
            Self::Blob(b) => write!(f, "{:02x}", b.iter().format("")),
        }
    }
}

impl From<bool> for RawCell {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for RawCell {
    fn from(v: i8) -> Self {
        Self::TinyInt(v)
    }
}

impl From<i16> for RawCell {
    fn from(v: i16) -> Self {
        Self::SmallInt(v)
    }
}

impl From<i32> for RawCell {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for RawCell {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<i128> for RawCell {
    fn from(v: i128) -> Self {
        Self::HugeInt(v)
    }
}

impl From<f32> for RawCell {
    fn from(v: f32) -> Self {
        Self::Real(v)
    }
}

impl From<f64> for RawCell {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for RawCell {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RawCell {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for RawCell {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for RawCell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_sentinels() {
        assert!(RawCell::Null.is_null());
        assert!(RawCell::Int(i32::MIN).is_null());
        assert!(RawCell::BigInt(i64::MIN).is_null());
        assert!(RawCell::Double(f64::NAN).is_null());
        assert!(!RawCell::Int(0).is_null());
        assert!(!RawCell::Text(String::new()).is_null());
    }

    #[test]
    fn test_sentinel_only_null_in_its_own_storage() {
        assert!(RawCell::Null.is_null_for(EngineType::Varchar));
        assert!(RawCell::Int(i32::MIN).is_null_for(EngineType::Int));
        assert!(RawCell::Int(i32::MIN).is_null_for(EngineType::Date));
        assert!(RawCell::BigInt(i64::MIN).is_null_for(EngineType::Timestamp));
        assert!(!RawCell::Int(i32::MIN).is_null_for(EngineType::Varchar));
        assert!(!RawCell::TinyInt(i8::MIN).is_null_for(EngineType::Boolean));
        assert!(!RawCell::BigInt(i64::MIN).is_null_for(EngineType::Decimal));
        assert!(!RawCell::Double(f64::NAN).is_null_for(EngineType::Real));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawCell::from(None::<i32>), RawCell::Null);
        assert_eq!(RawCell::from(Some("x")), RawCell::Text("x".into()));
    }

    #[test]
    fn test_display_blob_hex() {
        assert_eq!(RawCell::Blob(vec![0x0a, 0xff]).to_string(), "0aff");
        assert_eq!(RawCell::SmallInt(i16::MIN).to_string(), "null");
    }
}
