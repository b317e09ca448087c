//! Homogeneous column containers.
//!
//! Whole-column extraction returns a `ColumnValues`: one native vector whose
//! element type is fixed by the requested (or default) host type. `None`
//! entries are SQL NULL.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::ResultError;
use crate::types::{Decimal, HostType, HostValue};

/// Declares `ColumnValues` with one variant and one slice accessor per host type.
macro_rules! column_values {
    ($($variant:ident($native:ty) => $accessor:ident),+ $(,)?) => {
        /// A column of values that all share one host type.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ColumnValues {
            $(
                #[doc = concat!("Values of host type `", stringify!($native), "`.")]
                $variant(Vec<Option<$native>>),
            )+
        }

        impl ColumnValues {
            /// An empty column of `host_type` with room for `capacity` values.
            #[must_use]
            pub fn with_capacity(host_type: HostType, capacity: usize) -> Self {
                match host_type {
                    $(HostType::$variant => Self::$variant(Vec::with_capacity(capacity)),)+
                }
            }

            /// The element host type.
            #[must_use]
            pub const fn host_type(&self) -> HostType {
                match self {
                    $(Self::$variant(_) => HostType::$variant,)+
                }
            }

            /// Number of values, NULLs included.
            #[must_use]
            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(v) => v.len(),)+
                }
            }

            /// Number of NULL values.
            #[must_use]
            pub fn null_count(&self) -> usize {
                match self {
                    $(Self::$variant(v) => v.iter().filter(|x| x.is_none()).count(),)+
                }
            }

            /// The value at 0-based position `i`.
            #[must_use]
            pub fn get(&self, i: usize) -> Option<HostValue> {
                match self {
                    $(Self::$variant(v) => v.get(i).map(|x| x.clone().map_or(HostValue::Null, HostValue::$variant)),)+
                }
            }

            /// Append one value.
            ///
            /// # Errors
            ///
            /// Returns `TypeMismatch` (reported against `ordinal`) if the value
            /// is not NULL and not of this column's host type.
            pub fn push(&mut self, ordinal: usize, value: HostValue) -> Result<(), ResultError> {
                match (self, value) {
                    $(
                        (Self::$variant(v), HostValue::$variant(x)) => v.push(Some(x)),
                        (Self::$variant(v), HostValue::Null) => v.push(None),
                    )+
                    (column, other) => {
                        let found = other.host_type().unwrap_or(column.host_type());
                        return Err(ResultError::type_mismatch(ordinal, found, column.host_type()));
                    }
                }
                Ok(())
            }

            /// Convert into host values, NULLs as [`HostValue::Null`].
            #[must_use]
            pub fn into_values(self) -> Vec<HostValue> {
                match self {
                    $(Self::$variant(v) => v
                        .into_iter()
                        .map(|x| x.map_or(HostValue::Null, HostValue::$variant))
                        .collect(),)+
                }
            }

            $(
                #[doc = concat!("The values as `", stringify!($native), "`, if this is a `", stringify!($variant), "` column.")]
                #[must_use]
                pub fn $accessor(&self) -> Option<&[Option<$native>]> {
                    match self {
                        Self::$variant(v) => Some(v),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            )+
        }
    };
}

column_values!(
    Bool(bool) => as_bool,
    I8(i8) => as_i8,
    I16(i16) => as_i16,
    I32(i32) => as_i32,
    I64(i64) => as_i64,
    I128(i128) => as_i128,
    F32(f32) => as_f32,
    F64(f64) => as_f64,
    Decimal(Decimal) => as_decimal,
    Text(String) => as_text,
    Bytes(Vec<u8>) => as_bytes,
    Date(NaiveDate) => as_date,
    Time(NaiveTime) => as_time,
    Timestamp(NaiveDateTime) => as_timestamp,
    Duration(TimeDelta) => as_duration,
);

impl ColumnValues {
    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the values as [`HostValue`]s.
    pub fn iter(&self) -> impl Iterator<Item = HostValue> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

impl IntoIterator for ColumnValues {
    type Item = HostValue;
    type IntoIter = std::vec::IntoIter<HostValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_values().into_iter()
    }
}
