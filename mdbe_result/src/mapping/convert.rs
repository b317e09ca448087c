//! Converters from raw storage to host values, one per engine type family.
//!
//! Converters never see NULL: [`TypeMappingEntry::convert`] intercepts
//! explicit NULLs and nil sentinels first.
//!
//! [`TypeMappingEntry::convert`]: super::TypeMappingEntry::convert

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};

use crate::error::ConversionFailure;
use crate::types::{Decimal, HostType, HostValue, RawCell};

/// Milliseconds in one day; `time` values must stay below it.
const MILLIS_PER_DAY: i32 = 86_400_000;

/// Signature shared by all converters.
pub type Converter = fn(&RawCell) -> Result<HostValue, ConversionFailure>;

/// Builds the failure for a raw variant the converter does not accept.
const fn wrong_kind(expected: &'static str, raw: &RawCell) -> ConversionFailure {
    ConversionFailure::WrongRawKind {
        expected,
        found: raw.kind_name(),
    }
}

pub(crate) fn to_bool(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Bool(v) => Ok(HostValue::Bool(*v)),
        other => Err(wrong_kind("bool", other)),
    }
}

pub(crate) fn to_i8(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::TinyInt(v) => Ok(HostValue::I8(*v)),
        other => Err(wrong_kind("i8", other)),
    }
}

pub(crate) fn to_i16(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::SmallInt(v) => Ok(HostValue::I16(*v)),
        other => Err(wrong_kind("i16", other)),
    }
}

pub(crate) fn to_i32(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Int(v) => Ok(HostValue::I32(*v)),
        other => Err(wrong_kind("i32", other)),
    }
}

pub(crate) fn to_i64(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::BigInt(v) => Ok(HostValue::I64(*v)),
        other => Err(wrong_kind("i64", other)),
    }
}

pub(crate) fn to_i128(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::HugeInt(v) => Ok(HostValue::I128(*v)),
        other => Err(wrong_kind("i128", other)),
    }
}

pub(crate) fn to_f32(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Real(v) => Ok(HostValue::F32(*v)),
        other => Err(wrong_kind("f32", other)),
    }
}

pub(crate) fn to_f64(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Double(v) => Ok(HostValue::F64(*v)),
        other => Err(wrong_kind("f64", other)),
    }
}

pub(crate) fn to_decimal(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Decimal { unscaled, scale } => Decimal::new(*unscaled, *scale)
            .map(HostValue::Decimal)
            .ok_or_else(|| ConversionFailure::out_of_range(raw, HostType::Decimal)),
        other => Err(wrong_kind("decimal", other)),
    }
}

pub(crate) fn to_text(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Text(s) => Ok(HostValue::Text(s.clone())),
        other => Err(wrong_kind("text", other)),
    }
}

pub(crate) fn to_bytes(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    match raw {
        RawCell::Blob(b) => Ok(HostValue::Bytes(b.clone())),
        other => Err(wrong_kind("blob", other)),
    }
}

/// `Int` days since 1970-01-01.
pub(crate) fn to_date(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    let RawCell::Int(days) = raw else {
        return Err(wrong_kind("i32", raw));
    };
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(TimeDelta::days(i64::from(*days))))
        .map(HostValue::Date)
        .ok_or_else(|| ConversionFailure::out_of_range(days, HostType::Date))
}

/// `Int` milliseconds since midnight.
pub(crate) fn to_time(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    let RawCell::Int(millis) = raw else {
        return Err(wrong_kind("i32", raw));
    };
    if !(0..MILLIS_PER_DAY).contains(millis) {
        return Err(ConversionFailure::out_of_range(millis, HostType::Time));
    }
    let secs = millis.unsigned_abs() / 1000;
    let nanos = (millis.unsigned_abs() % 1000) * 1_000_000;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .map(HostValue::Time)
        .ok_or_else(|| ConversionFailure::out_of_range(millis, HostType::Time))
}

/// `BigInt` milliseconds since the Unix epoch.
pub(crate) fn to_timestamp(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    let RawCell::BigInt(millis) = raw else {
        return Err(wrong_kind("i64", raw));
    };
    DateTime::from_timestamp_millis(*millis)
        .map(|dt| HostValue::Timestamp(dt.naive_utc()))
        .ok_or_else(|| ConversionFailure::out_of_range(millis, HostType::Timestamp))
}

/// `BigInt` milliseconds.
pub(crate) fn to_duration(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
    let RawCell::BigInt(millis) = raw else {
        return Err(wrong_kind("i64", raw));
    };
    TimeDelta::try_milliseconds(*millis)
        .map(HostValue::Duration)
        .ok_or_else(|| ConversionFailure::out_of_range(millis, HostType::Duration))
}
