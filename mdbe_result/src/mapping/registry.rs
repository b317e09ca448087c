//! The type mapping registry.
//!
//! A registry maps each engine type tag to a [`TypeMappingEntry`]: the host
//! type values of that engine type become, and the converter producing them.
//! Lookups are by engine type only; column names play no part.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use lazy_static::lazy_static;

use super::convert::{self, Converter};
use crate::error::{ConversionFailure, ResultError};
use crate::types::{EngineType, HostType, HostValue, RawCell};

lazy_static! {
    /// The default registry, shared by every table that does not bring its own.
    static ref DEFAULT_REGISTRY: Arc<TypeMappingRegistry> = Arc::new(TypeMappingRegistry::builtin());
}

/// One row of the mapping table.
#[derive(Clone, Copy)]
pub struct TypeMappingEntry {
    /// Engine type this entry applies to.
    engine_type: EngineType,
    /// Host type produced by the converter.
    host_type: HostType,
    /// Raw → host conversion.
    converter: Converter,
}

impl TypeMappingEntry {
    /// Create an entry.
    ///
    /// The converter must only produce values of `host_type` (or NULL).
    #[must_use]
    pub const fn new(engine_type: EngineType, host_type: HostType, converter: Converter) -> Self {
        Self {
            engine_type,
            host_type,
            converter,
        }
    }

    /// The engine type this entry maps.
    #[inline]
    #[must_use]
    pub const fn engine_type(&self) -> EngineType {
        self.engine_type
    }

    /// The default host type for this engine type.
    #[inline]
    #[must_use]
    pub const fn host_type(&self) -> HostType {
        self.host_type
    }

    /// Convert a raw cell.
    ///
    /// NULL, and the nil sentinel of this entry's engine type, become
    /// [`HostValue::Null`]; anything else is passed to the converter.
    ///
    /// # Errors
    ///
    /// Returns the converter's failure for malformed raw values, or
    /// `WrongRawKind` if a custom converter yields a value of another host type.
    pub fn convert(&self, raw: &RawCell) -> Result<HostValue, ConversionFailure> {
        if raw.is_null_for(self.engine_type) {
            return Ok(HostValue::Null);
        }
        let value = (self.converter)(raw)?;
        match value.host_type() {
            Some(ty) if ty != self.host_type => Err(ConversionFailure::WrongRawKind {
                expected: self.host_type.rust_name(),
                found: ty.rust_name(),
            }),
            _ => Ok(value),
        }
    }
}

impl fmt::Debug for TypeMappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMappingEntry")
            .field("engine_type", &self.engine_type)
            .field("host_type", &self.host_type)
            .finish_non_exhaustive()
    }
}

/// Table from engine type to mapping entry.
#[derive(Debug, Clone)]
pub struct TypeMappingRegistry {
    /// Entries keyed by engine type, in registration order.
    entries: IndexMap<EngineType, TypeMappingEntry>,
}

impl TypeMappingRegistry {
    /// A registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// The full built-in mapping, freshly allocated.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for engine_type in EngineType::ALL {
            let (host_type, converter) = builtin_mapping(engine_type);
            registry.register(TypeMappingEntry::new(engine_type, host_type, converter));
        }
        registry
    }

    /// The shared built-in registry.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_REGISTRY)
    }

    /// Add an entry, replacing any entry for the same engine type.
    ///
    /// Returns the replaced entry.
    pub fn register(&mut self, entry: TypeMappingEntry) -> Option<TypeMappingEntry> {
        let replaced = self.entries.insert(entry.engine_type, entry);
        if replaced.is_some() {
            tracing::debug!(
                "Replaced mapping for {} (now {})",
                entry.engine_type,
                entry.host_type
            );
        }
        replaced
    }

    /// Builder-style [`TypeMappingRegistry::register`].
    #[must_use]
    pub fn with_entry(mut self, entry: TypeMappingEntry) -> Self {
        self.register(entry);
        self
    }

    /// Look up the entry for an engine type.
    #[inline]
    #[must_use]
    pub fn get(&self, engine_type: EngineType) -> Option<&TypeMappingEntry> {
        self.entries.get(&engine_type)
    }

    /// Look up the entry for an engine type.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::UnsupportedType` if no entry exists.
    pub fn resolve(&self, engine_type: EngineType) -> Result<&TypeMappingEntry, ResultError> {
        self.get(engine_type)
            .ok_or_else(|| ResultError::unsupported(engine_type))
    }

    /// Convert a raw cell through `entry`.
    ///
    /// # Errors
    ///
    /// See [`TypeMappingEntry::convert`].
    pub fn convert(
        &self,
        entry: &TypeMappingEntry,
        raw: &RawCell,
    ) -> Result<HostValue, ConversionFailure> {
        entry.convert(raw)
    }

    /// Default host type for an engine type, if mapped.
    #[must_use]
    pub fn host_type(&self, engine_type: EngineType) -> Option<HostType> {
        self.get(engine_type).map(TypeMappingEntry::host_type)
    }

    /// Iterate over all entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &TypeMappingEntry> {
        self.entries.values()
    }

    /// Number of mapped engine types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no engine type is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMappingRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The built-in host type and converter for each engine type.
fn builtin_mapping(engine_type: EngineType) -> (HostType, Converter) {
    match engine_type {
        EngineType::Boolean => (HostType::Bool, convert::to_bool),
        EngineType::TinyInt => (HostType::I8, convert::to_i8),
        EngineType::SmallInt => (HostType::I16, convert::to_i16),
        EngineType::Int | EngineType::MonthInterval => (HostType::I32, convert::to_i32),
        EngineType::BigInt => (HostType::I64, convert::to_i64),
        EngineType::HugeInt => (HostType::I128, convert::to_i128),
        EngineType::Real => (HostType::F32, convert::to_f32),
        EngineType::Double => (HostType::F64, convert::to_f64),
        EngineType::Decimal => (HostType::Decimal, convert::to_decimal),
        EngineType::Char | EngineType::Varchar | EngineType::Clob => {
            (HostType::Text, convert::to_text)
        }
        EngineType::Blob => (HostType::Bytes, convert::to_bytes),
        EngineType::Date => (HostType::Date, convert::to_date),
        EngineType::Time => (HostType::Time, convert::to_time),
        EngineType::Timestamp => (HostType::Timestamp, convert::to_timestamp),
        EngineType::SecondInterval => (HostType::Duration, convert::to_duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_builtin_covers_every_engine_type() {
        let registry = TypeMappingRegistry::builtin();
        assert_eq!(registry.len(), EngineType::ALL.len());
        for ty in EngineType::ALL {
            assert!(registry.resolve(ty).is_ok(), "{ty} missing");
        }
    }

    #[rstest]
    #[case(EngineType::Int, HostType::I32)]
    #[case(EngineType::MonthInterval, HostType::I32)]
    #[case(EngineType::Varchar, HostType::Text)]
    #[case(EngineType::Clob, HostType::Text)]
    #[case(EngineType::Blob, HostType::Bytes)]
    #[case(EngineType::SecondInterval, HostType::Duration)]
    fn test_builtin_host_types(#[case] engine: EngineType, #[case] host: HostType) {
        assert_eq!(TypeMappingRegistry::shared().host_type(engine), Some(host));
    }

    #[test]
    fn test_resolve_unsupported() {
        let registry = TypeMappingRegistry::empty();
        let err = registry.resolve(EngineType::Int).unwrap_err();
        assert!(matches!(
            err,
            ResultError::UnsupportedType {
                ordinal: None,
                engine_type: EngineType::Int
            }
        ));
    }

    #[test]
    fn test_convert_null_sentinel() {
        let registry = TypeMappingRegistry::builtin();
        let entry = registry.resolve(EngineType::Int).unwrap();
        assert_eq!(
            registry.convert(entry, &RawCell::Int(i32::MIN)),
            Ok(HostValue::Null)
        );
        assert_eq!(registry.convert(entry, &RawCell::Null), Ok(HostValue::Null));
        assert_eq!(registry.convert(entry, &RawCell::Int(5)), Ok(HostValue::I32(5)));
    }

    #[test]
    fn test_foreign_sentinel_is_wrong_kind() {
        let registry = TypeMappingRegistry::builtin();
        let entry = registry.resolve(EngineType::Varchar).unwrap();
        assert_eq!(
            registry.convert(entry, &RawCell::Int(i32::MIN)),
            Err(ConversionFailure::WrongRawKind {
                expected: "text",
                found: "i32"
            })
        );
    }

    #[test]
    fn test_register_replaces() {
        fn shout(raw: &RawCell) -> Result<HostValue, ConversionFailure> {
            match raw {
                RawCell::Text(s) => Ok(HostValue::Text(s.to_uppercase())),
                _ => Err(ConversionFailure::NullInNonNullable),
            }
        }

        let mut registry = TypeMappingRegistry::builtin();
        let replaced =
            registry.register(TypeMappingEntry::new(EngineType::Varchar, HostType::Text, shout));
        assert!(replaced.is_some());

        let entry = registry.resolve(EngineType::Varchar).unwrap();
        assert_eq!(
            entry.convert(&RawCell::Text("abc".into())),
            Ok(HostValue::Text("ABC".into()))
        );
        assert_eq!(registry.len(), EngineType::ALL.len());
    }

    #[test]
    fn test_converter_output_type_checked() {
        fn lying(_: &RawCell) -> Result<HostValue, ConversionFailure> {
            Ok(HostValue::Bool(true))
        }

        let entry = TypeMappingEntry::new(EngineType::Int, HostType::I32, lying);
        assert!(matches!(
            entry.convert(&RawCell::Int(1)),
            Err(ConversionFailure::WrongRawKind { expected: "i32", found: "bool" })
        ));
    }
}
