//! Engine type → host type mapping.

mod convert;
mod registry;

pub use convert::Converter;
pub use registry::{TypeMappingEntry, TypeMappingRegistry};
