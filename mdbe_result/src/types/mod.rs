//! Closed vocabularies shared by the registry and the result table.

mod decimal;
mod engine_type;
mod host;
mod raw;

pub use decimal::{Decimal, MAX_DECIMAL_SCALE};
pub use engine_type::{EngineType, UnknownEngineType};
pub use host::{HostType, HostValue};
pub use raw::RawCell;
