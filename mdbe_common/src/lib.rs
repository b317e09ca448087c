//! Common configuration and shared types for the MDBE workspace.
//!
//! This crate provides the result-layer configuration (identifier case rules,
//! display and export options) used by `mdbe_result`.

mod config;
mod error;

pub use crate::config::*;
pub use crate::error::ConfigError;
