//! DiaScreen Core
//!
//! Shared types, the error taxonomy, and input validation for the
//! DiaScreen inference gateway.
//!
//! This crate provides:
//! - The screening record and verdict types shared across components
//! - Error types and result handling
//! - The range validator guarding the structured-form entry point

pub mod error;
pub mod types;
pub mod validate;

pub use error::{Error, Result, ValidationError};
pub use types::{ScreeningRecord, Verdict, FEATURE_COUNT};
pub use validate::{validate, ValidatedFeatures};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, ValidationError};
    pub use crate::types::{ScreeningRecord, Verdict, FEATURE_COUNT};
    pub use crate::validate::{validate, ValidatedFeatures};
}
