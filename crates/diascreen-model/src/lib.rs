//! DiaScreen Model
//!
//! Artifact acquisition and the Candle-backed screening model.
//!
//! This crate provides:
//! - Artifact sources (local file or remote object-storage URL) and the
//!   one-shot acquisition step run before the gateway starts serving
//! - The loaded model handle (safetensors logistic head)
//! - The predictor shared read-only across requests

pub mod artifact;
pub mod handle;
pub mod predictor;

pub use artifact::{acquire, AcquireOptions, ArtifactSource};
pub use handle::ModelHandle;
pub use predictor::Predictor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifact::{acquire, AcquireOptions, ArtifactSource};
    pub use crate::handle::ModelHandle;
    pub use crate::predictor::Predictor;
}
