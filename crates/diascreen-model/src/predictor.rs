//! The prediction service shared across request handlers

use crate::handle::ModelHandle;
use diascreen_core::{Result, ValidatedFeatures, Verdict};
use std::time::Instant;

/// Owns the loaded model handle and serves classification requests.
///
/// The gateway wraps one `Predictor` in an `Arc` and every handler reads
/// through it concurrently; there is no interior mutability anywhere on
/// the inference path.
pub struct Predictor {
    handle: ModelHandle,
}

impl Predictor {
    /// Wrap a loaded handle
    pub fn new(handle: ModelHandle) -> Self {
        Self { handle }
    }

    /// Number of features the underlying model expects
    pub fn feature_count(&self) -> usize {
        self.handle.feature_count()
    }

    /// Classify a range-validated screening record
    pub fn screen(&self, features: &ValidatedFeatures) -> Result<Verdict> {
        self.classify(features.row())
    }

    /// Classify a raw feature row from the JSON entry point.
    ///
    /// No range validation applies on this path; a row of the wrong
    /// length surfaces as an inference error.
    pub fn predict_row(&self, row: &[f64]) -> Result<Verdict> {
        self.classify(row)
    }

    fn classify(&self, row: &[f64]) -> Result<Verdict> {
        let start = Instant::now();
        let verdict = self.handle.classify(row)?;
        metrics::histogram!("diascreen_inference_latency_us")
            .record(start.elapsed().as_micros() as f64);
        Ok(verdict)
    }
}
