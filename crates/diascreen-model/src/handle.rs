//! Loaded model handle backed by a safetensors logistic head

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module};
use diascreen_core::{Error, Result, Verdict};
use std::path::Path;

const WEIGHT_TENSOR: &str = "linear.weight";
const BIAS_TENSOR: &str = "linear.bias";

/// The deserialized, queryable form of a model artifact.
///
/// Holds the trained logistic-regression head. Created once at startup,
/// never mutated afterwards, safe to share read-only across concurrent
/// requests. Inference runs on CPU.
#[derive(Debug)]
pub struct ModelHandle {
    head: Linear,
    device: Device,
    feature_count: usize,
}

impl ModelHandle {
    /// Deserialize a safetensors artifact into a queryable handle.
    ///
    /// The artifact must contain `linear.weight` of shape `(1, N)` and
    /// `linear.bias` of shape `(1)`. Every failure here is an acquisition
    /// error; callers treat it as fatal to startup.
    pub fn load(path: &Path) -> Result<Self> {
        let device = Device::Cpu;

        let tensors = candle_core::safetensors::load(path, &device).map_err(|e| {
            Error::acquisition(format!(
                "failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let weight = tensors
            .get(WEIGHT_TENSOR)
            .ok_or_else(|| {
                Error::acquisition(format!(
                    "artifact {} is missing tensor '{}'",
                    path.display(),
                    WEIGHT_TENSOR
                ))
            })?
            .to_dtype(DType::F32)
            .map_err(|e| Error::acquisition(format!("failed to convert weight tensor: {}", e)))?;

        let bias = tensors
            .get(BIAS_TENSOR)
            .ok_or_else(|| {
                Error::acquisition(format!(
                    "artifact {} is missing tensor '{}'",
                    path.display(),
                    BIAS_TENSOR
                ))
            })?
            .to_dtype(DType::F32)
            .map_err(|e| Error::acquisition(format!("failed to convert bias tensor: {}", e)))?;

        let (out_dim, feature_count) = weight
            .dims2()
            .map_err(|e| Error::acquisition(format!("weight tensor has wrong rank: {}", e)))?;
        if out_dim != 1 {
            return Err(Error::acquisition(format!(
                "expected a single-output classification head, got {} outputs",
                out_dim
            )));
        }

        tracing::debug!(
            "Loaded classification head from {} ({} features)",
            path.display(),
            feature_count
        );

        Ok(Self {
            head: Linear::new(weight, Some(bias)),
            device,
            feature_count,
        })
    }

    /// Number of input features the head was trained on
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Classify a single feature row into a verdict.
    ///
    /// A row whose length differs from the trained feature count is an
    /// inference error, never a panic; no request input can crash the
    /// process through this path.
    pub fn classify(&self, row: &[f64]) -> Result<Verdict> {
        if row.len() != self.feature_count {
            return Err(Error::inference(format!(
                "expected {} features, got {}",
                self.feature_count,
                row.len()
            )));
        }

        let values: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_vec(values, (1, self.feature_count), &self.device)
            .map_err(|e| Error::inference(format!("failed to build input row: {}", e)))?;

        let logits = self
            .head
            .forward(&input)
            .map_err(|e| Error::inference(format!("model forward pass failed: {}", e)))?;

        let raw = logits
            .squeeze(0)
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| Error::inference(format!("failed to read model output: {}", e)))?;

        let logit = raw
            .first()
            .copied()
            .ok_or_else(|| Error::inference("model produced no output"))?;

        let score = 1.0f32 / (1.0f32 + (-logit).exp());
        Ok(Verdict::from_class(if score >= 0.5 { 1 } else { 0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_artifact(dir: &TempDir, weights: &[f32], bias: f32) -> PathBuf {
        let path = dir.path().join("model.safetensors");
        let device = Device::Cpu;
        let weight = Tensor::from_vec(weights.to_vec(), (1, weights.len()), &device).unwrap();
        let bias = Tensor::from_vec(vec![bias], (1,), &device).unwrap();

        let mut tensors = HashMap::new();
        tensors.insert(WEIGHT_TENSOR.to_string(), weight);
        tensors.insert(BIAS_TENSOR.to_string(), bias);
        candle_core::safetensors::save(&tensors, &path).unwrap();
        path
    }

    #[test]
    fn load_discovers_feature_count_from_weights() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, &[0.0; 8], -1.0);

        let handle = ModelHandle::load(&path).unwrap();
        assert_eq!(handle.feature_count(), 8);
    }

    #[test]
    fn bias_decides_when_weights_are_zero() {
        let dir = TempDir::new().unwrap();

        let negative = ModelHandle::load(&write_artifact(&dir, &[0.0; 8], -1.0)).unwrap();
        assert_eq!(negative.classify(&[1.0; 8]).unwrap(), Verdict::Negative);

        let positive = ModelHandle::load(&write_artifact(&dir, &[0.0; 8], 1.0)).unwrap();
        assert_eq!(positive.classify(&[1.0; 8]).unwrap(), Verdict::Positive);
    }

    #[test]
    fn single_weight_flips_verdict_with_sign() {
        let dir = TempDir::new().unwrap();
        let mut weights = [0.0f32; 8];
        weights[0] = 1.0;
        let handle = ModelHandle::load(&write_artifact(&dir, &weights, 0.0)).unwrap();

        let mut row = [0.0f64; 8];
        row[0] = 5.0;
        assert_eq!(handle.classify(&row).unwrap(), Verdict::Positive);

        row[0] = -5.0;
        assert_eq!(handle.classify(&row).unwrap(), Verdict::Negative);
    }

    #[test]
    fn classification_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let weights = [0.1, -0.2, 0.05, 0.0, 0.3, -0.1, 0.7, 0.02];
        let handle = ModelHandle::load(&write_artifact(&dir, &weights, -0.4)).unwrap();

        let row = [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0];
        let first = handle.classify(&row).unwrap();
        for _ in 0..10 {
            assert_eq!(handle.classify(&row).unwrap(), first);
        }
    }

    #[test]
    fn wrong_feature_count_is_an_inference_error() {
        let dir = TempDir::new().unwrap();
        let handle = ModelHandle::load(&write_artifact(&dir, &[0.0; 8], 0.0)).unwrap();

        let err = handle.classify(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert!(err.to_string().contains("expected 8 features, got 3"));
    }

    #[test]
    fn missing_file_is_an_acquisition_error() {
        let err = ModelHandle::load(Path::new("/nonexistent/model.safetensors")).unwrap_err();
        assert!(matches!(err, Error::Acquisition(_)));
    }

    #[test]
    fn missing_bias_tensor_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");
        let weight = Tensor::from_vec(vec![0.0f32; 8], (1, 8), &Device::Cpu).unwrap();
        let mut tensors = HashMap::new();
        tensors.insert(WEIGHT_TENSOR.to_string(), weight);
        candle_core::safetensors::save(&tensors, &path).unwrap();

        let err = ModelHandle::load(&path).unwrap_err();
        assert!(matches!(err, Error::Acquisition(_)));
        assert!(err.to_string().contains(BIAS_TENSOR));
    }

    #[test]
    fn wrong_weight_rank_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");
        let weight = Tensor::from_vec(vec![0.0f32; 8], (8,), &Device::Cpu).unwrap();
        let bias = Tensor::from_vec(vec![0.0f32], (1,), &Device::Cpu).unwrap();
        let mut tensors = HashMap::new();
        tensors.insert(WEIGHT_TENSOR.to_string(), weight);
        tensors.insert(BIAS_TENSOR.to_string(), bias);
        candle_core::safetensors::save(&tensors, &path).unwrap();

        let err = ModelHandle::load(&path).unwrap_err();
        assert!(matches!(err, Error::Acquisition(_)));
    }

    #[test]
    fn multi_output_head_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");
        let weight = Tensor::from_vec(vec![0.0f32; 16], (2, 8), &Device::Cpu).unwrap();
        let bias = Tensor::from_vec(vec![0.0f32; 2], (2,), &Device::Cpu).unwrap();
        let mut tensors = HashMap::new();
        tensors.insert(WEIGHT_TENSOR.to_string(), weight);
        tensors.insert(BIAS_TENSOR.to_string(), bias);
        candle_core::safetensors::save(&tensors, &path).unwrap();

        let err = ModelHandle::load(&path).unwrap_err();
        assert!(err.to_string().contains("single-output"));
    }
}
