//! Inference-time batch normalization over stored running statistics.

use candle_core::Tensor;

use crate::error::ModelLoadError;

/// A normalization stage folded for inference.
///
/// Training keeps running estimates of per-feature mean and variance; at
/// inference those stored statistics are the only ones consulted, so the
/// output for one row never depends on what else is in the batch. The
/// affine form `gamma * (x - mean) / sqrt(var + eps) + beta` folds into a
/// per-feature `scale` and `shift` computed once at load:
///
/// ```text
/// scale = gamma / sqrt(running_var + eps)
/// shift = beta - running_mean * scale
/// ```
#[derive(Debug, Clone)]
pub struct InferenceNorm {
    scale: Tensor,
    shift: Tensor,
    width: usize,
}

impl InferenceNorm {
    /// Fold the four stored tensors into scale and shift.
    ///
    /// All four must be rank-1 of equal length; the loader checks shapes
    /// against the topology before calling this.
    pub fn fold(
        gamma: &Tensor,
        beta: &Tensor,
        running_mean: &Tensor,
        running_var: &Tensor,
        epsilon: f64,
    ) -> Result<Self, ModelLoadError> {
        let width = running_var.dims1()?;
        let denom = running_var.affine(1.0, epsilon)?.sqrt()?;
        let scale = gamma.broadcast_div(&denom)?;
        let shift = beta.broadcast_sub(&running_mean.broadcast_mul(&scale)?)?;
        Ok(Self {
            scale,
            shift,
            width,
        })
    }

    /// Apply along the channel axis of a `(batch, channels, length)` tensor.
    pub fn forward_channels(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let scale = self.scale.reshape((1, self.width, 1))?;
        let shift = self.shift.reshape((1, self.width, 1))?;
        x.broadcast_mul(&scale)?.broadcast_add(&shift)
    }

    /// Apply along the feature axis of a `(batch, features)` tensor.
    pub fn forward_features(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        x.broadcast_mul(&self.scale)?.broadcast_add(&self.shift)
    }

    /// Number of normalized features.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }
}
