//! Helpers for writing encoder weight bundles in tests.

use std::collections::HashMap;
use std::path::Path;

use safetensors::tensor::TensorView;
use safetensors::Dtype;

use crate::autoencoder::{FORMAT_KEY, FORMAT_VERSION};

/// Builds schema-version-1 weight bundles.
///
/// Every tensor starts as zeros of its schema shape; tests poke individual
/// cells (or whole tensors) to craft exact outputs, then write the bundle
/// to a temporary file. With an all-zero bundle the forward pass collapses:
/// zero convolutions and zero normalization scales push zeros through every
/// stage, so the output is exactly `latent.bias`.
pub(crate) struct BundleBuilder {
    tensors: Vec<(String, Vec<usize>, Vec<f32>)>,
    metadata: HashMap<String, String>,
}

impl BundleBuilder {
    /// All schema tensors, zero-filled, for the valid-padding flat width.
    pub(crate) fn schema_v1(hidden: usize, latent: usize) -> Self {
        Self::with_flat_width(940, hidden, latent)
    }

    /// Same, with an explicit flattened width (1200 for same-padding).
    pub(crate) fn with_flat_width(flat: usize, hidden: usize, latent: usize) -> Self {
        let mut builder = Self {
            tensors: Vec::new(),
            metadata: HashMap::from([(FORMAT_KEY.to_string(), FORMAT_VERSION.to_string())]),
        };
        builder.add("conv1.weight", &[9, 35, 9]);
        builder.add("conv1.bias", &[9]);
        builder.add_norm("norm1", 9);
        builder.add("conv2.weight", &[9, 9, 9]);
        builder.add("conv2.bias", &[9]);
        builder.add_norm("norm2", 9);
        builder.add("conv3.weight", &[10, 9, 11]);
        builder.add("conv3.bias", &[10]);
        builder.add_norm("norm3", 10);
        builder.add("dense1.weight", &[hidden, flat]);
        builder.add("dense1.bias", &[hidden]);
        builder.add_norm("norm4", hidden);
        builder.add("latent.weight", &[latent, hidden]);
        builder.add("latent.bias", &[latent]);
        builder
    }

    /// Add a zero tensor of the given shape.
    pub(crate) fn add(&mut self, name: &str, shape: &[usize]) -> &mut Self {
        let len = shape.iter().product();
        self.tensors
            .push((name.to_string(), shape.to_vec(), vec![0.0; len]));
        self
    }

    fn add_norm(&mut self, stage: &str, width: usize) {
        self.add(&format!("{stage}.gamma"), &[width]);
        self.add(&format!("{stage}.beta"), &[width]);
        self.add(&format!("{stage}.running_mean"), &[width]);
        self.add(&format!("{stage}.running_var"), &[width]);
    }

    fn tensor_mut(&mut self, name: &str) -> &mut (String, Vec<usize>, Vec<f32>) {
        self.tensors
            .iter_mut()
            .find(|(n, _, _)| n == name)
            .unwrap_or_else(|| panic!("no tensor named {name} in the builder"))
    }

    /// Set one element by row-major flat index.
    pub(crate) fn set(&mut self, name: &str, flat_index: usize, value: f32) -> &mut Self {
        self.tensor_mut(name).2[flat_index] = value;
        self
    }

    /// Set every element of a tensor.
    pub(crate) fn fill(&mut self, name: &str, value: f32) -> &mut Self {
        self.tensor_mut(name).2.fill(value);
        self
    }

    /// Make a normalization stage the identity under `epsilon`.
    ///
    /// With `gamma = 1` and `running_var = 1 - epsilon` the folded scale is
    /// `1 / sqrt((1 - eps) + eps) = 1` exactly, and zero beta and mean keep
    /// the shift at zero.
    pub(crate) fn passthrough_norm(&mut self, stage: &str, epsilon: f32) -> &mut Self {
        self.fill(&format!("{stage}.gamma"), 1.0);
        self.fill(&format!("{stage}.running_var"), 1.0 - epsilon);
        self
    }

    /// Replace a tensor's shape, zero-filling the new extent.
    pub(crate) fn reshape(&mut self, name: &str, shape: &[usize]) -> &mut Self {
        let entry = self.tensor_mut(name);
        entry.1 = shape.to_vec();
        entry.2 = vec![0.0; shape.iter().product()];
        self
    }

    /// Drop a tensor entirely.
    pub(crate) fn remove(&mut self, name: &str) -> &mut Self {
        self.tensors.retain(|(n, _, _)| n != name);
        self
    }

    /// Set or replace a metadata entry.
    pub(crate) fn metadata(&mut self, key: &str, value: &str) -> &mut Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    /// Drop a metadata entry.
    pub(crate) fn remove_metadata(&mut self, key: &str) -> &mut Self {
        self.metadata.remove(key);
        self
    }

    /// Serialize the bundle to `path`.
    pub(crate) fn write_to(&self, path: &Path) {
        let buffers: Vec<(String, Vec<usize>, Vec<u8>)> = self
            .tensors
            .iter()
            .map(|(name, shape, data)| {
                let bytes = data.iter().flat_map(|v| v.to_le_bytes()).collect();
                (name.clone(), shape.clone(), bytes)
            })
            .collect();
        let views: Vec<(String, TensorView<'_>)> = buffers
            .iter()
            .map(|(name, shape, bytes)| {
                let view = TensorView::new(Dtype::F32, shape.clone(), bytes)
                    .expect("well-formed tensor view");
                (name.clone(), view)
            })
            .collect();
        let payload = safetensors::serialize(views, &Some(self.metadata.clone()))
            .expect("serializable bundle");
        std::fs::write(path, payload).expect("bundle written");
    }
}
