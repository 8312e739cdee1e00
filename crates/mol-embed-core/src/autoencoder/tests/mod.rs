//! Bundle loading and forward-pass tests.

mod forward;
mod loader;

use crate::config::WeightConfig;
use crate::error::ModelLoadError;
use crate::testutil::BundleBuilder;

use super::LatentEncoder;

/// Write the bundle to a fresh temporary file and load it.
fn load(builder: &BundleBuilder, config: &WeightConfig) -> Result<LatentEncoder, ModelLoadError> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("encoder.safetensors");
    builder.write_to(&path);
    LatentEncoder::load(&path, config)
}
