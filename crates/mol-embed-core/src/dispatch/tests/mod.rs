//! Routing and row-partition tests.


use tempfile::TempDir;

use crate::config::EmbedConfig;
use crate::dispatch::MoleculeEmbedder;
use crate::testutil::BundleBuilder;

/// An embedder over the default configuration. The weights directory does
/// not exist, which only matters to the autoencoder.
fn embedder() -> MoleculeEmbedder {
    MoleculeEmbedder::new(EmbedConfig::default()).expect("default config is valid")
}

/// An embedder whose weights directory holds the given bundle. The
/// returned guard keeps the directory alive.
fn embedder_with_bundle(builder: &BundleBuilder) -> (TempDir, MoleculeEmbedder) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = EmbedConfig::default();
    config.weights.dir = dir.path().to_path_buf();
    builder.write_to(&config.weights.bundle_path());
    let embedder = MoleculeEmbedder::new(config).expect("config is valid");
    (dir, embedder)
}
