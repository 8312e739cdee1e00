use std::path::Path;

use super::{load, BundleBuilder, LatentEncoder, ModelLoadError, WeightConfig};
use crate::autoencoder::{EPSILON_KEY, FORMAT_KEY};
use crate::config::ConvPadding;

#[test]
fn missing_bundle_is_bundle_not_found() {
    let config = WeightConfig::default();
    let err = LatentEncoder::load(Path::new("/nonexistent/encoder.safetensors"), &config)
        .unwrap_err();

    assert!(matches!(err, ModelLoadError::BundleNotFound { .. }));
    assert!(err.to_string().contains("/nonexistent/encoder.safetensors"));
}

#[test]
fn garbage_bytes_are_bundle_parse() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("encoder.safetensors");
    std::fs::write(&path, b"definitely not a safetensors file").expect("write");

    let err = LatentEncoder::load(&path, &WeightConfig::default()).unwrap_err();
    assert!(matches!(err, ModelLoadError::BundleParse { .. }));
}

#[test]
fn truncated_bundle_is_bundle_parse() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("encoder.safetensors");
    BundleBuilder::schema_v1(4, 2).write_to(&path);

    let bytes = std::fs::read(&path).expect("read back");
    std::fs::write(&path, &bytes[..32]).expect("truncate");

    let err = LatentEncoder::load(&path, &WeightConfig::default()).unwrap_err();
    assert!(matches!(err, ModelLoadError::BundleParse { .. }));
}

#[test]
fn missing_format_metadata_is_unsupported() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.remove_metadata(FORMAT_KEY);

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    match err {
        ModelLoadError::UnsupportedFormat { found, .. } => assert_eq!(found, "missing"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn wrong_format_version_is_unsupported() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.metadata(FORMAT_KEY, "2");

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    match err {
        ModelLoadError::UnsupportedFormat { found, .. } => assert_eq!(found, "2"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn missing_tensor_is_reported_by_name() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.remove("latent.bias");

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    match err {
        ModelLoadError::TensorMissing { name, .. } => assert_eq!(name, "latent.bias"),
        other => panic!("expected TensorMissing, got {other:?}"),
    }
}

#[test]
fn wrong_shape_reports_expected_and_actual() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.reshape("conv1.weight", &[9, 35, 7]);

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    match err {
        ModelLoadError::ShapeMismatch {
            name,
            expected,
            actual,
        } => {
            assert_eq!(name, "conv1.weight");
            assert_eq!(expected, vec![9, 35, 9]);
            assert_eq!(actual, vec![9, 35, 7]);
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn dense_width_must_match_the_padding_mode() {
    // A same-padding export (flat width 1200) under valid-padding config.
    let builder = BundleBuilder::with_flat_width(1200, 4, 2);

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    match err {
        ModelLoadError::ShapeMismatch {
            name,
            expected,
            actual,
        } => {
            assert_eq!(name, "dense1.weight");
            assert_eq!(expected, vec![4, 940]);
            assert_eq!(actual, vec![4, 1200]);
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn same_padding_accepts_the_wider_dense_stage() {
    let builder = BundleBuilder::with_flat_width(1200, 4, 2);
    let config = WeightConfig {
        padding: ConvPadding::Same,
        ..WeightConfig::default()
    };

    let encoder = load(&builder, &config).expect("same-padding bundle loads");
    assert_eq!(encoder.hidden_dim(), 4);
    assert_eq!(encoder.latent_dim(), 2);
}

#[test]
fn epsilon_metadata_must_be_numeric() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.metadata(EPSILON_KEY, "abc");

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    assert!(matches!(err, ModelLoadError::BundleParse { .. }));
    assert!(err.to_string().contains("epsilon"));
}

#[test]
fn epsilon_metadata_must_be_positive() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.metadata(EPSILON_KEY, "-0.001");

    let err = load(&builder, &WeightConfig::default()).unwrap_err();
    assert!(matches!(err, ModelLoadError::BundleParse { .. }));
}

#[test]
fn tensors_outside_the_schema_are_ignored() {
    let mut builder = BundleBuilder::schema_v1(4, 2);
    builder.add("decoder1.weight", &[35, 10, 9]);

    let encoder = load(&builder, &WeightConfig::default()).expect("extra tensors ignored");
    assert_eq!(encoder.latent_dim(), 2);
}

#[test]
fn widths_come_from_the_bundle() {
    let encoder = load(&BundleBuilder::schema_v1(7, 3), &WeightConfig::default())
        .expect("bundle loads");

    assert_eq!(encoder.hidden_dim(), 7);
    assert_eq!(encoder.latent_dim(), 3);
}

#[test]
fn loaded_model_is_debug_printable() {
    // Failed assertions render the model, folded stages included.
    let encoder = load(&BundleBuilder::schema_v1(4, 2), &WeightConfig::default())
        .expect("bundle loads");

    let rendered = format!("{encoder:?}");
    assert!(rendered.contains("LatentEncoder"));
    assert!(rendered.contains("latent_dim: 2"));
}
