use super::{load, BundleBuilder, WeightConfig};
use crate::autoencoder::EPSILON_KEY;
use crate::config::ConvPadding;
use crate::featurize::{charset_index, onehot_smiles, vectorize_smiles, MAX_SMILES_LEN};

/// A bundle whose latent output is the count of `C` symbols in the first
/// window, squashed by the four tanh stages.
///
/// conv1 channel 0 sums the one-hot `C` column across its 9-wide window;
/// conv2, conv3, dense1 and latent each forward feature 0 through a single
/// unit tap; every normalization stage is the identity.
fn c_counting_bundle(epsilon: f32) -> BundleBuilder {
    let c_col = charset_index('C').expect("charset has C");
    let mut builder = BundleBuilder::schema_v1(3, 2);
    for k in 0..9 {
        // conv1.weight is (out 9, in 35, kernel 9); out 0, in = the C column.
        builder.set("conv1.weight", c_col * 9 + k, 1.0);
    }
    builder.passthrough_norm("norm1", epsilon);
    builder.set("conv2.weight", 0, 1.0);
    builder.passthrough_norm("norm2", epsilon);
    builder.set("conv3.weight", 0, 1.0);
    builder.passthrough_norm("norm3", epsilon);
    builder.set("dense1.weight", 0, 1.0);
    builder.passthrough_norm("norm4", epsilon);
    builder.set("latent.weight", 0, 1.0);
    builder
}

fn squash(x: f32) -> f32 {
    x.tanh().tanh().tanh().tanh()
}

#[test]
fn zero_bundle_outputs_exactly_the_latent_bias() {
    let mut builder = BundleBuilder::schema_v1(4, 3);
    builder
        .set("latent.bias", 0, 0.25)
        .set("latent.bias", 1, -1.5)
        .set("latent.bias", 2, 3.0);
    let encoder = load(&builder, &WeightConfig::default()).expect("bundle loads");

    // Chemistry never matters here: any string one-hots and encodes.
    let batch = onehot_smiles(&["CCO", "not smiles at all", ""], MAX_SMILES_LEN);
    let rows = encoder.predict(&batch).expect("predict");

    assert_eq!(rows, vec![vec![0.25, -1.5, 3.0]; 3]);
}

#[test]
fn convolution_counts_symbols_in_the_window() {
    let config = WeightConfig::default();
    let encoder = load(&c_counting_bundle(config.epsilon as f32), &config).expect("bundle loads");

    let batch = onehot_smiles(&["CCC", "OOO"], MAX_SMILES_LEN);
    let rows = encoder.predict(&batch).expect("predict");

    // Three C symbols in the first window.
    assert!((rows[0][0] - squash(3.0)).abs() < 1e-6);
    // Latent unit 1 has no tap anywhere.
    assert_eq!(rows[0][1], 0.0);
    // No C symbols at all: zeros ride through every stage.
    assert_eq!(rows[1], vec![0.0, 0.0]);
}

#[test]
fn rows_follow_batch_order() {
    let config = WeightConfig::default();
    let encoder = load(&c_counting_bundle(config.epsilon as f32), &config).expect("bundle loads");

    let batch = onehot_smiles(&["CCCCCCCCC", "C", "OOO"], MAX_SMILES_LEN);
    let rows = encoder.predict(&batch).expect("predict");

    assert_eq!(rows.len(), 3);
    assert!(rows[0][0] > rows[1][0]);
    assert!(rows[1][0] > rows[2][0]);
    assert_eq!(rows[2][0], 0.0);
}

#[test]
fn single_prediction_matches_its_batch_row() {
    let config = WeightConfig::default();
    let encoder = load(&c_counting_bundle(config.epsilon as f32), &config).expect("bundle loads");

    let batch = onehot_smiles(&["CCO", "CCC"], MAX_SMILES_LEN);
    let rows = encoder.predict(&batch).expect("predict");
    let single = encoder
        .predict_one(&vectorize_smiles("CCC", MAX_SMILES_LEN))
        .expect("predict_one");

    // Normalization uses stored statistics, so batch company cannot leak in.
    assert_eq!(single, rows[1]);
}

#[test]
fn empty_batch_returns_no_rows() {
    let encoder =
        load(&BundleBuilder::schema_v1(2, 2), &WeightConfig::default()).expect("bundle loads");

    let inputs: [&str; 0] = [];
    let rows = encoder
        .predict(&onehot_smiles(&inputs, MAX_SMILES_LEN))
        .expect("predict");
    assert!(rows.is_empty());
}

#[test]
fn epsilon_override_travels_with_the_bundle() {
    let config = WeightConfig::default();
    let standard = load(&c_counting_bundle(config.epsilon as f32), &config).expect("loads");

    // Identity norms under epsilon 0.25, declared in the bundle metadata.
    // If the declaration were ignored the configured epsilon would break
    // the identity and inflate every stage.
    let mut declared = c_counting_bundle(0.25);
    declared.metadata(EPSILON_KEY, "0.25");
    let overridden = load(&declared, &config).expect("loads");

    let batch = onehot_smiles(&["CCC", "CCO"], MAX_SMILES_LEN);
    let expected = standard.predict(&batch).expect("predict");
    let actual = overridden.predict(&batch).expect("predict");
    assert_eq!(actual, expected);
}

#[test]
fn flatten_is_channel_major() {
    let config = WeightConfig::default();
    let mut builder = c_counting_bundle(config.epsilon as f32);
    // Route the signal through conv3 output channel 9 instead of 0:
    // (out 9, in 0, tap 0) of the (10, 9, 11) kernel.
    builder.set("conv3.weight", 0, 0.0);
    builder.set("conv3.weight", 9 * 9 * 11, 1.0);
    // Channel-major flatten puts (channel 9, position 0) at column 9 * 94.
    builder.set("dense1.weight", 0, 0.0);
    builder.set("dense1.weight", 9 * 94, 1.0);
    let encoder = load(&builder, &config).expect("bundle loads");

    let batch = onehot_smiles(&["CCC"], MAX_SMILES_LEN);
    let rows = encoder.predict(&batch).expect("predict");
    assert!((rows[0][0] - squash(3.0)).abs() < 1e-6);
}

#[test]
fn same_padding_runs_end_to_end() {
    let mut builder = BundleBuilder::with_flat_width(1200, 3, 2);
    builder.set("latent.bias", 0, 1.0);
    let config = WeightConfig {
        padding: ConvPadding::Same,
        ..WeightConfig::default()
    };
    let encoder = load(&builder, &config).expect("bundle loads");

    let rows = encoder
        .predict(&onehot_smiles(&["CCO"], MAX_SMILES_LEN))
        .expect("predict");
    assert_eq!(rows, vec![vec![1.0, 0.0]]);
}
