//! The pretrained latent encoder.
//!
//! A character-level autoencoder was trained to reconstruct one-hot SMILES
//! matrices through a narrow bottleneck; this module runs the encoder half
//! at inference. Three 1-D convolution stages slide over the sequence axis,
//! a dense stage compresses the flattened features, and a final projection
//! yields the latent row. Every stage but the last is followed by tanh and
//! an inference-time batch normalization over stored running statistics.
//!
//! Weights arrive as a named-tensor safetensors bundle (see [`schema`] for
//! the format). The bundle is read, checksummed, and validated against the
//! declared topology once; the resulting [`LatentEncoder`] is immutable and
//! cheap to share.

mod model;
mod norm;
mod schema;

#[cfg(test)]
mod tests;

pub use model::LatentEncoder;
pub use norm::InferenceNorm;
pub use schema::{
    conv_output_len, flattened_width, LayerSpec, ENCODER_TOPOLOGY, EPSILON_KEY, FORMAT_KEY,
    FORMAT_VERSION, INPUT_CHANNELS, INPUT_LEN,
};
