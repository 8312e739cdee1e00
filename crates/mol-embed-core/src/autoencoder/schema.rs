//! Declarative encoder topology and the named-tensor bundle schema.
//!
//! The topology is data: [`ENCODER_TOPOLOGY`] lists the stages, the loader
//! walks the list to validate a bundle tensor by tensor, and the executor
//! walks the same list to run the forward pass. Changing the architecture
//! means changing this table, not scattered indexing code.
//!
//! # Bundle schema, version 1
//!
//! A bundle is a safetensors file whose string metadata carries
//! `format = "1"` (mandatory; anything else is rejected at load) and
//! optionally `epsilon`, which overrides the configured normalization
//! epsilon so the constant travels with the weights.
//!
//! Tensor names are `<stage>.<part>`:
//!
//! | stage | parts | shapes |
//! |-------|-------|--------|
//! | `conv1` | `weight`, `bias` | `(9, 35, 9)`, `(9)` |
//! | `norm1` | `gamma`, `beta`, `running_mean`, `running_var` | `(9)` each |
//! | `conv2` | `weight`, `bias` | `(9, 9, 9)`, `(9)` |
//! | `norm2` | `gamma`, `beta`, `running_mean`, `running_var` | `(9)` each |
//! | `conv3` | `weight`, `bias` | `(10, 9, 11)`, `(10)` |
//! | `norm3` | `gamma`, `beta`, `running_mean`, `running_var` | `(10)` each |
//! | `dense1` | `weight`, `bias` | `(H, F)`, `(H)` |
//! | `norm4` | `gamma`, `beta`, `running_mean`, `running_var` | `(H)` each |
//! | `latent` | `weight`, `bias` | `(D, H)`, `(D)` |
//!
//! `H` (hidden width) and `D` (latent width) are read from the bundle's own
//! bias lengths. `F` is the flattened width implied by the configured
//! padding mode: flatten is channel-major, column `c * L + p` holding
//! channel `c` at position `p`, so `F = 10 * 94 = 940` under `Valid`
//! padding and `10 * 120 = 1200` under `Same`.

use crate::config::ConvPadding;

/// Bundle metadata key carrying the schema version.
pub const FORMAT_KEY: &str = "format";

/// The only schema version this build reads. Bundles without it, or with
/// any other value, fail loading; position-indexed legacy exports must be
/// re-exported with named tensors rather than guessed at.
pub const FORMAT_VERSION: &str = "1";

/// Optional metadata key overriding the configured normalization epsilon.
pub const EPSILON_KEY: &str = "epsilon";

/// Sequence length the encoder is trained against.
pub const INPUT_LEN: usize = crate::featurize::MAX_SMILES_LEN;

/// Input channels, one per alphabet symbol.
pub const INPUT_CHANNELS: usize = crate::featurize::CHARSET_SIZE;

/// One stage of the fixed topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSpec {
    /// 1-D convolution to `channels` output channels over a `kernel`-wide
    /// window, then tanh, then the named normalization stage.
    Conv {
        name: &'static str,
        norm: &'static str,
        channels: usize,
        kernel: usize,
    },
    /// Collapse `(channels, length)` into one feature axis, channel-major.
    Flatten,
    /// Dense layer to a bundle-defined width, then tanh, then the named
    /// normalization stage.
    Hidden {
        name: &'static str,
        norm: &'static str,
    },
    /// Final dense projection to the latent width. No activation.
    Latent { name: &'static str },
}

/// The fixed encoder topology.
pub const ENCODER_TOPOLOGY: &[LayerSpec] = &[
    LayerSpec::Conv {
        name: "conv1",
        norm: "norm1",
        channels: 9,
        kernel: 9,
    },
    LayerSpec::Conv {
        name: "conv2",
        norm: "norm2",
        channels: 9,
        kernel: 9,
    },
    LayerSpec::Conv {
        name: "conv3",
        norm: "norm3",
        channels: 10,
        kernel: 11,
    },
    LayerSpec::Flatten,
    LayerSpec::Hidden {
        name: "dense1",
        norm: "norm4",
    },
    LayerSpec::Latent { name: "latent" },
];

/// Sequence length after one conv stage under the given padding mode.
#[must_use]
pub const fn conv_output_len(input: usize, kernel: usize, padding: ConvPadding) -> usize {
    match padding {
        ConvPadding::Valid => input - kernel + 1,
        ConvPadding::Same => input,
    }
}

/// Zero-padding amount that realizes the padding mode for an odd kernel.
#[must_use]
pub(crate) const fn conv_zero_padding(kernel: usize, padding: ConvPadding) -> usize {
    match padding {
        ConvPadding::Valid => 0,
        ConvPadding::Same => kernel / 2,
    }
}

/// Width of the flattened feature vector under `padding`.
#[must_use]
pub fn flattened_width(padding: ConvPadding) -> usize {
    let mut length = INPUT_LEN;
    let mut channels = INPUT_CHANNELS;
    for spec in ENCODER_TOPOLOGY {
        if let LayerSpec::Conv {
            channels: out,
            kernel,
            ..
        } = spec
        {
            length = conv_output_len(length, *kernel, padding);
            channels = *out;
        }
    }
    channels * length
}
