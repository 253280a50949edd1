// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Embedding capacity.
//!
//! Every complete vertex carries `bits_per_vertex` bits, so the gross
//! stream capacity of a carrier is `⌊⌊buffer_len / 3⌋ / s⌋ · b / 8` bytes.
//! The signature and the length field occupy the first 8 of those; the rest
//! is available to the payload.

use crate::carrier::Carrier;

use super::error::StegoError;
use super::message::HEADER_LEN;
use super::params::{EngineParams, BYTES_PER_SAMPLE};

/// Maximum payload (in bytes) that fits a sample buffer of `buffer_len`
/// bytes under the given parameters. This is exact: a payload of this size
/// round-trips, one byte more fails `CarrierTooSmall`.
pub fn bandwidth_for_len(buffer_len: usize, params: &EngineParams) -> usize {
    let vertices = (buffer_len / BYTES_PER_SAMPLE) / params.samples_per_vertex();
    let gross_bytes = vertices * params.bits_per_vertex() as usize / 8;
    gross_bytes.saturating_sub(HEADER_LEN)
}

/// Maximum payload for a carrier.
///
/// # Errors
/// [`StegoError::UnsupportedCarrier`] if the carrier's sample width is not 3.
pub fn compute_bandwidth(
    carrier: &dyn Carrier,
    params: &EngineParams,
) -> Result<usize, StegoError> {
    if carrier.bytes_per_sample() != BYTES_PER_SAMPLE {
        return Err(StegoError::UnsupportedCarrier);
    }
    Ok(bandwidth_for_len(carrier.data().len(), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_formula() {
        // 18 000 bytes → 6 000 samples → 3 000 vertices → 6 000 bits
        // → 750 gross bytes → 742 after the 8-byte header.
        let params = EngineParams::default();
        assert_eq!(bandwidth_for_len(18_000, &params), 742);
    }

    #[test]
    fn incomplete_trailing_units_ignored() {
        let params = EngineParams::default();
        // Two stray bytes never form a sample; one stray sample never forms
        // a vertex.
        assert_eq!(bandwidth_for_len(18_002, &params), 742);
        assert_eq!(bandwidth_for_len(18_003, &params), 742);
        assert_eq!(bandwidth_for_len(18_006, &params), 742);
    }

    #[test]
    fn too_small_clamps_to_zero() {
        let params = EngineParams::default();
        // 36 bytes → 12 samples → 6 vertices → 12 bits → 1 gross byte.
        assert_eq!(bandwidth_for_len(36, &params), 0);
        assert_eq!(bandwidth_for_len(0, &params), 0);
    }

    #[test]
    fn scales_with_bits_per_vertex() {
        let base = EngineParams::default().with_bits_per_vertex(1);
        let quad = EngineParams::default().with_bits_per_vertex(4);
        let len = 48_000;
        let gross_base = bandwidth_for_len(len, &base) + HEADER_LEN;
        let gross_quad = bandwidth_for_len(len, &quad) + HEADER_LEN;
        assert_eq!(gross_quad, gross_base * 4);
    }
}
