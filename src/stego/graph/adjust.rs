// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Direct adjustment fallback.
//!
//! Vertices that neither the in-batch matching nor the reserve passes could
//! serve are forced onto their chunk by mutating a single channel byte of
//! one of their samples. The modular arithmetic cannot fail, so embedding
//! always produces a carrier that round-trips; the cost is a visible
//! perturbation of up to `mod_factor` per adjusted sample.
//!
//! Which sample and channel take the hit is drawn from a ChaCha20 stream
//! seeded from the permutation seed under a domain-separation constant:
//! uncorrelated with the sample draw order, yet byte-reproducible, so two
//! embeds of the same input produce identical carriers.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::stego::params::{EngineParams, BYTES_PER_SAMPLE};

use super::sample::SampleBuf;
use super::vertex::VertexSet;

/// Domain separation for the adjustment stream ("adjst" tag).
const ADJUST_DOMAIN: u64 = 0x61646a7374;

/// Force every remaining vertex to its target chunk.
pub fn adjust_unmatched(
    set: &mut VertexSet,
    samples: &mut SampleBuf,
    unmatched: &[u32],
    params: &EngineParams,
) {
    let mod_factor = params.mod_factor();
    let mask = params.mask();
    let mut rng = ChaCha20Rng::seed_from_u64(params.seed() ^ ADJUST_DOMAIN);

    for &u in unmatched {
        let slot = rng.gen_range(0..set.samples_per_vertex() as u32) as usize;
        let channel = rng.gen_range(0..BYTES_PER_SAMPLE as u32) as usize;

        let sid = set.sample_at(u as usize, slot);
        let sample = samples.get(sid);
        let diff = (mod_factor - sample.mod_value + sample.target) & mask;

        // Channel arithmetic must not wrap: adding `diff` and subtracting
        // `mod_factor - diff` shift the byte sum by the same residue.
        let old = sample.values[channel];
        let new = if old as u16 + diff as u16 > 255 {
            old - (mod_factor - diff)
        } else {
            old + diff
        };
        samples.set_channel(sid, channel, new);

        set.refresh_value(u as usize, samples, mask);
        set.vertices[u as usize].is_valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::graph::vertex::VertexSet;

    fn run_adjustment(buf: &[u8], chunks: &[u8], params: &EngineParams) -> (VertexSet, SampleBuf) {
        let mut samples = SampleBuf::from_carrier(buf, params.mask());
        let mut set = VertexSet::build(&mut samples, chunks, params).unwrap();
        let unmatched: Vec<u32> = (0..chunks.len() as u32)
            .filter(|&v| set.vertices[v as usize].is_valid)
            .collect();
        adjust_unmatched(&mut set, &mut samples, &unmatched, params);
        (set, samples)
    }

    #[test]
    fn every_vertex_lands_on_its_chunk() {
        let params = EngineParams::default().with_seed(12);
        let buf: Vec<u8> = (0..1200).map(|i| ((i * 37 + 5) % 256) as u8).collect();
        let chunks: Vec<u8> = (0..100).map(|i| ((i * 3 + 1) % 4) as u8).collect();

        let (set, _samples) = run_adjustment(&buf, &chunks, &params);
        for (v, &chunk) in chunks.iter().enumerate() {
            assert_eq!(set.vertices[v].value, chunk, "vertex {v}");
            assert!(!set.vertices[v].is_valid);
        }
    }

    #[test]
    fn saturated_channels_take_the_overflow_branch() {
        // All-0xFF carrier: any additive change overflows, so the
        // subtractive branch must fire and still hit the target residues.
        let params = EngineParams::default().with_seed(12).with_bits_per_vertex(4);
        let buf = vec![0xFFu8; 600];
        let chunks: Vec<u8> = (0..40).map(|i| ((i + 1) % 16) as u8).collect();

        let (set, samples) = run_adjustment(&buf, &chunks, &params);
        for (v, &chunk) in chunks.iter().enumerate() {
            assert_eq!(set.vertices[v].value, chunk);
        }
        let mut flushed = vec![0u8; 600];
        samples.flush(&mut flushed);
        assert!(flushed.iter().all(|&b| b >= 0xFF - 16));
    }

    #[test]
    fn adjustment_is_reproducible() {
        let params = EngineParams::default().with_seed(99);
        let buf: Vec<u8> = (0..900).map(|i| ((i * 89 + 3) % 256) as u8).collect();
        let chunks: Vec<u8> = (0..60).map(|i| ((i + 2) % 4) as u8).collect();

        let (_, samples_a) = run_adjustment(&buf, &chunks, &params);
        let (_, samples_b) = run_adjustment(&buf, &chunks, &params);

        let mut a = vec![0u8; 900];
        let mut b = vec![0u8; 900];
        samples_a.flush(&mut a);
        samples_b.flush(&mut b);
        assert_eq!(a, b);
    }
}
