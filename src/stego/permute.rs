// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Seeded sample permutation.
//!
//! Vertices draw their samples from a Fisher-Yates shuffle of all sample
//! indices, driven by a ChaCha20 PRNG. Both embed and extract replay the
//! identical permutation from the seed alone, so no position table is ever
//! stored in the carrier.
//!
//! # Cross-platform portability
//!
//! The shuffle uses `u32` for `gen_range` (not `usize`) so the permutation
//! is identical on all platforms. `usize` is 32-bit on WASM but 64-bit on
//! native, which makes `rand::Rng::gen_range` consume different amounts of
//! PRNG entropy per step — producing completely different shuffles.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Produce the pseudo-random order in which samples are assigned to
/// vertices.
///
/// The result is a permutation of `0..len`, a deterministic function of
/// `(seed, len)` alone. Callers consume exactly the prefix they need.
pub fn sample_permutation(seed: u64, len: usize) -> Vec<u32> {
    debug_assert!(len <= u32::MAX as usize);
    let mut order: Vec<u32> = (0..len as u32).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        order.swap(i, j);
    }
    order
}
