// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Engine configuration.
//!
//! All tuning knobs of the graph engine live in [`EngineParams`]. Values are
//! clamped once, in the `with_*` constructors, so the rest of the engine can
//! rely on the documented ranges without re-checking. Parameters are plain
//! instance state; two engines with different parameters can run in the same
//! process (the progress channel is the only global).

/// Number of carrier bytes per sample. The matching algorithm only works
/// over 3-byte samples; other carrier shapes are rejected up front.
pub const BYTES_PER_SAMPLE: usize = 3;

/// Engine parameters.
///
/// Obtain via [`EngineParams::default`] or one of the presets, then refine
/// with the `with_*` methods:
///
/// ```
/// use stegraph_core::EngineParams;
///
/// let params = EngineParams::default().with_seed(7).with_quantum(8);
/// assert_eq!(params.quantum(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineParams {
    samples_per_vertex: u32,
    bits_per_vertex: u32,
    distance_max: u8,
    precision_exp: u8,
    vertices_per_matching: usize,
    reserve_matching: u32,
    seed: u64,
}

impl Default for EngineParams {
    /// The balanced default preset: s=2, b=2, D=8, quantum=4, 50 000
    /// vertices per matching batch, one reserve pass.
    fn default() -> Self {
        Self {
            samples_per_vertex: 2,
            bits_per_vertex: 2,
            distance_max: 8,
            precision_exp: 2,
            vertices_per_matching: 50_000,
            reserve_matching: 1,
            seed: 42,
        }
    }
}

impl EngineParams {
    /// Preset favouring low visual impact: single-bit chunks, tight colour
    /// windows at full precision, and more reserve passes to keep the
    /// number of forced adjustments down.
    pub fn imperceptibility() -> Self {
        Self {
            samples_per_vertex: 2,
            bits_per_vertex: 1,
            distance_max: 4,
            precision_exp: 0,
            vertices_per_matching: 50_000,
            reserve_matching: 4,
            seed: 42,
        }
    }

    /// Preset favouring throughput and capacity: one sample per vertex,
    /// 4-bit chunks, coarse cells, large batches.
    pub fn performance() -> Self {
        Self {
            samples_per_vertex: 1,
            bits_per_vertex: 4,
            distance_max: 32,
            precision_exp: 3,
            vertices_per_matching: 150_000,
            reserve_matching: 1,
            seed: 42,
        }
    }

    /// Number of samples aggregated per vertex, clamped to 1..=4.
    pub fn with_samples_per_vertex(mut self, s: u32) -> Self {
        self.samples_per_vertex = s.clamp(1, 4);
        self
    }

    /// Payload bits per vertex, snapped down to a power of two in {1, 2, 4}.
    pub fn with_bits_per_vertex(mut self, b: u32) -> Self {
        self.bits_per_vertex = if b >= 4 {
            4
        } else if b >= 2 {
            2
        } else {
            1
        };
        self
    }

    /// Maximum per-channel Chebyshev distance for a valid edge, clamped to
    /// 2..=128.
    pub fn with_distance_max(mut self, d: u8) -> Self {
        self.distance_max = d.clamp(2, 128);
        self
    }

    /// Colour quantisation step, snapped down to a power of two in
    /// {1, 2, 4, 8, 16, 32}. Internally the exponent is stored; the raw
    /// exponent is never exposed.
    pub fn with_quantum(mut self, q: u8) -> Self {
        let q = q.clamp(1, 32);
        self.precision_exp = (q.ilog2()) as u8;
        self
    }

    /// Batch size for the matching loop, at least 10 000.
    pub fn with_vertices_per_matching(mut self, v: usize) -> Self {
        self.vertices_per_matching = v.max(10_000);
        self
    }

    /// Maximum number of reserve-matching passes, clamped to 0..=8.
    pub fn with_reserve_matching(mut self, passes: u32) -> Self {
        self.reserve_matching = passes.min(8);
        self
    }

    /// Seed of the pseudo-random sample permutation. Embed and extract must
    /// use the same value.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn samples_per_vertex(&self) -> usize {
        self.samples_per_vertex as usize
    }

    pub fn bits_per_vertex(&self) -> u32 {
        self.bits_per_vertex
    }

    /// `2^bits_per_vertex`, the modulus of all chunk arithmetic.
    pub fn mod_factor(&self) -> u8 {
        1 << self.bits_per_vertex
    }

    /// `mod_factor - 1`; modular reduction is a bitwise AND with this mask.
    pub fn mask(&self) -> u8 {
        self.mod_factor() - 1
    }

    pub fn distance_max(&self) -> u8 {
        self.distance_max
    }

    /// The colour quantisation step (`1 << stored exponent`).
    pub fn quantum(&self) -> u8 {
        1 << self.precision_exp
    }

    /// Right-shift applied to channel values and `distance_max` when
    /// bucketising colours.
    pub(crate) fn precision_shift(&self) -> u8 {
        self.precision_exp
    }

    pub fn vertices_per_matching(&self) -> usize {
        self.vertices_per_matching
    }

    pub fn reserve_matching(&self) -> u32 {
        self.reserve_matching
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
