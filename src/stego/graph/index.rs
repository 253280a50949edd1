// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Spatial index over batch samples.
//!
//! A sparse 5-dimensional grid keyed by (quantised channel triple, current
//! mod value, target mod value). Edge discovery only ever asks for exact
//! cells, so a hash map of lazily created cells gives O(1) expected lookup
//! while empty cells cost nothing — important when the quantum is 1 and the
//! dense grid would have 256³ · mod_factor² slots.
//!
//! Reserve samples are indexed in a separate instance under target slot 0
//! (they carry no target of their own), so the two keyspaces never mix.

use std::collections::HashMap;

use crate::stego::params::BYTES_PER_SAMPLE;

/// Target slot under which reserve samples are filed.
pub const RESERVE_TARGET_SLOT: u8 = 0;

/// A `(vertex_id, sample_slot)` reference into the current batch.
pub type SampleRef = (u32, u8);

/// Sparse 5-D cell grid.
pub struct SpatialIndex {
    cells: HashMap<u32, Vec<SampleRef>>,
    shift: u8,
}

impl SpatialIndex {
    pub fn new(shift: u8) -> Self {
        Self {
            cells: HashMap::new(),
            shift,
        }
    }

    /// Pack a cell coordinate into one key. Quantised channels need at most
    /// 8 bits each; mod and target values at most 4 bits each (mod_factor
    /// is at most 16).
    fn key(&self, q: [u8; BYTES_PER_SAMPLE], mod_value: u8, target: u8) -> u32 {
        debug_assert!(mod_value < 16 && target < 16);
        (q[0] as u32) << 24
            | (q[1] as u32) << 16
            | (q[2] as u32) << 8
            | (mod_value as u32) << 4
            | target as u32
    }

    /// Quantise raw channel bytes to cell coordinates.
    pub fn quantise(&self, values: &[u8; BYTES_PER_SAMPLE]) -> [u8; BYTES_PER_SAMPLE] {
        [
            values[0] >> self.shift,
            values[1] >> self.shift,
            values[2] >> self.shift,
        ]
    }

    /// File a sample reference under its cell.
    pub fn insert(
        &mut self,
        values: &[u8; BYTES_PER_SAMPLE],
        mod_value: u8,
        target: u8,
        sample_ref: SampleRef,
    ) {
        let key = self.key(self.quantise(values), mod_value, target);
        self.cells.entry(key).or_default().push(sample_ref);
    }

    /// All references filed under an exact cell, in insertion order.
    pub fn cell(&self, q: [u8; BYTES_PER_SAMPLE], mod_value: u8, target: u8) -> &[SampleRef] {
        self.cells
            .get(&self.key(q, mod_value, target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[cfg(test)]
    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_exact_cell() {
        let mut idx = SpatialIndex::new(2);
        idx.insert(&[100, 50, 25], 1, 3, (7, 0));
        idx.insert(&[103, 51, 27], 1, 3, (9, 1)); // same quantised cell
        idx.insert(&[104, 50, 25], 1, 3, (11, 0)); // next x cell

        let q = [100 >> 2, 50 >> 2, 25 >> 2];
        assert_eq!(idx.cell(q, 1, 3), &[(7, 0), (9, 1)]);
        assert_eq!(idx.cell([104 >> 2, 50 >> 2, 25 >> 2], 1, 3), &[(11, 0)]);
    }

    #[test]
    fn mod_and_target_separate_cells() {
        let mut idx = SpatialIndex::new(0);
        idx.insert(&[1, 2, 3], 0, 1, (1, 0));
        idx.insert(&[1, 2, 3], 1, 0, (2, 0));
        assert_eq!(idx.cell([1, 2, 3], 0, 1), &[(1, 0)]);
        assert_eq!(idx.cell([1, 2, 3], 1, 0), &[(2, 0)]);
        assert!(idx.cell([1, 2, 3], 0, 0).is_empty());
    }

    #[test]
    fn cells_are_lazy() {
        let mut idx = SpatialIndex::new(0);
        assert_eq!(idx.cell_count(), 0);
        for i in 0..10 {
            idx.insert(&[5, 5, 5], 2, 1, (i, 0));
        }
        assert_eq!(idx.cell_count(), 1);
    }

    #[test]
    fn shift_controls_bucket_width() {
        let mut idx = SpatialIndex::new(5); // quantum 32
        idx.insert(&[0, 0, 0], 0, 1, (1, 0));
        idx.insert(&[31, 31, 31], 0, 1, (2, 0));
        idx.insert(&[32, 0, 0], 0, 1, (3, 0));
        assert_eq!(idx.cell([0, 0, 0], 0, 1), &[(1, 0), (2, 0)]);
        assert_eq!(idx.cell([1, 0, 0], 0, 1), &[(3, 0)]);
    }
}
