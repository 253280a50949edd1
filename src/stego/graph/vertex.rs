// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Vertex construction.
//!
//! A vertex owns `samples_per_vertex` consecutive draws from the seeded
//! sample permutation. The first N vertices carry the N message chunks; all
//! later vertices are reserves that only lend samples during reserve
//! matching. Every sample of a message vertex receives the same modular
//! delta, so exchanging any single one of them with a partner in the
//! complementary (current, target) class is enough to land the whole vertex
//! on its chunk.

use crate::stego::error::StegoError;
use crate::stego::params::EngineParams;
use crate::stego::permute;

use super::sample::SampleBuf;

/// One vertex of the matching graph.
#[derive(Debug)]
pub struct Vertex {
    /// Cached aggregate: `(Σ sample mod values) AND mask`.
    pub value: u8,
    /// Carries a message chunk (false: reserve).
    pub is_message: bool,
    /// Cleared once the vertex has been consumed by a swap, an adjustment,
    /// or because it already encoded its chunk at construction.
    pub is_valid: bool,
    /// Edge indices into the current batch's arena; cleared between
    /// batches.
    pub edges: Vec<u32>,
}

/// All vertices of one embed call, plus the permuted sample draw order.
pub struct VertexSet {
    pub vertices: Vec<Vertex>,
    /// Permuted sample ids; vertex `i` owns `order[i*s..(i+1)*s]`.
    order: Vec<u32>,
    samples_per_vertex: usize,
    message_count: usize,
}

impl VertexSet {
    /// Draw samples in permutation order, pack them into vertices, and
    /// assign targets for the first `chunks.len()` vertices.
    ///
    /// # Errors
    /// [`StegoError::CarrierTooSmall`] if the message needs more vertices
    /// than the carrier provides.
    pub fn build(
        samples: &mut SampleBuf,
        chunks: &[u8],
        params: &EngineParams,
    ) -> Result<Self, StegoError> {
        let s = params.samples_per_vertex();
        let capacity = samples.len() / s;
        if chunks.len() > capacity {
            return Err(StegoError::CarrierTooSmall);
        }

        let mut order = permute::sample_permutation(params.seed(), samples.len());
        order.truncate(capacity * s);

        let mod_factor = params.mod_factor();
        let mask = params.mask();

        let mut vertices = Vec::with_capacity(capacity);
        for i in 0..capacity {
            let ids = &order[i * s..(i + 1) * s];

            let mut sum = 0u16;
            for &id in ids {
                sum += samples.get(id).mod_value as u16;
            }
            let value = (sum & mask as u16) as u8;

            let is_message = i < chunks.len();
            let mut is_valid = true;
            if is_message {
                let delta = (mod_factor.wrapping_add(chunks[i]).wrapping_sub(value)) & mask;
                if delta == 0 {
                    // Already encodes its chunk; nothing to match or adjust.
                    is_valid = false;
                } else {
                    for &id in ids {
                        let sample = samples.get_mut(id);
                        sample.target = (sample.mod_value + delta) & mask;
                    }
                }
            }

            vertices.push(Vertex {
                value,
                is_message,
                is_valid,
                edges: Vec::new(),
            });
        }

        Ok(Self {
            vertices,
            order,
            samples_per_vertex: s,
            message_count: chunks.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    pub fn samples_per_vertex(&self) -> usize {
        self.samples_per_vertex
    }

    /// Sample ids owned by vertex `v`.
    pub fn sample_ids(&self, v: usize) -> &[u32] {
        &self.order[v * self.samples_per_vertex..(v + 1) * self.samples_per_vertex]
    }

    /// The sample id at slot `slot` of vertex `v`.
    pub fn sample_at(&self, v: usize, slot: usize) -> u32 {
        self.order[v * self.samples_per_vertex + slot]
    }

    /// Recompute and cache a vertex's aggregate mod value.
    pub fn refresh_value(&mut self, v: usize, samples: &SampleBuf, mask: u8) {
        let mut sum = 0u16;
        for &id in &self.order[v * self.samples_per_vertex..(v + 1) * self.samples_per_vertex] {
            sum += samples.get(id).mod_value as u16;
        }
        self.vertices[v].value = (sum & mask as u16) as u8;
    }

    /// Drop all edge references of the given vertex range.
    pub fn clear_edges(&mut self, range: std::ops::Range<usize>) {
        for v in range {
            self.vertices[v].edges.clear();
        }
    }
}
