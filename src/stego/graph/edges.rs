// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Edge discovery.
//!
//! For each sample of each batch vertex, candidate exchange partners are
//! looked up in the quantised colour neighbourhood. A usable partner holds
//! the complementary modular pair — its current value is our target and its
//! target is our current value — so one exchange advances both vertices to
//! their chunks. Edge weight is the squared colour distance between the two
//! samples; per-channel distances above `distance_max` invalidate the edge,
//! which also keeps the weight within u16 (3 · 128² = 49 152).
//!
//! Duplicate suppression works without any set structure. The window is
//! scanned in two passes:
//!
//! 1. the home cell column `(x₀, y₀, z ∈ window)`, accepting only
//!    candidates with `vertex_id > u`;
//! 2. the remaining window, x strictly upward (`x ≥ x₀`, and for `x == x₀`
//!    only `y > y₀`), y and z symmetric.
//!
//! A partner in a higher x cell is only ever seen from the lower side; ties
//! fall through to the y order and finally to the vertex id filter, so each
//! unordered edge is emitted exactly once and registered on both endpoints.

use std::ops::Range;

use crate::stego::error::StegoError;
use crate::stego::params::{EngineParams, BYTES_PER_SAMPLE};
use crate::stego::progress;

use super::index::{SpatialIndex, RESERVE_TARGET_SLOT};
use super::sample::SampleBuf;
use super::vertex::VertexSet;

/// Progress ticks per edge-finding pass.
const PROGRESS_TICKS: usize = 100;

/// A potential sample exchange between two vertices.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    /// Sample slot within vertex `a` / vertex `b`.
    pub slot_a: u8,
    pub slot_b: u8,
    /// Squared Euclidean colour distance between the two samples.
    pub weight: u16,
}

impl Edge {
    /// The endpoint of this edge that is not `v`, with the slots oriented
    /// as (v's slot, other's slot).
    pub fn other(&self, v: u32) -> (u32, u8, u8) {
        if self.a == v {
            (self.b, self.slot_a, self.slot_b)
        } else {
            (self.a, self.slot_b, self.slot_a)
        }
    }
}

/// Batch-owned edge storage. Vertices reference edges by index, so the
/// whole graph is freed in one go when the batch ends.
#[derive(Default)]
pub struct EdgeArena {
    pub edges: Vec<Edge>,
}

impl EdgeArena {
    pub fn get(&self, id: u32) -> &Edge {
        &self.edges[id as usize]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Squared colour distance, or `None` when any channel exceeds `d_max`.
fn edge_weight(
    a: &[u8; BYTES_PER_SAMPLE],
    b: &[u8; BYTES_PER_SAMPLE],
    d_max: u8,
) -> Option<u16> {
    let mut weight = 0u32;
    for c in 0..BYTES_PER_SAMPLE {
        let diff = (a[c] as i32 - b[c] as i32).unsigned_abs();
        if diff > d_max as u32 {
            return None;
        }
        weight += diff * diff;
    }
    Some(weight as u16)
}

/// Discover all exchange edges within one batch of message vertices.
///
/// Every edge is registered on both endpoints' edge lists exactly once.
/// Cancellation is checked at the top of the outer vertex loop.
pub fn find_edges(
    set: &mut VertexSet,
    samples: &SampleBuf,
    batch: Range<usize>,
    params: &EngineParams,
    arena: &mut EdgeArena,
) -> Result<(), StegoError> {
    let shift = params.precision_shift();
    let mut index = SpatialIndex::new(shift);
    for u in batch.clone() {
        if !set.vertices[u].is_valid {
            continue;
        }
        for slot in 0..set.samples_per_vertex() {
            let sid = set.sample_at(u, slot);
            let s = samples.get(sid);
            index.insert(&s.values, s.mod_value, s.target, (u as u32, slot as u8));
        }
    }

    let dim_max = (255u8 >> shift) as i32;
    let max_delta = (params.distance_max() >> shift) as i32;
    let d_max = params.distance_max();
    let tick_every = (batch.len() / PROGRESS_TICKS).max(1);

    for (n, u) in batch.clone().enumerate() {
        progress::check_cancelled()?;
        if n % tick_every == 0 {
            progress::advance();
        }
        if !set.vertices[u].is_valid {
            continue;
        }
        let u_id = u as u32;

        for slot in 0..set.samples_per_vertex() {
            let sid = set.sample_at(u, slot);
            let (values, want_mod, want_target) = {
                let s = samples.get(sid);
                // The partner must sit where we need to go, and need to go
                // where we sit.
                (s.values, s.target, s.mod_value)
            };

            let q = index.quantise(&values);
            let (x0, y0, z0) = (q[0] as i32, q[1] as i32, q[2] as i32);
            let x_hi = (x0 + max_delta).min(dim_max);
            let y_lo = (y0 - max_delta).max(0);
            let y_hi = (y0 + max_delta).min(dim_max);
            let z_lo = (z0 - max_delta).max(0);
            let z_hi = (z0 + max_delta).min(dim_max);

            // Pass 1: the home (x₀, y₀) column. Within it the scan is
            // fully symmetric from both endpoints, so the vertex id breaks
            // the tie.
            for z in z_lo..=z_hi {
                for &(v, k) in index.cell([x0 as u8, y0 as u8, z as u8], want_mod, want_target) {
                    if v <= u_id {
                        continue;
                    }
                    push_edge(set, samples, arena, u_id, slot as u8, v, k, d_max);
                }
            }

            // Pass 2: the rest of the window, x upward only; at x₀ only
            // rows above y₀. The lower-cell endpoint is the sole emitter.
            for x in x0..=x_hi {
                for y in y_lo..=y_hi {
                    if x == x0 && y <= y0 {
                        continue;
                    }
                    for z in z_lo..=z_hi {
                        for &(v, k) in index.cell([x as u8, y as u8, z as u8], want_mod, want_target)
                        {
                            if v == u_id {
                                continue;
                            }
                            push_edge(set, samples, arena, u_id, slot as u8, v, k, d_max);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Discover edges from leftover message vertices to reserve donors.
///
/// Cross-set queries: the window is symmetric on every axis and no
/// duplicate suppression is needed — only leftovers scan, only reserves are
/// indexed. A reserve donor qualifies when its current mod value equals the
/// leftover sample's target; it has no target of its own to satisfy.
pub fn find_reserve_edges(
    set: &mut VertexSet,
    samples: &SampleBuf,
    leftovers: &[u32],
    reserves: &[u32],
    params: &EngineParams,
    arena: &mut EdgeArena,
) -> Result<(), StegoError> {
    let shift = params.precision_shift();
    let mut index = SpatialIndex::new(shift);
    for &r in reserves {
        for slot in 0..set.samples_per_vertex() {
            let sid = set.sample_at(r as usize, slot);
            let s = samples.get(sid);
            index.insert(&s.values, s.mod_value, RESERVE_TARGET_SLOT, (r, slot as u8));
        }
    }

    let dim_max = (255u8 >> shift) as i32;
    let max_delta = (params.distance_max() >> shift) as i32;
    let d_max = params.distance_max();
    let tick_every = (leftovers.len() / PROGRESS_TICKS).max(1);

    for (n, &u) in leftovers.iter().enumerate() {
        progress::check_cancelled()?;
        if n % tick_every == 0 {
            progress::advance();
        }
        if !set.vertices[u as usize].is_valid {
            continue;
        }

        for slot in 0..set.samples_per_vertex() {
            let sid = set.sample_at(u as usize, slot);
            let (values, want_mod) = {
                let s = samples.get(sid);
                (s.values, s.target)
            };

            let q = index.quantise(&values);
            let (x0, y0, z0) = (q[0] as i32, q[1] as i32, q[2] as i32);
            let x_lo = (x0 - max_delta).max(0);
            let x_hi = (x0 + max_delta).min(dim_max);
            let y_lo = (y0 - max_delta).max(0);
            let y_hi = (y0 + max_delta).min(dim_max);
            let z_lo = (z0 - max_delta).max(0);
            let z_hi = (z0 + max_delta).min(dim_max);

            for x in x_lo..=x_hi {
                for y in y_lo..=y_hi {
                    for z in z_lo..=z_hi {
                        for &(v, k) in
                            index.cell([x as u8, y as u8, z as u8], want_mod, RESERVE_TARGET_SLOT)
                        {
                            push_edge(set, samples, arena, u, slot as u8, v, k, d_max);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn push_edge(
    set: &mut VertexSet,
    samples: &SampleBuf,
    arena: &mut EdgeArena,
    a: u32,
    slot_a: u8,
    b: u32,
    slot_b: u8,
    d_max: u8,
) {
    let sa = samples.get(set.sample_at(a as usize, slot_a as usize));
    let sb = samples.get(set.sample_at(b as usize, slot_b as usize));
    let Some(weight) = edge_weight(&sa.values, &sb.values, d_max) else {
        return;
    };

    let id = arena.edges.len() as u32;
    arena.edges.push(Edge {
        a,
        b,
        slot_a,
        slot_b,
        weight,
    });
    set.vertices[a as usize].edges.push(id);
    set.vertices[b as usize].edges.push(id);
}
