// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Greedy minimum-weight matching.
//!
//! Vertices are served in ascending order of edge degree, so the vertices
//! with the fewest options choose first — a classical heuristic that keeps
//! scarce partners for the constrained vertices on sparse graphs. Each
//! vertex takes its lightest edge whose partner is still available, the
//! exchange is committed immediately, and both endpoints leave the pool.

use crate::stego::graph::edges::EdgeArena;
use crate::stego::graph::sample::SampleBuf;
use crate::stego::graph::vertex::VertexSet;

/// Match the given vertices against their discovered edges, committing one
/// sample exchange per matched pair.
///
/// Returns the vertices that stayed valid but found no available partner.
/// Both sorts are stable, so the outcome is deterministic for a
/// deterministic edge set.
pub fn run_matching(
    set: &mut VertexSet,
    samples: &mut SampleBuf,
    candidates: &[u32],
    arena: &EdgeArena,
    mask: u8,
) -> Vec<u32> {
    let mut by_degree: Vec<u32> = candidates.to_vec();
    by_degree.sort_by_key(|&v| set.vertices[v as usize].edges.len());

    let mut leftovers = Vec::new();

    for &u in &by_degree {
        if !set.vertices[u as usize].is_valid {
            // Consumed as some earlier vertex's partner.
            continue;
        }

        let mut edge_ids = set.vertices[u as usize].edges.clone();
        edge_ids.sort_by_key(|&e| arena.get(e).weight);

        let mut matched = false;
        for &eid in &edge_ids {
            let (v, slot_u, slot_v) = arena.get(eid).other(u);
            if v == u || !set.vertices[v as usize].is_valid {
                continue;
            }

            let a = set.sample_at(u as usize, slot_u as usize);
            let b = set.sample_at(v as usize, slot_v as usize);
            samples.swap_values(a, b);
            set.refresh_value(u as usize, samples, mask);
            set.refresh_value(v as usize, samples, mask);
            set.vertices[u as usize].is_valid = false;
            set.vertices[v as usize].is_valid = false;
            matched = true;
            break;
        }

        if !matched {
            leftovers.push(u);
        }
    }

    leftovers
}
