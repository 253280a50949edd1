// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Reserve matching.
//!
//! Message vertices the in-batch matching could not serve get a second
//! chance against reserve vertices, which carry no chunk of their own and
//! can donate any sample. Each pass takes the next window of up to
//! `vertices_per_matching` still-valid reserves (a cursor advances across
//! passes, so the reserve index stays batch-bounded), discovers cross-set
//! edges, and re-runs the greedy matcher with the leftovers as the
//! demanding side. A matched reserve is consumed whole. Residuals feed the
//! next pass until the pass limit or the reserve pool runs dry.

use crate::stego::error::StegoError;
use crate::stego::params::EngineParams;
use crate::stego::progress;

use super::edges::{find_reserve_edges, EdgeArena};
use super::matching::run_matching;
use super::sample::SampleBuf;
use super::vertex::VertexSet;

/// Run up to `reserve_matching` passes of leftover-vs-reserve matching.
/// Returns the vertices still unserved afterwards.
pub fn match_reserves(
    set: &mut VertexSet,
    samples: &mut SampleBuf,
    mut leftovers: Vec<u32>,
    params: &EngineParams,
) -> Result<Vec<u32>, StegoError> {
    let mut cursor = set.message_count();

    for _ in 0..params.reserve_matching() {
        if leftovers.is_empty() || cursor >= set.len() {
            break;
        }
        progress::check_cancelled()?;

        // Next window of still-valid reserve donors.
        let mut window = Vec::with_capacity(params.vertices_per_matching());
        while cursor < set.len() && window.len() < params.vertices_per_matching() {
            if set.vertices[cursor].is_valid {
                window.push(cursor as u32);
            }
            cursor += 1;
        }
        if window.is_empty() {
            break;
        }

        let mut arena = EdgeArena::default();
        find_reserve_edges(set, samples, &leftovers, &window, params, &mut arena)?;
        leftovers = run_matching(set, samples, &leftovers, &arena, params.mask());

        for &v in &leftovers {
            set.vertices[v as usize].edges.clear();
        }
        for &r in &window {
            set.vertices[r as usize].edges.clear();
        }
    }

    Ok(leftovers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::params::EngineParams;

    fn noise_buf(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 131 + 71) % 256) as u8).collect()
    }

    /// Leftovers that were served by a reserve reach their chunk; the
    /// donating reserves are consumed.
    #[test]
    fn reserves_serve_leftovers() {
        // Wide windows so donors are plentiful; few message vertices so
        // most of the set is reserve.
        let params = EngineParams::default()
            .with_seed(31)
            .with_distance_max(128)
            .with_quantum(32)
            .with_reserve_matching(2);
        let buf = noise_buf(3000); // 1000 samples → 500 vertices
        let mut samples = SampleBuf::from_carrier(&buf, params.mask());
        let chunks: Vec<u8> = (0..40).map(|i| ((i + 1) % 4) as u8).collect();
        let mut set = VertexSet::build(&mut samples, &chunks, &params).unwrap();

        // Skip in-batch matching entirely: every valid message vertex is a
        // leftover.
        let leftovers: Vec<u32> = (0..40u32)
            .filter(|&v| set.vertices[v as usize].is_valid)
            .collect();
        let before = leftovers.len();

        let residual =
            match_reserves(&mut set, &mut samples, leftovers.clone(), &params).unwrap();

        assert!(residual.len() < before, "no leftover was served");
        for &v in &leftovers {
            let v = v as usize;
            if residual.contains(&(v as u32)) {
                assert!(set.vertices[v].is_valid);
                continue;
            }
            assert!(!set.vertices[v].is_valid);
            assert_eq!(set.vertices[v].value, chunks[v], "vertex {v} missed its chunk");
        }

        let consumed_reserves = (set.message_count()..set.len())
            .filter(|&r| !set.vertices[r].is_valid)
            .count();
        assert_eq!(consumed_reserves, before - residual.len());
    }

    #[test]
    fn zero_passes_change_nothing() {
        let params = EngineParams::default().with_seed(8).with_reserve_matching(0);
        let buf = noise_buf(900);
        let mut samples = SampleBuf::from_carrier(&buf, params.mask());
        let chunks = vec![1u8; 20];
        let mut set = VertexSet::build(&mut samples, &chunks, &params).unwrap();

        let leftovers: Vec<u32> = (0..20u32)
            .filter(|&v| set.vertices[v as usize].is_valid)
            .collect();
        let residual =
            match_reserves(&mut set, &mut samples, leftovers.clone(), &params).unwrap();
        assert_eq!(residual, leftovers);
    }
}
