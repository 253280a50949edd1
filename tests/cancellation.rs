// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Cooperative cancellation tests.
//!
//! These live in their own test binary: the cancellation flag is process
//! global, and flipping it here must not race the round-trip suites.

use stegraph_core::stego::graph::edges::{find_edges, EdgeArena};
use stegraph_core::stego::graph::reserve::match_reserves;
use stegraph_core::stego::graph::sample::SampleBuf;
use stegraph_core::stego::graph::vertex::VertexSet;
use stegraph_core::{embed, extract, progress, BmpImage, EngineParams, StegoError};

fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x1234_5678_9ABC_DEF1u64;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

#[test]
fn cancellation_stops_the_engine_loops() {
    let params = EngineParams::default().with_seed(42);
    let buf = noise(1200);
    let mut samples = SampleBuf::from_carrier(&buf, params.mask());
    let chunks: Vec<u8> = (0..100).map(|i| ((i + 1) % 4) as u8).collect();
    let mut set = VertexSet::build(&mut samples, &chunks, &params).unwrap();

    progress::init(0);
    progress::cancel();

    // Edge discovery checks at the top of its vertex loop.
    let mut arena = EdgeArena::default();
    assert!(matches!(
        find_edges(&mut set, &samples, 0..100, &params, &mut arena),
        Err(StegoError::Cancelled)
    ));

    // Reserve matching checks before each pass.
    let leftovers: Vec<u32> = (0..100u32)
        .filter(|&v| set.vertices[v as usize].is_valid)
        .collect();
    assert!(matches!(
        match_reserves(&mut set, &mut samples, leftovers, &params),
        Err(StegoError::Cancelled)
    ));

    // A fresh embed resets the flag and runs to completion.
    let mut carrier = BmpImage::from_pixels(40, 30, noise(40 * 30 * 3)).unwrap();
    embed(&mut carrier, b"after cancel", &params).unwrap();
    assert_eq!(extract(&carrier, &params).unwrap(), b"after cancel");
    assert!(!progress::is_cancelled());
}
