// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! The embedding pipeline.
//!
//! One embed call runs strictly sequentially:
//!
//! 1. Frame the payload (signature, length) and pack it into chunks.
//! 2. Carve the carrier into samples and build all vertices under the
//!    seeded permutation; the first N vertices receive the chunks.
//! 3. For each batch of up to `vertices_per_matching` message vertices:
//!    discover edges, run the greedy matcher, collect leftovers. Edges
//!    live only for their batch.
//! 4. Run the bounded reserve-matching passes over the leftovers.
//! 5. Force any still-unmatched vertex onto its chunk by direct
//!    adjustment.
//! 6. Flush all samples back into the carrier buffer.
//!
//! Cancellation leaves the buffer partially modified; callers must discard
//! it (the carrier object, not the engine, owns persistence).

use crate::carrier::Carrier;
use crate::stego::error::StegoError;
use crate::stego::message;
use crate::stego::params::{EngineParams, BYTES_PER_SAMPLE};
use crate::stego::progress;

use super::adjust::adjust_unmatched;
use super::edges::{find_edges, EdgeArena};
use super::matching::run_matching;
use super::reserve::match_reserves;
use super::sample::SampleBuf;
use super::vertex::VertexSet;

/// Outcome counters of one embed call. Purely informational; the embedded
/// stream is identical however its vertices were served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedStats {
    /// Message-bearing vertices (one per chunk).
    pub message_vertices: usize,
    /// Vertices whose initial value already encoded their chunk.
    pub pre_satisfied: usize,
    /// Vertices served by an in-batch sample exchange.
    pub batch_matched: usize,
    /// Vertices served by a reserve donor.
    pub reserve_matched: usize,
    /// Vertices forced by direct adjustment.
    pub adjusted: usize,
}

/// Embed `payload` into the carrier's sample stream.
///
/// # Errors
/// - [`StegoError::UnsupportedCarrier`] if the carrier's sample width is
///   not 3 bytes.
/// - [`StegoError::CarrierTooSmall`] if the framed payload needs more
///   vertices than the carrier provides.
/// - [`StegoError::Cancelled`] at a suspension point after
///   [`progress::cancel`]; the buffer is then partially modified.
pub fn embed(
    carrier: &mut dyn Carrier,
    payload: &[u8],
    params: &EngineParams,
) -> Result<EmbedStats, StegoError> {
    if carrier.bytes_per_sample() != BYTES_PER_SAMPLE {
        return Err(StegoError::UnsupportedCarrier);
    }

    let stream = message::build_stream(payload);
    let chunks = message::pack_chunks(&stream, params.bits_per_vertex());

    let buf = carrier.data_mut();
    let mut samples = SampleBuf::from_carrier(buf, params.mask());
    let mut set = VertexSet::build(&mut samples, &chunks, params)?;

    let n_message = set.message_count();
    let pre_satisfied = (0..n_message)
        .filter(|&v| !set.vertices[v].is_valid)
        .count();

    let vpm = params.vertices_per_matching();
    let n_batches = n_message.div_ceil(vpm);
    progress::init((n_batches as u32 + params.reserve_matching()) * 100);

    let mut leftovers: Vec<u32> = Vec::new();
    let mut batch_start = 0;
    while batch_start < n_message {
        progress::check_cancelled()?;
        let batch = batch_start..(batch_start + vpm).min(n_message);

        let mut arena = EdgeArena::default();
        find_edges(&mut set, &samples, batch.clone(), params, &mut arena)?;

        let candidates: Vec<u32> = batch.clone().map(|v| v as u32).collect();
        let mut batch_left = run_matching(&mut set, &mut samples, &candidates, &arena, params.mask());
        leftovers.append(&mut batch_left);

        set.clear_edges(batch.clone());
        batch_start = batch.end;
    }

    let after_batches = leftovers.len();
    let unmatched = match_reserves(&mut set, &mut samples, leftovers, params)?;
    let adjusted = unmatched.len();

    adjust_unmatched(&mut set, &mut samples, &unmatched, params);

    samples.flush(carrier.data_mut());
    progress::finish();

    Ok(EmbedStats {
        message_vertices: n_message,
        pre_satisfied,
        batch_matched: n_message - pre_satisfied - after_batches,
        reserve_matched: after_batches - adjusted,
        adjusted,
    })
}
