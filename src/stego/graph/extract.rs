// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Extraction.
//!
//! No graph work: replay the seeded permutation, group the drawn samples
//! into vertices, and read each vertex's modular byte-sum — the low
//! `bits_per_vertex` bits are one chunk. The signature vertices come
//! first, then the length field, then exactly the declared payload.

use crate::carrier::Carrier;
use crate::stego::error::StegoError;
use crate::stego::message::{self, HEADER_LEN, SIGNATURE};
use crate::stego::params::{EngineParams, BYTES_PER_SAMPLE};
use crate::stego::permute;

/// Reads successive chunks by advancing through the permuted sample order.
struct ChunkReader<'a> {
    buf: &'a [u8],
    order: Vec<u32>,
    samples_per_vertex: usize,
    mask: u8,
    next_vertex: usize,
    vertex_count: usize,
}

impl<'a> ChunkReader<'a> {
    fn new(buf: &'a [u8], params: &EngineParams) -> Self {
        let sample_count = buf.len() / BYTES_PER_SAMPLE;
        let samples_per_vertex = params.samples_per_vertex();
        Self {
            buf,
            order: permute::sample_permutation(params.seed(), sample_count),
            samples_per_vertex,
            mask: params.mask(),
            next_vertex: 0,
            vertex_count: sample_count / samples_per_vertex,
        }
    }

    fn remaining(&self) -> usize {
        self.vertex_count - self.next_vertex
    }

    /// Accumulate the next vertex's mod value; mirrors the embedder's
    /// aggregation exactly.
    fn read_chunk(&mut self) -> u8 {
        let s = self.samples_per_vertex;
        let start = self.next_vertex * s;
        self.next_vertex += 1;

        let mut sum = 0u32;
        for &sid in &self.order[start..start + s] {
            let at = sid as usize * BYTES_PER_SAMPLE;
            for c in 0..BYTES_PER_SAMPLE {
                sum += self.buf[at + c] as u32;
            }
        }
        (sum & self.mask as u32) as u8
    }

    /// Read `byte_len` bytes' worth of chunks.
    fn read_bytes(&mut self, byte_len: usize, bits: u32) -> Vec<u8> {
        let n = message::chunks_for(byte_len, bits) as usize;
        let chunks: Vec<u8> = (0..n).map(|_| self.read_chunk()).collect();
        message::unpack_chunks(&chunks, bits)
    }
}

/// Extract the embedded payload from a carrier.
///
/// # Errors
/// - [`StegoError::UnsupportedCarrier`] if the carrier's sample width is
///   not 3 bytes.
/// - [`StegoError::CarrierTooSmall`] if the carrier cannot even hold the
///   8-byte header.
/// - [`StegoError::SignatureMismatch`] if the signature bytes do not
///   appear (usually a wrong seed).
/// - [`StegoError::LengthOutOfRange`] if the declared payload length
///   exceeds the remaining capacity.
pub fn extract(carrier: &dyn Carrier, params: &EngineParams) -> Result<Vec<u8>, StegoError> {
    if carrier.bytes_per_sample() != BYTES_PER_SAMPLE {
        return Err(StegoError::UnsupportedCarrier);
    }

    let bits = params.bits_per_vertex();
    let mut reader = ChunkReader::new(carrier.data(), params);

    if (reader.remaining() as u64) < message::chunks_for(HEADER_LEN, bits) {
        return Err(StegoError::CarrierTooSmall);
    }

    let signature = reader.read_bytes(SIGNATURE.len(), bits);
    if signature != SIGNATURE {
        return Err(StegoError::SignatureMismatch);
    }

    let length_bytes = reader.read_bytes(4, bits);
    let length = u32::from_le_bytes(length_bytes.try_into().expect("4-byte read")) as usize;

    if message::chunks_for(length, bits) > reader.remaining() as u64 {
        return Err(StegoError::LengthOutOfRange);
    }

    Ok(reader.read_bytes(length, bits))
}
