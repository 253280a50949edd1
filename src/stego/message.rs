// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Message chunk coding.
//!
//! The embedded bit-stream is framed as:
//!
//! ```text
//! [4 bytes] signature 47 54 41 6C
//! [4 bytes] payload length (little-endian u32)
//! [L bytes] payload (opaque; normally the encrypted envelope)
//! ```
//!
//! The byte stream is then bit-packed LSB-first into chunks of
//! `bits_per_vertex` bits, one chunk per message-bearing vertex. Since the
//! chunk width divides 8, whole bytes always map to whole chunks and no
//! partial group survives.

/// The 4 constant bytes prepended to every embedded stream. Extraction with
/// a wrong seed almost surely fails to reproduce them, which is how wrong
/// keys are detected.
pub const SIGNATURE: [u8; 4] = [0x47, 0x54, 0x41, 0x6C];

/// Signature plus the 4-byte length field.
pub const HEADER_LEN: usize = SIGNATURE.len() + 4;

/// Number of chunks needed to carry `byte_len` bytes at `bits` per chunk.
/// Widened arithmetic: an extracted length field can claim up to 4 GiB,
/// which must not overflow on 32-bit targets before the range check.
pub fn chunks_for(byte_len: usize, bits: u32) -> u64 {
    byte_len as u64 * 8 / bits as u64
}

/// Assemble the full embedded stream for a payload.
pub fn build_stream(payload: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(HEADER_LEN + payload.len());
    stream.extend_from_slice(&SIGNATURE);
    stream.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    stream.extend_from_slice(payload);
    stream
}

/// Split bytes into `bits`-wide chunks, least-significant-bit of the first
/// byte first. Each chunk value is in `0..(1 << bits)`.
pub fn pack_chunks(bytes: &[u8], bits: u32) -> Vec<u8> {
    debug_assert!(matches!(bits, 1 | 2 | 4));
    let per_byte = (8 / bits) as usize;
    let mask = ((1u16 << bits) - 1) as u8;

    let mut chunks = Vec::with_capacity(bytes.len() * per_byte);
    for &byte in bytes {
        for k in 0..per_byte {
            chunks.push((byte >> (k as u32 * bits)) & mask);
        }
    }
    chunks
}

/// Reassemble bytes from `bits`-wide chunks in the same LSB-first layout.
/// A trailing group that does not complete a byte is discarded.
pub fn unpack_chunks(chunks: &[u8], bits: u32) -> Vec<u8> {
    debug_assert!(matches!(bits, 1 | 2 | 4));
    let per_byte = (8 / bits) as usize;

    let mut bytes = Vec::with_capacity(chunks.len() / per_byte);
    for group in chunks.chunks_exact(per_byte) {
        let mut byte = 0u8;
        for (k, &chunk) in group.iter().enumerate() {
            byte |= chunk << (k as u32 * bits);
        }
        bytes.push(byte);
    }
    bytes
}
