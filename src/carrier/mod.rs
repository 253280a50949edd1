// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Carrier formats.
//!
//! A carrier is a lossless container whose raw sample bytes the engine may
//! rewrite: the pixel stream of a 24-bit BMP, or the 8-bit PCM stream of a
//! WAV file. The engine only ever sees the flat byte buffer; container
//! headers, padding and trailing chunks are preserved verbatim by the
//! concrete types and re-emitted on serialisation.
//!
//! Parsing is std-only, mirroring the zero-dependency codec layer.

pub mod error;
pub mod bmp;
pub mod wav;

pub use error::CarrierError;

/// Capability interface the embedding engine depends on.
///
/// `bytes_per_sample` is a property of the carrier format, not of the
/// engine configuration; the engine rejects anything other than 3.
pub trait Carrier {
    /// The embeddable sample byte stream (headers excluded).
    fn data(&self) -> &[u8];

    /// Mutable access to the sample byte stream.
    fn data_mut(&mut self) -> &mut [u8];

    /// Number of carrier bytes forming one sample. 3 for both supported
    /// formats: one RGB pixel, or three consecutive 8-bit PCM values.
    fn bytes_per_sample(&self) -> usize;

    /// Serialise the (possibly modified) carrier back to its container
    /// format, byte-identical to the input wherever the sample stream was
    /// not touched.
    fn to_bytes(&self) -> Result<Vec<u8>, CarrierError>;
}
