// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! # stegraph-core
//!
//! Pure-Rust graph-theoretic steganography engine. Hides encrypted payloads
//! in lossless carriers (24-bit BMP images, 8-bit PCM WAV audio) by treating
//! carrier samples as vertices of a weighted graph and committing a
//! near-minimum-weight matching: instead of overwriting bits, pairs of
//! visually similar samples are *exchanged* so that each vertex's modular
//! byte-sum encodes one message chunk.
//!
//! The pipeline: the payload is Brotli-compressed, AES-256-GCM-SIV encrypted
//! (Argon2id key derivation), split into small bit chunks, and assigned to
//! pseudo-randomly drawn sample groups. A 5-dimensional spatial index finds
//! low-cost sample exchanges; the few vertices the matching cannot serve are
//! forced to their target by a minimal direct adjustment.
//!
//! Extraction needs no graph work: it replays the seeded permutation and
//! accumulates each vertex's modular value directly.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stegraph_core::{BmpImage, EngineParams, embed_text, extract_text};
//!
//! let mut cover = BmpImage::from_bytes(&std::fs::read("photo.bmp").unwrap()).unwrap();
//! let params = EngineParams::default();
//! embed_text(&mut cover, "secret message", "passphrase", &params).unwrap();
//! let stego_bytes = cover.to_bytes().unwrap();
//!
//! let stego = BmpImage::from_bytes(&stego_bytes).unwrap();
//! let decoded = extract_text(&stego, "passphrase", &params).unwrap();
//! assert_eq!(decoded, "secret message");
//! ```

pub mod carrier;
pub mod stego;

pub use carrier::{Carrier, CarrierError};
pub use carrier::bmp::BmpImage;
pub use carrier::wav::WavAudio;
pub use stego::error::StegoError;
pub use stego::params::EngineParams;
pub use stego::{embed_text, extract_text, text_capacity};
pub use stego::capacity::compute_bandwidth;
pub use stego::graph::{embed, extract, EmbedStats};
pub use stego::progress;
