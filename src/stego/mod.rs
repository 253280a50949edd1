// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Steganographic embedding and extraction.
//!
//! Two API levels:
//!
//! - **Engine level** ([`graph::embed`] / [`graph::extract`]): raw payload
//!   bytes, explicit numeric seed. The payload is framed with a 4-byte
//!   signature and a 4-byte length, bit-packed into chunks, and realised
//!   through the graph matching. No cryptography.
//!
//! - **Passphrase level** ([`embed_text`] / [`extract_text`]): UTF-8 text,
//!   Brotli compression, AES-256-GCM-SIV encryption, and a
//!   passphrase-derived permutation seed.

pub mod error;
pub mod params;
pub mod permute;
pub mod message;
pub mod capacity;
pub mod crypto;
pub mod frame;
pub mod payload;
pub mod progress;
pub mod graph;
mod pipeline;

pub use error::StegoError;
pub use params::EngineParams;
pub use pipeline::{embed_text, extract_text, text_capacity};
