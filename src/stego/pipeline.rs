// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Passphrase-level encode/decode pipeline.
//!
//! Ties the layers together:
//!
//! 1. Payload encoding (Brotli or raw) — `payload`
//! 2. AES-256-GCM-SIV encryption under an Argon2id key — `crypto`
//! 3. Envelope framing with salt, nonce and CRC — `frame`
//! 4. Graph embedding under the structural permutation seed — `graph`
//!
//! The engine seed is derived from the passphrase, so a wrong passphrase
//! fails fast with `SignatureMismatch` before any decryption is attempted.

use crate::carrier::Carrier;

use super::capacity::compute_bandwidth;
use super::crypto;
use super::error::StegoError;
use super::frame::{self, ENVELOPE_OVERHEAD};
use super::graph;
use super::params::EngineParams;
use super::payload;

/// Apply the passphrase-derived permutation seed. Any seed set on `params`
/// is overridden: seed agreement is what makes extraction possible, so it
/// must come from the passphrase alone.
fn keyed_params(params: &EngineParams, passphrase: &str) -> EngineParams {
    params.clone().with_seed(crypto::derive_seed(passphrase))
}

/// Encrypt a text message and embed it into the carrier.
///
/// # Errors
/// - [`StegoError::CarrierTooSmall`] if the encrypted envelope exceeds the
///   carrier's capacity.
/// - Carrier and cancellation errors as raised by [`graph::embed`].
pub fn embed_text(
    carrier: &mut dyn Carrier,
    text: &str,
    passphrase: &str,
    params: &EngineParams,
) -> Result<(), StegoError> {
    let plaintext = payload::encode_payload(text);
    let (ciphertext, nonce, salt) = crypto::encrypt(&plaintext, passphrase);
    let envelope = frame::build_envelope(&salt, &nonce, &ciphertext);

    graph::embed(carrier, &envelope, &keyed_params(params, passphrase))?;
    Ok(())
}

/// Extract and decrypt a text message from the carrier.
///
/// # Errors
/// - [`StegoError::SignatureMismatch`] for a wrong passphrase (the derived
///   seed yields a different permutation).
/// - [`StegoError::FrameCorrupted`] / [`StegoError::DecryptionFailed`] /
///   [`StegoError::InvalidUtf8`] for damaged or foreign embeddings.
pub fn extract_text(
    carrier: &dyn Carrier,
    passphrase: &str,
    params: &EngineParams,
) -> Result<String, StegoError> {
    let envelope = graph::extract(carrier, &keyed_params(params, passphrase))?;
    let parsed = frame::parse_envelope(&envelope)?;
    let plaintext = crypto::decrypt(&parsed.ciphertext, passphrase, &parsed.salt, &parsed.nonce)?;
    payload::decode_payload(&plaintext)
}

/// Maximum text payload (in bytes, before compression) that fits the
/// carrier once envelope and encryption overhead are accounted for.
pub fn text_capacity(carrier: &dyn Carrier, params: &EngineParams) -> Result<usize, StegoError> {
    let raw = compute_bandwidth(carrier, params)?;
    // One flags byte joins the plaintext before encryption.
    Ok(raw.saturating_sub(ENVELOPE_OVERHEAD + 1))
}
