// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Cryptographic primitives for payload encryption.
//!
//! Implements a two-tier key derivation scheme using Argon2id:
//!
//! - **Tier 1 (structural)**: Deterministic digest of passphrase + fixed
//!   salt, reduced to the engine's 64-bit permutation seed. Both embedder
//!   and extractor scatter the message over the same sample order without
//!   any position data in the carrier.
//!
//! - **Tier 2 (encryption)**: AES-256-GCM-SIV keyed from passphrase +
//!   random salt. The random salt travels in the payload envelope, so the
//!   extractor recovers it from the embedded data itself.
//!
//! AES-256-GCM-SIV is chosen over AES-256-GCM for its nonce-misuse
//! resistance, an extra safety margin since the nonce is randomly generated
//! and embedded alongside the ciphertext.

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use zeroize::Zeroizing;

use super::error::StegoError;

/// Fixed salt for Tier-1 (structural) key derivation. Intentionally fixed
/// so the extractor can reproduce the permutation seed from the passphrase
/// alone, before touching the carrier.
const STRUCTURAL_SALT: &[u8; 16] = b"stegraph-gt-v1\0\0";

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Argon2 salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derive the engine's permutation seed from a passphrase (Tier 1).
///
/// The low 8 bytes of the structural digest, little-endian. Deterministic
/// given the passphrase, so embedder and extractor agree.
pub fn derive_seed(passphrase: &str) -> u64 {
    let mut digest = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), STRUCTURAL_SALT, &mut *digest)
        .expect("Argon2 seed derivation should not fail");
    u64::from_le_bytes(digest[..8].try_into().expect("8-byte slice"))
}

/// Build the Tier-2 payload cipher for a passphrase/salt pair.
///
/// The Argon2 output lives only long enough to key the cipher.
fn payload_cipher(passphrase: &str, salt: &[u8]) -> Aes256GcmSiv {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt, &mut *key)
        .expect("Argon2 key derivation should not fail");
    Aes256GcmSiv::new_from_slice(&*key).expect("valid key length")
}

/// Encrypt a payload under a fresh random salt and nonce.
///
/// Returns (ciphertext_with_tag, nonce, salt); both random values travel
/// in the envelope so the extractor can rebuild the same cipher. The
/// ciphertext carries the 16-byte AES-GCM-SIV authentication tag.
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> (Vec<u8>, [u8; NONCE_LEN], [u8; SALT_LEN]) {
    use rand::RngCore;

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let ciphertext = payload_cipher(passphrase, &salt)
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .expect("AES-GCM-SIV encrypt should not fail");

    (ciphertext, nonce, salt)
}

/// Decrypt an extracted payload.
///
/// Fails with [`StegoError::DecryptionFailed`] when the passphrase is
/// wrong or the ciphertext did not survive intact — the auth tag covers
/// both cases indistinguishably.
pub fn decrypt(
    ciphertext: &[u8],
    passphrase: &str,
    salt: &[u8],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>, StegoError> {
    payload_cipher(passphrase, salt)
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}
