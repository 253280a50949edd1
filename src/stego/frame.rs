// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Payload envelope construction and parsing.
//!
//! The envelope is the binary container that wraps the encrypted message
//! before it is handed to the graph engine:
//!
//! ```text
//! [16 bytes] Argon2 salt (for Tier-2 key derivation)
//! [12 bytes] AES-GCM-SIV nonce
//! [N bytes ] ciphertext (plaintext_len + 16 bytes for auth tag)
//! [4 bytes ] CRC-32 of everything above
//! ```
//!
//! Total envelope size = 32 + plaintext_len + 16 bytes. No length field is
//! needed here: the engine's own wire format already carries the exact
//! payload length.

use super::crypto::{NONCE_LEN, SALT_LEN};
use super::error::StegoError;

/// Fixed overhead: salt(16) + nonce(12) + tag(16) + crc(4) = 48 bytes.
pub const ENVELOPE_OVERHEAD: usize = SALT_LEN + NONCE_LEN + 16 + 4;

/// Build a payload envelope from encrypted components.
pub fn build_envelope(
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut envelope = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len() + 4);
    envelope.extend_from_slice(salt);
    envelope.extend_from_slice(nonce);
    envelope.extend_from_slice(ciphertext);

    let crc = crc32fast::hash(&envelope);
    envelope.extend_from_slice(&crc.to_be_bytes());

    envelope
}

/// Parsed payload envelope.
pub struct ParsedEnvelope {
    /// Argon2 salt for Tier-2 encryption key derivation.
    pub salt: [u8; SALT_LEN],
    /// AES-GCM-SIV nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext including the 16-byte authentication tag.
    pub ciphertext: Vec<u8>,
}

/// Parse a payload envelope, verifying the CRC.
///
/// Returns `Err(StegoError::FrameCorrupted)` if the envelope is truncated
/// or the CRC check fails.
pub fn parse_envelope(data: &[u8]) -> Result<ParsedEnvelope, StegoError> {
    if data.len() < ENVELOPE_OVERHEAD {
        return Err(StegoError::FrameCorrupted);
    }

    let body = &data[..data.len() - 4];
    let crc_bytes = &data[data.len() - 4..];
    let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    if stored_crc != crc32fast::hash(body) {
        return Err(StegoError::FrameCorrupted);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&body[..SALT_LEN]);

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&body[SALT_LEN..SALT_LEN + NONCE_LEN]);

    Ok(ParsedEnvelope {
        salt,
        nonce,
        ciphertext: body[SALT_LEN + NONCE_LEN..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_roundtrip() {
        let salt = [7u8; SALT_LEN];
        let nonce = [9u8; NONCE_LEN];
        let ct = vec![0xAAu8; 40];

        let env = build_envelope(&salt, &nonce, &ct);
        assert_eq!(env.len(), ENVELOPE_OVERHEAD - 16 + ct.len());

        let parsed = parse_envelope(&env).unwrap();
        assert_eq!(parsed.salt, salt);
        assert_eq!(parsed.nonce, nonce);
        assert_eq!(parsed.ciphertext, ct);
    }

    #[test]
    fn corrupted_byte_detected() {
        let env = build_envelope(&[1; SALT_LEN], &[2; NONCE_LEN], &[3u8; 20]);
        for tamper_at in [0, SALT_LEN, SALT_LEN + NONCE_LEN, env.len() - 1] {
            let mut bad = env.clone();
            bad[tamper_at] ^= 0x01;
            assert!(
                matches!(parse_envelope(&bad), Err(StegoError::FrameCorrupted)),
                "tampering at {tamper_at} went undetected"
            );
        }
    }

    #[test]
    fn truncated_rejected() {
        let env = build_envelope(&[0; SALT_LEN], &[0; NONCE_LEN], &[1u8; 20]);
        assert!(matches!(
            parse_envelope(&env[..ENVELOPE_OVERHEAD - 1]),
            Err(StegoError::FrameCorrupted)
        ));
    }
}
