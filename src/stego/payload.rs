// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Payload serialization and compression.
//!
//! The payload format wraps the plaintext before encryption:
//!
//! ```text
//! [1 byte ] flags
//! [M bytes] UTF-8 text (raw or Brotli-compressed depending on flags)
//! ```
//!
//! Stego capacity is scarce, so the text is Brotli-compressed whenever that
//! is strictly smaller than the raw form.

use std::io::{Read, Write};

use super::error::StegoError;

/// Compression algorithm flags (bits 0-1 of the flags byte).
const COMPRESS_NONE: u8 = 0b00;
const COMPRESS_BROTLI: u8 = 0b01;
const COMPRESS_MASK: u8 = 0b11;

/// Brotli compression quality (0-11). 11 = max compression. Payloads are
/// small, so even max quality compresses in milliseconds.
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Encode a text payload into bytes ready for encryption.
///
/// Returns `[flags byte][maybe_compressed_text]`.
pub fn encode_payload(text: &str) -> Vec<u8> {
    let raw = text.as_bytes();
    let compressed = compress_brotli(raw);

    // Use the compressed form only if it is strictly smaller.
    if compressed.len() < raw.len() {
        let mut result = Vec::with_capacity(1 + compressed.len());
        result.push(COMPRESS_BROTLI);
        result.extend_from_slice(&compressed);
        result
    } else {
        let mut result = Vec::with_capacity(1 + raw.len());
        result.push(COMPRESS_NONE);
        result.extend_from_slice(raw);
        result
    }
}

/// Decode a text payload from decrypted bytes.
pub fn decode_payload(data: &[u8]) -> Result<String, StegoError> {
    if data.is_empty() {
        return Err(StegoError::FrameCorrupted);
    }

    let flags = data[0];
    let body = &data[1..];

    let inner = match flags & COMPRESS_MASK {
        COMPRESS_NONE => body.to_vec(),
        COMPRESS_BROTLI => decompress_brotli(body)?,
        _ => return Err(StegoError::FrameCorrupted),
    };

    String::from_utf8(inner).map_err(|_| StegoError::InvalidUtf8)
}

fn compress_brotli(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    {
        let mut compressor = brotli::CompressorWriter::new(
            &mut output,
            4096, // buffer size
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW_SIZE,
        );
        compressor
            .write_all(data)
            .expect("Brotli compression should not fail");
        // CompressorWriter flushes on drop
    }
    output
}

fn decompress_brotli(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    let decompressor = brotli::Decompressor::new(data, 4096);
    // Limit decompressed size to prevent decompression bombs
    let limit = 128 * 1024; // 128 KB generous limit
    decompressor.take(limit as u64).read_to_end(&mut output)
        .map_err(|_| StegoError::FrameCorrupted)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_raw() {
        // Short incompressible text: Brotli overhead loses, raw form wins.
        let encoded = encode_payload("hi");
        assert_eq!(encoded[0], COMPRESS_NONE);
        assert_eq!(decode_payload(&encoded).unwrap(), "hi");
    }

    #[test]
    fn repetitive_text_compresses() {
        let text = "steganography ".repeat(50);
        let encoded = encode_payload(&text);
        assert_eq!(encoded[0], COMPRESS_BROTLI);
        assert!(encoded.len() < text.len());
        assert_eq!(decode_payload(&encoded).unwrap(), text);
    }

    #[test]
    fn empty_text() {
        let encoded = encode_payload("");
        assert_eq!(decode_payload(&encoded).unwrap(), "");
    }

    #[test]
    fn unicode_roundtrip() {
        let text = "Héllo wörld! 日本語テスト 🔐";
        assert_eq!(decode_payload(&encode_payload(text)).unwrap(), text);
    }

    #[test]
    fn unknown_flags_rejected() {
        assert!(matches!(
            decode_payload(&[0b10, 1, 2, 3]),
            Err(StegoError::FrameCorrupted)
        ));
        assert!(matches!(decode_payload(&[]), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut encoded = vec![COMPRESS_NONE];
        encoded.extend_from_slice(&[0xFF, 0xFE]);
        assert!(matches!(
            decode_payload(&encoded),
            Err(StegoError::InvalidUtf8)
        ));
    }
}
