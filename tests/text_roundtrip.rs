// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Round-trip integration tests for the passphrase pipeline over both
//! carrier formats.

use stegraph_core::{
    embed_text, extract_text, text_capacity, BmpImage, Carrier, EngineParams, StegoError, WavAudio,
};

fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E3779B97F4A7C15) | 1;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

fn bmp_carrier() -> BmpImage {
    BmpImage::from_pixels(120, 80, noise(120 * 80 * 3, 1)).unwrap()
}

fn wav_carrier() -> WavAudio {
    WavAudio::from_samples(8000, noise(9000, 2))
}

#[test]
fn bmp_roundtrip_basic() {
    let mut cover = bmp_carrier();
    let message = "Hello, steganography!";
    let passphrase = "test-passphrase-123";

    embed_text(&mut cover, message, passphrase, &EngineParams::default()).unwrap();
    let decoded = extract_text(&cover, passphrase, &EngineParams::default()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn bmp_roundtrip_through_file_bytes() {
    // Full persistence cycle: embed, serialise, re-parse, extract.
    let mut cover = bmp_carrier();
    embed_text(&mut cover, "over the wire", "key", &EngineParams::default()).unwrap();
    let file_bytes = cover.to_bytes().unwrap();

    let reloaded = BmpImage::from_bytes(&file_bytes).unwrap();
    let decoded = extract_text(&reloaded, "key", &EngineParams::default()).unwrap();
    assert_eq!(decoded, "over the wire");
}

#[test]
fn wav_roundtrip_through_file_bytes() {
    let mut cover = wav_carrier();
    embed_text(&mut cover, "hidden in plain sound", "key", &EngineParams::default()).unwrap();
    let file_bytes = cover.to_bytes().unwrap();

    let reloaded = WavAudio::from_bytes(&file_bytes).unwrap();
    let decoded = extract_text(&reloaded, "key", &EngineParams::default()).unwrap();
    assert_eq!(decoded, "hidden in plain sound");
}

#[test]
fn wrong_passphrase_fails() {
    let mut cover = bmp_carrier();
    embed_text(&mut cover, "secret msg", "correct-pass", &EngineParams::default()).unwrap();

    // A wrong passphrase derives a different permutation seed, so the
    // signature never materialises.
    let result = extract_text(&cover, "wrong-pass", &EngineParams::default());
    assert!(matches!(result, Err(StegoError::SignatureMismatch)));
}

#[test]
fn roundtrip_empty_message() {
    let mut cover = bmp_carrier();
    embed_text(&mut cover, "", "pass", &EngineParams::default()).unwrap();
    let decoded = extract_text(&cover, "pass", &EngineParams::default()).unwrap();
    assert_eq!(decoded, "");
}

#[test]
fn roundtrip_unicode() {
    let mut cover = bmp_carrier();
    let message = "Héllo wörld! 日本語テスト 🔐";
    embed_text(&mut cover, message, "unicode-key", &EngineParams::default()).unwrap();
    assert_eq!(
        extract_text(&cover, "unicode-key", &EngineParams::default()).unwrap(),
        message
    );
}

#[test]
fn roundtrip_various_lengths() {
    let params = EngineParams::default();
    for len in [1usize, 10, 50, 200] {
        let mut cover = bmp_carrier();
        let message: String = (0..len).map(|i| (b'A' + (i % 26) as u8) as char).collect();
        embed_text(&mut cover, &message, "multi-test", &params).unwrap();
        let decoded = extract_text(&cover, "multi-test", &params).unwrap();
        assert_eq!(decoded, message, "failed for message length {len}");
    }
}

#[test]
fn capacity_is_honest() {
    let cover = bmp_carrier();
    let params = EngineParams::default();
    let cap = text_capacity(&cover, &params).unwrap();
    // 9600 samples → 4800 vertices → 1200 gross bytes, minus header,
    // envelope and flags overhead.
    assert!(cap > 1000, "capacity {cap} too low");
    assert!(cap < 1200, "capacity {cap} suspiciously high");

    // A message of exactly `cap` bytes must embed.
    let message: String = noise(cap, 3).iter().map(|&b| (b'a' + (b % 26)) as char).collect();
    let mut carrier = bmp_carrier();
    embed_text(&mut carrier, &message, "edge", &params).unwrap();
    assert_eq!(extract_text(&carrier, "edge", &params).unwrap(), message);
}

#[test]
fn message_too_large_fails() {
    let cover = bmp_carrier();
    let params = EngineParams::default();
    let cap = text_capacity(&cover, &params).unwrap();

    // Far enough over capacity that even Brotli cannot rescue it.
    let message: String = noise(cap * 4, 4).iter().map(|&b| (b'a' + (b % 26)) as char).collect();
    let mut carrier = bmp_carrier();
    assert!(matches!(
        embed_text(&mut carrier, &message, "big", &params),
        Err(StegoError::CarrierTooSmall)
    ));
}

#[test]
fn stego_bmp_is_still_a_valid_bmp() {
    let mut cover = bmp_carrier();
    embed_text(&mut cover, "still parses", "pass", &EngineParams::default()).unwrap();
    let bytes = cover.to_bytes().unwrap();

    let img = BmpImage::from_bytes(&bytes).unwrap();
    assert_eq!(img.width(), 120);
    assert_eq!(img.height(), 80);
}
