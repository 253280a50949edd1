// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! 8-bit PCM WAV carrier.
//!
//! Walks the RIFF chunk list, locates `fmt ` and `data`, and exposes the
//! `data` chunk bytes as the embeddable stream. Every other chunk (LIST,
//! cue, broadcast extensions, trailing metadata) is preserved verbatim.
//!
//! Only uncompressed 8-bit PCM is accepted: with 16-bit samples the
//! engine's byte-level exchanges would tear sample words apart, so wider
//! formats are rejected rather than silently degraded.

use super::error::{CarrierError, Result};
use super::Carrier;

const RIFF_HEADER_LEN: usize = 12;

/// A parsed WAV file with an 8-bit PCM data chunk.
pub struct WavAudio {
    /// Everything before the `data` chunk payload (including its header).
    prefix: Vec<u8>,
    /// Everything after the `data` chunk payload (pad byte, further chunks).
    suffix: Vec<u8>,
    /// The `data` chunk payload: interleaved 8-bit samples.
    samples: Vec<u8>,
    sample_rate: u32,
    channels: u16,
}

fn read_u16_le(data: &[u8], at: usize) -> Result<u16> {
    let b = data.get(at..at + 2).ok_or(CarrierError::UnexpectedEof)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32_le(data: &[u8], at: usize) -> Result<u32> {
    let b = data.get(at..at + 4).ok_or(CarrierError::UnexpectedEof)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

impl WavAudio {
    /// Parse a WAV file from raw bytes.
    ///
    /// # Errors
    /// - [`CarrierError::InvalidSignature`] without `RIFF`/`WAVE` magic.
    /// - [`CarrierError::UnsupportedVariant`] for non-PCM or non-8-bit audio.
    /// - [`CarrierError::MissingChunk`] if `fmt ` or `data` is absent.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < RIFF_HEADER_LEN {
            return Err(CarrierError::UnexpectedEof);
        }
        if &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
            return Err(CarrierError::InvalidSignature);
        }

        let mut fmt: Option<(u16, u16, u32, u16)> = None; // tag, channels, rate, bits
        let mut pos = RIFF_HEADER_LEN;

        while pos + 8 <= data.len() {
            let id: &[u8; 4] = data[pos..pos + 4].try_into().expect("4-byte chunk id");
            let size = read_u32_le(data, pos + 4)? as usize;
            let body = pos + 8;
            if body + size > data.len() {
                return Err(CarrierError::UnexpectedEof);
            }

            match id {
                b"fmt " => {
                    if size < 16 {
                        return Err(CarrierError::InvalidHeader("fmt chunk too short"));
                    }
                    fmt = Some((
                        read_u16_le(data, body)?,
                        read_u16_le(data, body + 2)?,
                        read_u32_le(data, body + 4)?,
                        read_u16_le(data, body + 14)?,
                    ));
                }
                b"data" => {
                    let (tag, channels, rate, bits) =
                        fmt.ok_or(CarrierError::MissingChunk("fmt "))?;
                    if tag != 1 {
                        return Err(CarrierError::UnsupportedVariant("non-PCM WAV"));
                    }
                    if bits != 8 {
                        return Err(CarrierError::UnsupportedVariant("only 8-bit PCM is supported"));
                    }
                    return Ok(Self {
                        prefix: data[..body].to_vec(),
                        suffix: data[body + size..].to_vec(),
                        samples: data[body..body + size].to_vec(),
                        sample_rate: rate,
                        channels,
                    });
                }
                _ => {}
            }

            // Chunks are word-aligned: odd sizes carry one pad byte.
            pos = body + size + (size & 1);
        }

        Err(CarrierError::MissingChunk("data"))
    }

    /// Build a mono 8-bit PCM WAV in memory from raw sample bytes.
    pub fn from_samples(sample_rate: u32, samples: Vec<u8>) -> Self {
        let data_len = samples.len();
        let mut prefix = Vec::with_capacity(RIFF_HEADER_LEN + 24 + 8);
        prefix.extend_from_slice(b"RIFF");
        prefix.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
        prefix.extend_from_slice(b"WAVE");
        prefix.extend_from_slice(b"fmt ");
        prefix.extend_from_slice(&16u32.to_le_bytes());
        prefix.extend_from_slice(&1u16.to_le_bytes()); // PCM
        prefix.extend_from_slice(&1u16.to_le_bytes()); // mono
        prefix.extend_from_slice(&sample_rate.to_le_bytes());
        prefix.extend_from_slice(&sample_rate.to_le_bytes()); // byte rate (8-bit mono)
        prefix.extend_from_slice(&1u16.to_le_bytes()); // block align
        prefix.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
        prefix.extend_from_slice(b"data");
        prefix.extend_from_slice(&(data_len as u32).to_le_bytes());

        Self {
            prefix,
            suffix: Vec::new(),
            samples,
            sample_rate,
            channels: 1,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl Carrier for WavAudio {
    fn data(&self) -> &[u8] {
        &self.samples
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    fn bytes_per_sample(&self) -> usize {
        3
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out =
            Vec::with_capacity(self.prefix.len() + self.samples.len() + self.suffix.len());
        out.extend_from_slice(&self.prefix);
        out.extend_from_slice(&self.samples);
        out.extend_from_slice(&self.suffix);
        Ok(out)
    }
}
