// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from carrier parsing through
//! graph embedding, extraction and decryption.

use core::fmt;

use crate::carrier::CarrierError;

/// Errors that can occur during steganographic embedding or extraction.
#[derive(Debug)]
pub enum StegoError {
    /// The carrier file could not be parsed.
    InvalidCarrier(CarrierError),
    /// The carrier's sample width is not the 3 bytes the engine requires.
    UnsupportedCarrier,
    /// The message needs more vertices than the carrier provides.
    CarrierTooSmall,
    /// The extracted length field exceeds the carrier's remaining capacity.
    LengthOutOfRange,
    /// The extracted stream does not start with the embedding signature
    /// (usually a wrong seed or passphrase).
    SignatureMismatch,
    /// CRC check failed on the extracted payload envelope.
    FrameCorrupted,
    /// AES-GCM-SIV decryption failed (wrong passphrase or corrupted data).
    DecryptionFailed,
    /// The decrypted payload is not valid UTF-8.
    InvalidUtf8,
    /// The operation was cancelled by the user.
    Cancelled,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCarrier(e) => write!(f, "invalid carrier: {e}"),
            Self::UnsupportedCarrier => write!(f, "carrier sample width is not 3 bytes"),
            Self::CarrierTooSmall => write!(f, "carrier too small for this message"),
            Self::LengthOutOfRange => write!(f, "embedded length exceeds carrier capacity"),
            Self::SignatureMismatch => write!(f, "no embedded signature found (wrong seed?)"),
            Self::FrameCorrupted => write!(f, "payload envelope CRC mismatch"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong passphrase?)"),
            Self::InvalidUtf8 => write!(f, "extracted text is not valid UTF-8"),
            Self::Cancelled => write!(f, "operation cancelled by user"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidCarrier(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CarrierError> for StegoError {
    fn from(e: CarrierError) -> Self {
        Self::InvalidCarrier(e)
    }
}
