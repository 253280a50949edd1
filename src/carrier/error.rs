// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Error types for carrier parsing and serialisation.

use std::fmt;

/// Errors that can occur while parsing or re-emitting a carrier file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarrierError {
    /// Input data is too short or truncated.
    UnexpectedEof,
    /// Missing the format's magic bytes (`BM` / `RIFF`+`WAVE`).
    InvalidSignature,
    /// A header field is invalid or inconsistent.
    InvalidHeader(&'static str),
    /// The format variant is valid but not supported for embedding
    /// (e.g. compressed BMP, 16-bit PCM).
    UnsupportedVariant(&'static str),
    /// A mandatory chunk (WAV `fmt ` or `data`) was not found.
    MissingChunk(&'static str),
}

impl fmt::Display for CarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of carrier data"),
            Self::InvalidSignature => write!(f, "missing carrier format signature"),
            Self::InvalidHeader(msg) => write!(f, "invalid carrier header: {msg}"),
            Self::UnsupportedVariant(msg) => write!(f, "unsupported carrier variant: {msg}"),
            Self::MissingChunk(name) => write!(f, "missing carrier chunk: {name}"),
        }
    }
}

impl std::error::Error for CarrierError {}

pub type Result<T> = std::result::Result<T, CarrierError>;
