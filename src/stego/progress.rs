// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegraph

//! Global embed/extract progress tracking.
//!
//! Uses atomics so the engine worker and a polling UI thread never need a
//! lock. The channel is purely advisory: readers tolerate skipped values,
//! and writers never block.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::error::StegoError;

static STEP: AtomicU32 = AtomicU32::new(0);
static TOTAL: AtomicU32 = AtomicU32::new(0);
static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Reset progress to 0 and set the total step count.
/// Also resets the cancellation flag so a fresh operation starts clean.
pub fn init(total: u32) {
    CANCELLED.store(false, Ordering::Relaxed);
    STEP.store(0, Ordering::Relaxed);
    TOTAL.store(total, Ordering::Relaxed);
}

/// Set (or update) the total without resetting the current step.
/// Used once the batch count is known mid-flight.
pub fn set_total(total: u32) {
    TOTAL.store(total, Ordering::Relaxed);
}

/// Request cancellation of the current operation.
///
/// The engine checks this flag at its suspension points (the top of each
/// outer vertex loop and between matching batches) and returns
/// `Err(StegoError::Cancelled)` when set. A cancelled embed leaves the
/// carrier buffer partially modified; callers must discard it.
pub fn cancel() {
    CANCELLED.store(true, Ordering::Relaxed);
}

/// Returns `true` if cancellation has been requested.
pub fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::Relaxed)
}

/// Check for cancellation and return an error if requested.
pub fn check_cancelled() -> Result<(), StegoError> {
    if is_cancelled() {
        Err(StegoError::Cancelled)
    } else {
        Ok(())
    }
}

/// Advance progress by one step.
/// Step is capped at total so a poller never sees values like "84/15".
/// When total is 0 (indeterminate), step advances freely.
pub fn advance() {
    let total = TOTAL.load(Ordering::Relaxed);
    if total == 0 {
        STEP.fetch_add(1, Ordering::Relaxed);
    } else {
        let _ = STEP.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
            if s + 1 < total {
                Some(s + 1)
            } else {
                Some(s)
            }
        });
    }
}

/// Read the current (step, total) progress.
pub fn get() -> (u32, u32) {
    (STEP.load(Ordering::Relaxed), TOTAL.load(Ordering::Relaxed))
}

/// Mark progress as complete (step = total).
pub fn finish() {
    let t = TOTAL.load(Ordering::Relaxed);
    STEP.store(t, Ordering::Relaxed);
}

