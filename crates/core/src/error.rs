// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

use thiserror::Error;

/// Errors raised by the core routing/decomposition routines.
///
/// None of these are recovered internally; they are all reported to the
/// caller and are expected to terminate the current run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Scratch buffers for a problem of size `n` could not be allocated.
    #[error("failed to allocate {what} for a problem of size n = {n}")]
    AllocFailure { what: &'static str, n: usize },

    /// The move matrix (or a BFS walking it) violated one of its structural
    /// invariants: an entry exceeded `m + 1`, a search walked more than `n`
    /// steps without closing a cycle, or a destination group fell outside
    /// `0..k`.
    #[error("move matrix invariant violated: {reason}\n{dump}")]
    InvariantViolation { reason: String, dump: String },

    /// [`crate::decomposition::get_decomp`] reached its last fallback
    /// (condition 6) and still found nothing to remove.
    #[error("no admissible cycle could be removed from a non-empty move matrix\n{dump}")]
    NoAdmissibleCycle { dump: String },

    /// The caller supplied a state vector that is not a permutation of
    /// `1..=n`.
    #[error("input vector of length {len} is not a permutation of 1..={n}: {reason}")]
    BadInput {
        len: usize,
        n: usize,
        reason: String,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
