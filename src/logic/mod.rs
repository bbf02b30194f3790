// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reconciliation and submission logic.

pub mod reconcile;
pub mod submit;

/// Compute the next attachment set for one submission.
pub use reconcile::{Reconciled, reconcile};
/// Apply a submission end to end: reconcile, store blobs, save the record.
pub use submit::{ApplyOutcome, SubmitError, apply_submission};
