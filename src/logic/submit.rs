// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Submission flow around the reconciliation engine.
//!
//! Responsibilities:
//! - Reconcile one payload against the record's persisted files.
//! - Materialize surviving uploads into the blob store.
//! - Save the record all-or-nothing, leaving it untouched on failure.

use thiserror::Error;
use tracing::{debug, info};

use crate::logic::reconcile::{Reconciled, reconcile};
use crate::models::{FileEntry, PersistedFiles, StoredFile};
use crate::payload::SubmissionPayload;
use crate::record::{Record, RecordStore, ValidationErrors};
use crate::store::BlobStore;

/// What applying one submission did to the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Empty submission; the record was neither modified nor re-saved.
    Unchanged,
    /// The record now references the reconciled set.
    Saved { stored: usize, total: usize },
}

/// Failures surfaced by [`apply_submission`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The save step rejected the candidate record; the record handed in
    /// remains exactly as it was.
    #[error("record failed validation: {0}")]
    RecordInvalid(ValidationErrors),
    /// Blob storage failed while materializing an upload.
    #[error("failed to store an uploaded file")]
    Store(#[source] anyhow::Error),
}

/// Apply one submission to `record`.
///
/// Uploads are only written to the blob store once reconciliation has
/// decided they survive, so a duplicate that loses to a later re-upload
/// never reaches storage. The record is replaced only after a successful
/// save; on any error the caller still holds the previous state and can
/// reopen its selection.
pub fn apply_submission(
    record: &mut Record,
    payload: SubmissionPayload,
    blobs: &mut dyn BlobStore,
    records: &mut dyn RecordStore,
) -> Result<ApplyOutcome, SubmitError> {
    let directives = payload.directives();

    match reconcile(&record.files, payload.files, &directives) {
        Reconciled::Unchanged => {
            debug!("submission carried no changes, skipping save");
            Ok(ApplyOutcome::Unchanged)
        }
        Reconciled::Updated(plan) => {
            let mut next: Vec<StoredFile> = Vec::with_capacity(plan.len());
            let mut stored = 0usize;
            for entry in plan {
                match entry {
                    FileEntry::Existing(file) => next.push(file),
                    FileEntry::Incoming(upload) => {
                        let file = blobs.store(&upload).map_err(SubmitError::Store)?;
                        stored += 1;
                        next.push(file);
                    }
                }
            }
            let total = next.len();

            let mut candidate = record.clone();
            candidate.files = PersistedFiles::new(next);
            records.save(&mut candidate).map_err(SubmitError::RecordInvalid)?;
            *record = candidate;

            info!(stored, total, "attachment set saved");
            Ok(ApplyOutcome::Saved { stored, total })
        }
    }
}
