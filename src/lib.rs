// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Attachment-set management core.
//!
//! Multi-file uploads on a mutable record go wrong in quiet ways: a new
//! file silently replaces the whole set, a duplicate name attaches twice,
//! a removal resurrects on the next save. This crate keeps one editing
//! session honest from the first picked file to the persisted record:
//!
//! - [`selection::Selection`] is the client-side working set: it validates
//!   picked files against an [`models::AttachmentPolicy`], keeps entries
//!   unique by normalized name, tracks tentative removals, and manages
//!   preview-URL resources.
//! - [`logic::reconcile`] is the server-side engine: a pure function that
//!   merges one submission into the persisted set, applying removals and
//!   collapsing duplicate names deterministically.
//! - [`store::BlobStore`] and [`record::RecordStore`] are the storage
//!   seams; disk and in-memory implementations ship with the crate.
//!
//! Both halves agree on one name identity, [`utils::normalized_name`]:
//! transliterate, lowercase, strip whitespace.
//!
//! ```
//! use attachset::models::{AttachmentPolicy, IncomingFile};
//! use attachset::record::{MemoryRecords, Record};
//! use attachset::selection::Selection;
//! use attachset::selection::preview::PreviewBroker;
//! use attachset::store::MemoryBlobStore;
//! use attachset::{ApplyOutcome, apply_submission};
//!
//! let mut selection = Selection::new(AttachmentPolicy::default());
//! let mut previews = PreviewBroker::new();
//! let outcome = selection.add_files(
//!     vec![IncomingFile::from_bytes("notes.txt", "text/plain", b"hello".to_vec())],
//!     &mut previews,
//! );
//! assert_eq!(outcome.accepted, 1);
//!
//! let mut record = Record::new();
//! let mut blobs = MemoryBlobStore::new();
//! let mut records = MemoryRecords::new();
//! let applied = apply_submission(&mut record, selection.serialize(), &mut blobs, &mut records)
//!     .expect("submission should save");
//! assert_eq!(applied, ApplyOutcome::Saved { stored: 1, total: 1 });
//! assert_eq!(record.files.names(), vec!["notes.txt"]);
//! ```

pub mod logic;
pub mod models;
pub mod payload;
pub mod record;
pub mod selection;
pub mod store;
pub mod utils;

pub use logic::{ApplyOutcome, Reconciled, SubmitError, apply_submission, reconcile};
pub use models::{
    AttachmentPolicy, BlobSource, FileEntry, IncomingFile, PersistedFiles, RemovalDirectives,
    StoredFile,
};
pub use payload::{SubmissionPayload, boolish};
pub use record::{MemoryRecords, Record, RecordStore, ValidationErrors};
pub use selection::preview::{PreviewBroker, PreviewUrl};
pub use selection::{BatchOutcome, RejectReason, Rejection, Selection, SelectionEntry, SelectionPhase};
pub use store::{BlobStore, DiskBlobStore, MemoryBlobStore};
