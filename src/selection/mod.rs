// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Working-set state machine for one attachment editing session.
//!
//! The selection holds the files a user currently intends to attach: the
//! record's existing files plus any newly picked ones, continuously valid
//! against an [`AttachmentPolicy`] and continuously unique by normalized
//! name. Removing an existing file only marks it here; the actual deletion
//! happens when the reconciliation engine consumes the serialized payload.

pub mod preview;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AttachmentPolicy, FileEntry, IncomingFile, PersistedFiles};
use crate::payload::SubmissionPayload;
use crate::selection::preview::{PreviewBroker, PreviewUrl};
use crate::utils::{format_bytes, normalized_basename, normalized_name};

/// Lifecycle phase of one editing session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No entries; nothing to submit yet.
    #[default]
    Empty,
    /// At least one entry or pending removal.
    Populated,
    /// A payload has been handed out and the set is frozen until the
    /// submission settles.
    Submitting,
}

/// Why a picked file was rejected before submission.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
    /// Blank name or zero bytes; dropped without user-facing noise.
    #[error("file is empty")]
    EmptyFile,
    #[error("file type is not allowed")]
    DisallowedType,
    #[error("file exceeds the {} per-file limit", format_bytes(*.limit))]
    FileTooLarge { limit: u64 },
    #[error("a file with the same name is already attached")]
    DuplicateName,
    #[error("no more than {limit} files can be attached")]
    TooManyFiles { limit: usize },
}

/// One rejected candidate from a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

/// Aggregated result of one [`Selection::add_files`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Number of candidates that made it into the selection.
    pub accepted: usize,
    /// Every rejected candidate, in input order.
    pub rejections: Vec<Rejection>,
}

impl BatchOutcome {
    /// One human-readable report for the whole batch, or `None` when there
    /// is nothing worth surfacing. Empty-file drops stay silent.
    pub fn summary(&self) -> Option<String> {
        let lines: Vec<String> = self
            .rejections
            .iter()
            .filter(|rejection| rejection.reason != RejectReason::EmptyFile)
            .map(|rejection| format!("{}: {}", rejection.name, rejection.reason))
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

/// One slot in the working set: the file plus its optional preview resource.
#[derive(Debug)]
pub struct SelectionEntry {
    file: FileEntry,
    preview: Option<PreviewUrl>,
}

impl SelectionEntry {
    pub fn file(&self) -> &FileEntry {
        &self.file
    }

    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }
}

/// Working set of attachments for one editing session.
#[derive(Debug, Default)]
pub struct Selection {
    policy: AttachmentPolicy,
    entries: Vec<SelectionEntry>,
    /// Tentative removals of existing files, keyed by normalized name. The
    /// value is the directive that will be submitted: the file's identifier,
    /// or its normalized basename when no identifier exists.
    pending_removals: BTreeMap<String, String>,
    remove_all: bool,
    phase: SelectionPhase,
}

impl Selection {
    /// Start an empty session.
    pub fn new(policy: AttachmentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Rebuild session state from a record's persisted files.
    ///
    /// Every stored file becomes an existing entry; there are no pending
    /// removals and no previews.
    pub fn from_persisted(persisted: &PersistedFiles, policy: AttachmentPolicy) -> Self {
        let entries: Vec<SelectionEntry> = persisted
            .iter()
            .cloned()
            .map(|file| SelectionEntry {
                file: FileEntry::Existing(file),
                preview: None,
            })
            .collect();

        let mut selection = Self {
            policy,
            entries,
            ..Self::default()
        };
        selection.sync_phase();
        selection
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combined size of every entry in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.file.size()).sum()
    }

    /// Validate and append a batch of picked files, in input order.
    ///
    /// Candidates are checked one by one: empty files are dropped, then the
    /// type allowlist, the per-file size ceiling, name uniqueness, and the
    /// file-count cap are applied in that order. Once the cap is hit the
    /// rest of the batch is rejected wholesale. All rejections are collected
    /// into the returned outcome so the caller can surface a single report
    /// for the whole batch.
    pub fn add_files(&mut self, batch: Vec<IncomingFile>, previews: &mut PreviewBroker) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        let mut queue = batch.into_iter();
        while let Some(candidate) = queue.next() {
            if candidate.name.trim().is_empty() || candidate.size == 0 {
                debug!(name = %candidate.name, "dropping empty upload");
                outcome.rejections.push(Rejection {
                    name: candidate.name,
                    reason: RejectReason::EmptyFile,
                });
                continue;
            }

            if !self.policy.allows_extension(&candidate.name) {
                debug!(name = %candidate.name, "rejecting upload with disallowed type");
                outcome.rejections.push(Rejection {
                    name: candidate.name,
                    reason: RejectReason::DisallowedType,
                });
                continue;
            }

            if !self.policy.within_size(candidate.size) {
                debug!(name = %candidate.name, size = candidate.size, "rejecting oversized upload");
                outcome.rejections.push(Rejection {
                    name: candidate.name,
                    reason: RejectReason::FileTooLarge {
                        limit: self.policy.max_file_size,
                    },
                });
                continue;
            }

            let key = normalized_name(&candidate.name);
            if self.contains_normalized(&key) {
                debug!(name = %candidate.name, "rejecting duplicate of a selected file");
                outcome.rejections.push(Rejection {
                    name: candidate.name,
                    reason: RejectReason::DuplicateName,
                });
                continue;
            }

            if self.entries.len() >= self.policy.max_files {
                warn!(limit = self.policy.max_files, "attachment cap reached, truncating batch");
                let limit = self.policy.max_files;
                outcome.rejections.push(Rejection {
                    name: candidate.name,
                    reason: RejectReason::TooManyFiles { limit },
                });
                for late in queue.by_ref() {
                    outcome.rejections.push(Rejection {
                        name: late.name,
                        reason: RejectReason::TooManyFiles { limit },
                    });
                }
                break;
            }

            // Accepting a file cancels any pending removal under the same
            // name: a directive must never name a file that is present.
            if self.pending_removals.remove(&key).is_some() {
                debug!(name = %candidate.name, "cleared pending removal for re-added name");
            }

            let preview = is_image(&candidate.content_type).then(|| previews.issue(&candidate.name));
            self.entries.push(SelectionEntry {
                file: FileEntry::Incoming(candidate),
                preview,
            });
            outcome.accepted += 1;
        }

        self.sync_phase();
        outcome
    }

    /// Remove the entry at `index`, releasing its preview.
    ///
    /// Dropping an existing file records a tentative removal directive;
    /// dropping a newly picked file leaves no trace. Out-of-range indices
    /// are ignored.
    pub fn remove_at(&mut self, index: usize, previews: &mut PreviewBroker) -> Option<FileEntry> {
        if index >= self.entries.len() {
            warn!(index, len = self.entries.len(), "ignoring removal of out-of-range entry");
            return None;
        }

        let entry = self.entries.remove(index);
        if let Some(preview) = entry.preview {
            previews.revoke(preview);
        }

        if let FileEntry::Existing(file) = &entry.file {
            let directive = if file.id.is_empty() {
                normalized_basename(&file.name)
            } else {
                file.id.clone()
            };
            debug!(name = %file.name, directive = %directive, "marked existing file for removal");
            self.pending_removals
                .insert(normalized_name(&file.name), directive);
        }

        self.sync_phase();
        Some(entry.file)
    }

    /// Empty the working set, releasing every preview.
    ///
    /// When any existing file is dropped this way, the coarse remove-all
    /// flag replaces the individual directives it subsumes. Clearing a set
    /// of only newly picked files leaves earlier directives untouched.
    pub fn clear_all(&mut self, previews: &mut PreviewBroker) {
        let had_existing = self.entries.iter().any(|entry| entry.file.is_existing());

        for entry in self.entries.drain(..) {
            if let Some(preview) = entry.preview {
                previews.revoke(preview);
            }
        }

        if had_existing {
            debug!("cleared selection including existing files, removing all");
            self.remove_all = true;
            self.pending_removals.clear();
        }

        self.sync_phase();
    }

    /// Produce the submission payload and freeze the session.
    ///
    /// Newly picked files become the payload's uploads; pending removals
    /// become its directive values. The selection keeps its state so a
    /// failed submission can be edited further after [`Selection::reopen`].
    pub fn serialize(&mut self) -> SubmissionPayload {
        if self.phase == SelectionPhase::Submitting {
            warn!("serializing a selection that is already submitting");
        }
        self.phase = SelectionPhase::Submitting;

        let files: Vec<IncomingFile> = self
            .entries
            .iter()
            .filter_map(|entry| match &entry.file {
                FileEntry::Incoming(file) => Some(file.clone()),
                FileEntry::Existing(_) => None,
            })
            .collect();
        let removed_files: Vec<String> = self.pending_removals.values().cloned().collect();

        debug!(
            files = files.len(),
            removed = removed_files.len(),
            remove_all = self.remove_all,
            "serialized selection for submission"
        );

        SubmissionPayload {
            files,
            removed_files,
            remove_all_files: self.remove_all,
        }
    }

    /// Return to an editable phase after a failed submission, keeping the
    /// whole working set intact.
    pub fn reopen(&mut self) {
        if self.phase == SelectionPhase::Submitting {
            self.phase = SelectionPhase::Empty;
        }
        self.sync_phase();
    }

    /// Tear the session down: release every preview, drop all entries and
    /// pending removals. Safe to call more than once.
    pub fn discard(&mut self, previews: &mut PreviewBroker) {
        for entry in self.entries.drain(..) {
            if let Some(preview) = entry.preview {
                previews.revoke(preview);
            }
        }
        self.pending_removals.clear();
        self.remove_all = false;
        self.phase = SelectionPhase::Empty;
    }

    fn contains_normalized(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.file.normalized_name() == key)
    }

    fn sync_phase(&mut self) {
        if self.phase != SelectionPhase::Submitting {
            self.phase = if self.entries.is_empty() && self.pending_removals.is_empty() && !self.remove_all {
                SelectionPhase::Empty
            } else {
                SelectionPhase::Populated
            };
        }
    }
}

fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlobSource, StoredFile};
    use pretty_assertions::assert_eq;

    fn upload(name: &str) -> IncomingFile {
        IncomingFile::from_bytes(name, "application/pdf", b"content".to_vec())
    }

    fn image(name: &str) -> IncomingFile {
        IncomingFile::from_bytes(name, "image/png", vec![1, 2, 3])
    }

    fn sized(name: &str, size: u64) -> IncomingFile {
        IncomingFile {
            name: name.to_string(),
            size,
            content_type: "application/pdf".to_string(),
            source: BlobSource::Memory(Vec::new()),
        }
    }

    fn stored(id: &str, name: &str) -> StoredFile {
        StoredFile {
            id: id.to_string(),
            name: name.to_string(),
            size: 10,
            content_type: "application/pdf".to_string(),
            url: format!("/uploads/{id}/{name}"),
        }
    }

    fn names(selection: &Selection) -> Vec<&str> {
        selection
            .entries()
            .iter()
            .map(|entry| entry.file().name())
            .collect()
    }

    // A batch larger than the cap keeps the head and rejects the tail
    #[test]
    fn truncates_batches_at_the_file_cap() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let batch: Vec<IncomingFile> = (1..=12).map(|i| upload(&format!("file{i:02}.pdf"))).collect();
        let outcome = selection.add_files(batch, &mut previews);

        assert_eq!(outcome.accepted, 10);
        assert_eq!(outcome.rejections.len(), 2);
        assert!(outcome
            .rejections
            .iter()
            .all(|r| r.reason == RejectReason::TooManyFiles { limit: 10 }));
        assert_eq!(selection.len(), 10);
        assert_eq!(names(&selection)[0], "file01.pdf");
        assert_eq!(names(&selection)[9], "file10.pdf");
    }

    // The cap counts what is already selected, not just this batch
    #[test]
    fn cap_applies_to_remaining_capacity() {
        let persisted = PersistedFiles::new(
            (1..=9).map(|i| stored(&format!("id{i}"), &format!("old{i}.txt"))).collect(),
        );
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(
            vec![upload("new1.pdf"), upload("new2.pdf"), upload("new3.pdf")],
            &mut previews,
        );

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.rejections.len(), 2);
        assert_eq!(selection.len(), 10);
    }

    // Rejections do not abort the batch; later valid files still land
    #[test]
    fn keeps_validating_after_a_rejection() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(
            vec![
                sized("huge.pdf", 6 * 1024 * 1024),
                upload("malware.exe"),
                upload("fine.pdf"),
            ],
            &mut previews,
        );

        assert_eq!(outcome.accepted, 1);
        assert_eq!(names(&selection), vec!["fine.pdf"]);
        assert_eq!(
            outcome.rejections[0].reason,
            RejectReason::FileTooLarge { limit: 5 * 1024 * 1024 }
        );
        assert_eq!(outcome.rejections[1].reason, RejectReason::DisallowedType);
    }

    // The size ceiling is inclusive
    #[test]
    fn accepts_files_exactly_at_the_size_limit() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome =
            selection.add_files(vec![sized("exact.pdf", 5 * 1024 * 1024)], &mut previews);
        assert_eq!(outcome.accepted, 1);
    }

    #[test]
    fn drops_empty_files_quietly() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(
            vec![sized("empty.pdf", 0), sized("   ", 12), upload("real.pdf")],
            &mut previews,
        );

        assert_eq!(outcome.accepted, 1);
        assert_eq!(selection.len(), 1);
        assert!(outcome
            .rejections
            .iter()
            .take(2)
            .all(|r| r.reason == RejectReason::EmptyFile));
        // Empty drops alone produce no user-facing report
        let quiet = Selection::new(AttachmentPolicy::default())
            .add_files(vec![sized("empty.pdf", 0)], &mut previews);
        assert_eq!(quiet.summary(), None);
    }

    // Within one batch the first occurrence of a name wins
    #[test]
    fn rejects_duplicates_within_a_batch() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(
            vec![upload("report.pdf"), upload("Report.PDF")],
            &mut previews,
        );

        assert_eq!(outcome.accepted, 1);
        assert_eq!(names(&selection), vec!["report.pdf"]);
        assert_eq!(outcome.rejections[0].reason, RejectReason::DuplicateName);
    }

    // Accents, case, and spacing never distinguish two names
    #[test]
    fn rejects_duplicates_of_existing_files() {
        let persisted = PersistedFiles::new(vec![stored("a1", "relatoriofinal.pdf")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(vec![upload("Relatório Final.PDF")], &mut previews);

        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.rejections[0].reason, RejectReason::DuplicateName);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn summary_reports_every_rejection_at_once() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let outcome = selection.add_files(
            vec![
                sized("huge.pdf", 6 * 1024 * 1024),
                upload("script.sh"),
                sized("empty.pdf", 0),
            ],
            &mut previews,
        );

        let summary = outcome.summary().unwrap();
        assert!(summary.contains("huge.pdf"));
        assert!(summary.contains("5.0 MB"));
        assert!(summary.contains("script.sh"));
        assert!(!summary.contains("empty.pdf"));
        assert_eq!(summary.lines().count(), 2);
    }

    // Removing an existing file produces a directive carrying its id
    #[test]
    fn removal_of_existing_records_a_directive() {
        let persisted = PersistedFiles::new(vec![stored("a1", "notes.txt")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        let removed = selection.remove_at(0, &mut previews);
        assert!(matches!(removed, Some(FileEntry::Existing(_))));

        let payload = selection.serialize();
        assert_eq!(payload.removed_files, vec!["a1".to_string()]);
        assert!(!payload.remove_all_files);
    }

    // Without an id the directive falls back to the normalized name
    #[test]
    fn removal_directive_falls_back_to_normalized_name() {
        let persisted = PersistedFiles::new(vec![stored("", "Old Notes.TXT")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);

        let payload = selection.serialize();
        assert_eq!(payload.removed_files, vec!["oldnotes.txt".to_string()]);
    }

    // Removing a newly picked file leaves no directive behind
    #[test]
    fn removal_of_incoming_leaves_no_trace() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(vec![upload("draft.pdf")], &mut previews);
        selection.remove_at(0, &mut previews);

        let payload = selection.serialize();
        assert!(payload.removed_files.is_empty());
        assert!(payload.files.is_empty());
    }

    // Re-adding a name cancels its pending removal
    #[test]
    fn re_adding_a_removed_name_clears_the_directive() {
        let persisted = PersistedFiles::new(vec![stored("a1", "report.pdf")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        let outcome = selection.add_files(vec![upload("Report.PDF")], &mut previews);

        assert_eq!(outcome.accepted, 1);
        let payload = selection.serialize();
        assert!(payload.removed_files.is_empty());
        assert_eq!(payload.files.len(), 1);
    }

    // A rejected candidate must not cancel a pending removal
    #[test]
    fn rejected_re_add_keeps_the_directive() {
        let persisted = PersistedFiles::new(vec![stored("a1", "report.pdf")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        let outcome = selection.add_files(vec![sized("report.pdf", 9 * 1024 * 1024)], &mut previews);

        assert_eq!(outcome.accepted, 0);
        let payload = selection.serialize();
        assert_eq!(payload.removed_files, vec!["a1".to_string()]);
    }

    // Remove existing, re-add, remove again: the payload asks for nothing,
    // so the persisted original stays
    #[test]
    fn removing_a_re_added_name_requests_nothing() {
        let persisted = PersistedFiles::new(vec![stored("a1", "report.pdf")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        selection.add_files(vec![upload("report.pdf")], &mut previews);
        selection.remove_at(0, &mut previews);

        let payload = selection.serialize();
        assert!(payload.files.is_empty());
        assert!(payload.removed_files.is_empty());
        assert!(!payload.remove_all_files);
    }

    // Clearing a set that held existing files escalates to remove-all
    #[test]
    fn clear_with_existing_escalates_to_remove_all() {
        let persisted = PersistedFiles::new(vec![stored("a1", "one.txt"), stored("b2", "two.txt")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        selection.clear_all(&mut previews);

        let payload = selection.serialize();
        assert!(payload.remove_all_files);
        assert!(payload.removed_files.is_empty());
        assert!(selection.is_empty());
    }

    // Clearing only newly picked files keeps earlier directives intact
    #[test]
    fn clear_without_existing_keeps_directives() {
        let persisted = PersistedFiles::new(vec![stored("a1", "one.txt")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        selection.add_files(vec![upload("fresh.pdf")], &mut previews);
        selection.clear_all(&mut previews);

        let payload = selection.serialize();
        assert!(!payload.remove_all_files);
        assert_eq!(payload.removed_files, vec!["a1".to_string()]);
    }

    // Previews exist for images only and die with their entry
    #[test]
    fn previews_follow_entry_lifecycle() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(vec![image("photo.png"), upload("paper.pdf")], &mut previews);
        assert_eq!(previews.live(), 1);
        assert!(selection.entries()[0].preview().is_some());
        assert!(selection.entries()[1].preview().is_none());

        selection.remove_at(0, &mut previews);
        assert_eq!(previews.live(), 0);
    }

    #[test]
    fn discard_releases_previews_and_is_idempotent() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(vec![image("a.png"), image("b.gif")], &mut previews);
        assert_eq!(previews.live(), 2);

        selection.discard(&mut previews);
        selection.discard(&mut previews);

        assert_eq!(previews.live(), 0);
        assert!(selection.is_empty());
        assert_eq!(selection.phase(), SelectionPhase::Empty);
    }

    #[test]
    fn out_of_range_removal_is_ignored() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(vec![upload("only.pdf")], &mut previews);
        assert!(selection.remove_at(5, &mut previews).is_none());
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn serialize_freezes_and_reopen_restores() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(vec![upload("draft.pdf")], &mut previews);
        assert_eq!(selection.phase(), SelectionPhase::Populated);

        let payload = selection.serialize();
        assert_eq!(payload.files.len(), 1);
        assert_eq!(selection.phase(), SelectionPhase::Submitting);

        selection.reopen();
        assert_eq!(selection.phase(), SelectionPhase::Populated);
        assert_eq!(selection.len(), 1);
    }

    // A pending removal keeps the session worth submitting
    #[test]
    fn pending_removal_counts_as_populated() {
        let persisted = PersistedFiles::new(vec![stored("a1", "one.txt")]);
        let mut selection = Selection::from_persisted(&persisted, AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.remove_at(0, &mut previews);
        assert!(selection.is_empty());
        assert_eq!(selection.phase(), SelectionPhase::Populated);
    }

    #[test]
    fn total_size_sums_all_entries() {
        let mut selection = Selection::new(AttachmentPolicy::default());
        let mut previews = PreviewBroker::new();

        selection.add_files(
            vec![sized("a.pdf", 100), sized("b.pdf", 250)],
            &mut previews,
        );
        assert_eq!(selection.total_size(), 350);
    }
}
