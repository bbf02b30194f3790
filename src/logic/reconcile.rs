// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The attachment-set reconciliation engine.
//!
//! One pure function decides which files survive a submission: it applies
//! the removal directives to the persisted set, appends the uploads, and
//! collapses duplicate names. Storage and the atomic record write belong to
//! the caller; nothing in here performs IO.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{FileEntry, IncomingFile, PersistedFiles, RemovalDirectives};

/// Result of reconciling one submission against the persisted set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// The submission was empty. Nothing must be stored and the record
    /// must not be re-saved.
    Unchanged,
    /// The next attachment set, in final order. Incoming entries still
    /// need to be written to a blob store before the record can reference
    /// them.
    Updated(Vec<FileEntry>),
}

/// Compute the successor of `persisted` under one submission.
///
/// An entirely empty submission short-circuits to [`Reconciled::Unchanged`].
/// Otherwise removals are applied first (`remove_all` empties the set
/// outright and makes individual directives irrelevant), the uploads are
/// appended behind the survivors, and duplicate normalized names are
/// collapsed so that the later occurrence supplies the content while the
/// earliest occurrence keeps the position.
pub fn reconcile(
    persisted: &PersistedFiles,
    incoming: Vec<IncomingFile>,
    removals: &RemovalDirectives,
) -> Reconciled {
    if incoming.is_empty() && removals.is_noop() {
        debug!("empty submission, persisted set left untouched");
        return Reconciled::Unchanged;
    }

    let mut merged: Vec<FileEntry> = if removals.remove_all() {
        Vec::new()
    } else {
        for value in removals.unmatched(persisted) {
            warn!(value, "removal directive names no stored file");
        }
        persisted
            .iter()
            .filter(|file| !removals.matches(file))
            .cloned()
            .map(FileEntry::Existing)
            .collect()
    };
    merged.extend(incoming.into_iter().map(FileEntry::Incoming));

    let deduped = dedupe_last_wins(merged);
    debug!(kept = deduped.len(), "reconciled attachment set");
    Reconciled::Updated(deduped)
}

/// Collapse duplicate normalized names.
///
/// The winner for each name is found by a reverse scan, so a re-upload
/// replaces the content of its predecessor; emission then follows the
/// forward order, so the replacement sits where the name first appeared.
fn dedupe_last_wins(merged: Vec<FileEntry>) -> Vec<FileEntry> {
    let keys: Vec<String> = merged.iter().map(|entry| entry.normalized_name()).collect();

    let mut winner: HashMap<&str, usize> = HashMap::new();
    for (index, key) in keys.iter().enumerate().rev() {
        winner.entry(key.as_str()).or_insert(index);
    }

    let mut slots: Vec<Option<FileEntry>> = merged.into_iter().map(Some).collect();
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut deduped = Vec::with_capacity(slots.len());

    for key in &keys {
        if !emitted.insert(key.as_str()) {
            continue;
        }
        if let Some(index) = winner.get(key.as_str()) {
            if let Some(entry) = slots[*index].take() {
                deduped.push(entry);
            }
        }
    }

    deduped
}
