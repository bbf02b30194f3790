// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The record owning an attachment set, and its persistence collaborator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::models::{AttachmentPolicy, PersistedFiles};

/// A persistable owner of one attachment set.
///
/// Unsaved records have no identity and no timestamps; both are assigned by
/// the store on the first successful save.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<u64>,
    pub files: PersistedFiles,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Record {
    /// A fresh, unsaved record with no attachments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(files: PersistedFiles) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }
}

/// Field-keyed validation messages reported by a rejected save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for one field, empty when the field is clean.
    pub fn on(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message, prefixed with its field name.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field} {message}"))
            })
            .collect()
    }

    /// Render as a field-to-messages JSON object, the shape error responses
    /// are sent in.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

/// All-or-nothing persistence for records.
///
/// A successful save persists the record exactly as handed in; a rejected
/// save must leave the previously persisted state untouched.
pub trait RecordStore {
    /// Persist the record, assigning identity and timestamps on success.
    fn save(&mut self, record: &mut Record) -> Result<(), ValidationErrors>;
}

/// In-memory record store with the save-time safeguards of a real storage
/// layer: the extension allowlist is enforced again on every save, so a
/// client that skipped selection-side validation cannot sneak a disallowed
/// file into a record.
#[derive(Debug, Default)]
pub struct MemoryRecords {
    policy: AttachmentPolicy,
    rows: BTreeMap<u64, Record>,
    next_id: u64,
    saves: usize,
    fail_next: Option<ValidationErrors>,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AttachmentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Queue a validation failure for the next save, for failure-path tests.
    pub fn fail_next_save(&mut self, errors: ValidationErrors) {
        self.fail_next = Some(errors);
    }

    /// Number of save attempts, successful or not.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.rows.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn validate(&self, record: &Record) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for file in record.files.iter() {
            if !self.policy.allows_extension(&file.name) {
                errors.add("files", format!("{} has a type that is not allowed", file.name));
            }
        }
        errors
    }
}

impl RecordStore for MemoryRecords {
    fn save(&mut self, record: &mut Record) -> Result<(), ValidationErrors> {
        self.saves += 1;

        if let Some(errors) = self.fail_next.take() {
            debug!(%errors, "record save failed as requested");
            return Err(errors);
        }

        let errors = self.validate(record);
        if !errors.is_empty() {
            debug!(%errors, "record failed validation");
            return Err(errors);
        }

        let now = OffsetDateTime::now_utc();
        let id = match record.id {
            Some(id) => id,
            None => {
                self.next_id += 1;
                record.id = Some(self.next_id);
                record.created_at = Some(now);
                self.next_id
            }
        };
        record.updated_at = Some(now);
        self.rows.insert(id, record.clone());

        Ok(())
    }
}
