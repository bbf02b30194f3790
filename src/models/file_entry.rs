// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Attachment domain model: incoming uploads, stored files, and the
//! persisted set owned by a record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::normalized_name;

/// Raw content behind a not-yet-stored upload.
///
/// Path sources are read lazily, only when the upload is finally written to
/// a blob store. Memory sources carry their bytes directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlobSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A freshly picked file that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub source: BlobSource,
}

impl IncomingFile {
    /// Build an incoming file from an on-disk path.
    ///
    /// The size comes from filesystem metadata and the MIME type is guessed
    /// from the extension. The content itself is not read here.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = path
            .metadata()
            .with_context(|| format!("Failed to read metadata for {:?}", path))?
            .len();
        let content_type = guess_mime(&path);

        Ok(Self {
            name,
            size,
            content_type,
            source: BlobSource::Path(path),
        })
    }

    /// Build an incoming file from bytes already in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            content_type: content_type.into(),
            source: BlobSource::Memory(bytes),
        }
    }

    /// Read the raw content. Path sources hit the filesystem here and
    /// nowhere earlier.
    pub fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            BlobSource::Memory(bytes) => Ok(bytes.clone()),
            BlobSource::Path(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read upload content from {:?}", path)),
        }
    }
}

/// A file that already lives in a blob store and is referenced by a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Stable identifier assigned by the blob store.
    pub id: String,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    /// Location the stored content can be fetched from.
    pub url: String,
}

/// One attachment in either provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileEntry {
    /// Already persisted and referenced by the record.
    Existing(StoredFile),
    /// Newly picked in the current editing session.
    Incoming(IncomingFile),
}

impl FileEntry {
    pub fn name(&self) -> &str {
        match self {
            FileEntry::Existing(file) => &file.name,
            FileEntry::Incoming(file) => &file.name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            FileEntry::Existing(file) => file.size,
            FileEntry::Incoming(file) => file.size,
        }
    }

    pub fn content_type(&self) -> &str {
        match self {
            FileEntry::Existing(file) => &file.content_type,
            FileEntry::Incoming(file) => &file.content_type,
        }
    }

    /// Identity key used for dedupe and removal matching.
    ///
    /// Recomputed from the display name on demand so the two can never
    /// drift apart.
    pub fn normalized_name(&self) -> String {
        normalized_name(self.name())
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, FileEntry::Existing(_))
    }

    pub fn is_incoming(&self) -> bool {
        matches!(self, FileEntry::Incoming(_))
    }
}

/// Ordered sequence of stored files owned by one record.
///
/// This is the authoritative attachment set; the reconciliation engine
/// computes its successor from one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedFiles(Vec<StoredFile>);

impl PersistedFiles {
    pub fn new(files: Vec<StoredFile>) -> Self {
        Self(files)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoredFile> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[StoredFile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display names in persisted order, convenient for assertions and logs.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|file| file.name.as_str()).collect()
    }
}

impl From<Vec<StoredFile>> for PersistedFiles {
    fn from(files: Vec<StoredFile>) -> Self {
        Self(files)
    }
}

impl<'a> IntoIterator for &'a PersistedFiles {
    type Item = &'a StoredFile;
    type IntoIter = std::slice::Iter<'a, StoredFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Guess a MIME type from a path, falling back to `application/octet-stream`.
fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
