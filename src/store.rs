// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Blob storage collaborators.
//!
//! Stores are append-only: every write mints a fresh identifier and content
//! behind an identifier never changes. Reconciliation only ever swaps which
//! identifiers a record holds, so replacing a file is a new blob plus a
//! dropped reference, never an overwrite.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{IncomingFile, StoredFile};
use crate::utils::{hash_bytes, normalized_name};

/// Append-only storage for attachment content.
pub trait BlobStore {
    /// Persist the upload's content under a fresh identifier and return
    /// the stored descriptor.
    fn store(&mut self, upload: &IncomingFile) -> Result<StoredFile>;

    /// Fetch stored content by identifier.
    fn open(&self, id: &str) -> Result<Vec<u8>>;
}

/// Filesystem-backed store laid out as `<root>/<id>/<name>`.
///
/// Filenames are normalized at store time so every path stays ASCII-safe.
/// A SHA-256 digest is recorded per blob and checked again when the blob is
/// opened.
#[derive(Debug)]
pub struct DiskBlobStore {
    root: PathBuf,
    digests: HashMap<String, String>,
}

impl DiskBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            digests: HashMap::new(),
        }
    }
}

impl BlobStore for DiskBlobStore {
    fn store(&mut self, upload: &IncomingFile) -> Result<StoredFile> {
        let content = upload.read()?;
        let id = Uuid::new_v4().to_string();
        let name = stored_name(&upload.name);

        let dir = self.root.join(&id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create blob directory {:?}", dir))?;
        let path = dir.join(&name);
        fs::write(&path, &content).with_context(|| format!("Failed to write blob {:?}", path))?;

        self.digests.insert(id.clone(), hash_bytes(&content));
        info!(id = %id, name = %name, size = content.len(), "stored blob on disk");

        Ok(StoredFile {
            url: path.to_string_lossy().into_owned(),
            id,
            name,
            size: content.len() as u64,
            content_type: upload.content_type.clone(),
        })
    }

    fn open(&self, id: &str) -> Result<Vec<u8>> {
        let dir = self.root.join(id);
        let mut entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read blob directory {:?}", dir))?;
        let entry = match entries.next() {
            Some(entry) => {
                entry.with_context(|| format!("Failed to list blob directory {:?}", dir))?
            }
            None => bail!("No content stored under blob id {id}"),
        };

        let path = entry.path();
        let content =
            fs::read(&path).with_context(|| format!("Failed to read blob {:?}", path))?;

        if let Some(expected) = self.digests.get(id) {
            let actual = hash_bytes(&content);
            if &actual != expected {
                bail!(
                    "Blob {} was modified after it was stored:\n  expected SHA-256: {}\n  current SHA-256: {}",
                    id,
                    expected,
                    actual
                );
            }
        }

        Ok(content)
    }
}

/// In-memory store for tests and storage-less embedding.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: BTreeMap<String, (StoredFile, Vec<u8>)>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs ever stored; nothing is ever deleted.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn store(&mut self, upload: &IncomingFile) -> Result<StoredFile> {
        let content = upload.read()?;
        let id = Uuid::new_v4().to_string();
        let name = stored_name(&upload.name);

        let file = StoredFile {
            url: format!("memory://{id}/{name}"),
            id: id.clone(),
            name,
            size: content.len() as u64,
            content_type: upload.content_type.clone(),
        };
        debug!(id = %id, size = content.len(), "stored blob in memory");
        self.blobs.insert(id, (file.clone(), content));

        Ok(file)
    }

    fn open(&self, id: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(id)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| anyhow!("No content stored under blob id {id}"))
    }
}

/// Normalized filename a blob is stored under, with a fallback for names
/// that normalize away entirely.
fn stored_name(name: &str) -> String {
    let normalized = normalized_name(name);
    if normalized.is_empty() {
        "upload".to_string()
    } else {
        normalized
    }
}
