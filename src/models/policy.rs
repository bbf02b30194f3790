// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Attachment limits shared by the picker and the save-time backstop.

use serde::{Deserialize, Serialize};

use crate::utils::file_extension;

/// Default cap on the number of files one record may hold.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Default per-file size ceiling: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Extensions accepted by default, matching the storage layer's allowlist.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 8] =
    ["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "gif"];

/// Limits a batch of picked files is validated against.
///
/// Embedders usually deserialize this from configuration; the defaults
/// mirror the storage layer so the picker never accepts what a save would
/// later reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentPolicy {
    /// Maximum number of files one record may hold.
    pub max_files: usize,
    /// Per-file size ceiling in bytes.
    pub max_file_size: u64,
    /// Lowercase extensions that are accepted; compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl AttachmentPolicy {
    /// Whether the filename carries an allowed extension.
    ///
    /// Names without any extension are rejected.
    pub fn allows_extension(&self, name: &str) -> bool {
        match file_extension(name) {
            Some(ext) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }

    /// Whether a file of `size` bytes fits under the per-file ceiling.
    pub fn within_size(&self, size: u64) -> bool {
        size <= self.max_file_size
    }
}
