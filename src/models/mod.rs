// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between the selection machine, the
//! reconciliation engine, and the storage collaborators.

pub mod file_entry;
pub mod policy;
pub mod removal;

pub use file_entry::{BlobSource, FileEntry, IncomingFile, PersistedFiles, StoredFile};
pub use policy::{
    AttachmentPolicy, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE,
};
pub use removal::RemovalDirectives;
