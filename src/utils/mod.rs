// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the selection machine, the
//! reconciliation engine, and the storage collaborators.

pub mod format;
pub mod hash;
pub mod normalize;

/// Format a byte count with binary units.
pub use format::format_bytes;
/// Compute SHA-256 digests of files and in-memory content.
pub use hash::{hash_bytes, hash_file};
/// Normalize filenames into their comparison and storage form.
pub use normalize::{basename, file_extension, normalized_basename, normalized_name};
