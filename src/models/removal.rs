// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Removal directives carried by one submission.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{PersistedFiles, StoredFile};
use crate::utils::normalized_basename;

/// Instructions to drop existing files, scoped to a single submission.
///
/// Each directive value names one stored file, either by its identifier or
/// by (normalized) filename; values may also arrive as URLs, in which case
/// only the final path segment counts. The coarse `remove_all` flag empties
/// the whole set and makes individual values irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalDirectives {
    values: BTreeSet<String>,
    remove_all: bool,
}

impl RemovalDirectives {
    /// Directives that remove nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build directives from raw submitted values. Blank values are dropped.
    pub fn new(values: impl IntoIterator<Item = String>, remove_all: bool) -> Self {
        Self {
            values: values
                .into_iter()
                .filter(|value| !value.trim().is_empty())
                .collect(),
            remove_all,
        }
    }

    /// Whether every existing file should be dropped.
    pub fn remove_all(&self) -> bool {
        self.remove_all
    }

    /// True when applying these directives cannot change anything.
    pub fn is_noop(&self) -> bool {
        self.values.is_empty() && !self.remove_all
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|value| value.as_str())
    }

    /// Whether a stored file is named by any directive value.
    ///
    /// An exact identifier match wins outright; otherwise the value's
    /// normalized basename is compared against the file's normalized name.
    pub fn matches(&self, file: &StoredFile) -> bool {
        self.values
            .iter()
            .any(|value| Self::value_matches(value, file))
    }

    /// Directive values that name none of the given files.
    pub fn unmatched(&self, files: &PersistedFiles) -> Vec<&str> {
        self.values
            .iter()
            .map(|value| value.as_str())
            .filter(|value| !files.iter().any(|file| Self::value_matches(value, file)))
            .collect()
    }

    fn value_matches(value: &str, file: &StoredFile) -> bool {
        if !file.id.is_empty() && value == file.id {
            return true;
        }
        normalized_basename(value) == normalized_basename(&file.name)
    }
}
