// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The submission payload a selection hands to the reconciliation side.

use crate::models::{IncomingFile, RemovalDirectives};

/// Everything one submission says about attachments.
///
/// Produced by [`crate::selection::Selection::serialize`], or assembled via
/// [`SubmissionPayload::from_form`] when the fields arrive as a raw form
/// post from a client the selection machine does not control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// Newly picked files, in selection order.
    pub files: Vec<IncomingFile>,
    /// Removal directive values: stored-file identifiers or names.
    pub removed_files: Vec<String>,
    /// Coarse flag requesting the whole existing set be dropped.
    pub remove_all_files: bool,
}

impl SubmissionPayload {
    /// A payload that asks for nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a payload from raw form fields.
    ///
    /// The remove-all field arrives as whatever string the client chose to
    /// send and goes through [`boolish`]; a missing field means `false`.
    pub fn from_form(
        files: Vec<IncomingFile>,
        removed_files: Vec<String>,
        remove_all_files: Option<&str>,
    ) -> Self {
        Self {
            files,
            removed_files,
            remove_all_files: boolish(remove_all_files),
        }
    }

    /// The directive value object consumed by the reconciliation engine.
    /// Blank directive values are dropped here.
    pub fn directives(&self) -> RemovalDirectives {
        RemovalDirectives::new(self.removed_files.iter().cloned(), self.remove_all_files)
    }
}

/// Cast a boolean-ish form value to a real `bool`.
///
/// The truthy spellings are recognized case-insensitively; anything else,
/// including garbage, is `false`. This never fails.
pub fn boolish(raw: Option<&str>) -> bool {
    const TRUTHY: [&str; 6] = ["1", "true", "t", "on", "yes", "y"];

    match raw {
        Some(value) => {
            let value = value.trim();
            TRUTHY.iter().any(|truthy| value.eq_ignore_ascii_case(truthy))
        }
        None => false,
    }
}
