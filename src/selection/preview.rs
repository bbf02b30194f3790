// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Preview-URL resources for image thumbnails.
//!
//! Previews are transient handles that must be released when the entry or
//! the whole selection goes away. The broker tracks issuance outside the
//! selection machine, so a leaked handle stays observable even after the
//! machine itself is dropped.

use std::collections::BTreeSet;

use tracing::warn;

/// Handle to one issued thumbnail preview.
///
/// Deliberately not `Clone`: revocation consumes the handle, so releasing
/// the same preview twice does not compile.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewUrl {
    id: u64,
    url: String,
}

impl PreviewUrl {
    /// The opaque URL the embedder can hand to its rendering layer.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Session-scoped issuer of preview URLs.
#[derive(Debug, Default)]
pub struct PreviewBroker {
    next_id: u64,
    live: BTreeSet<u64>,
}

impl PreviewBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh preview URL for the named entry.
    pub fn issue(&mut self, name: &str) -> PreviewUrl {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);

        PreviewUrl {
            id,
            url: format!("preview://{id}/{name}"),
        }
    }

    /// Release a preview. The handle is consumed, so each preview can be
    /// revoked at most once.
    pub fn revoke(&mut self, preview: PreviewUrl) {
        if !self.live.remove(&preview.id) {
            warn!(url = %preview.url, "revoking a preview this broker never issued");
        }
    }

    /// Number of issued previews that have not been revoked yet.
    ///
    /// A selection that was torn down properly leaves this at zero.
    pub fn live(&self) -> usize {
        self.live.len()
    }
}
