// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filename normalization shared by the selection machine and the
//! reconciliation engine.
//!
//! Two names refer to the same attachment exactly when their normalized
//! forms are equal, so every comparison in the crate goes through
//! [`normalized_name`].

/// Normalize a filename for identity comparison and storage.
///
/// Transliterates Unicode to ASCII, lowercases, and strips all whitespace.
/// `"Übungs Blatt 1.PDF"` becomes `"ubungsblatt1.pdf"`.
pub fn normalized_name(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);

    let mut out = String::with_capacity(transliterated.len());
    for ch in transliterated.chars() {
        if ch.is_whitespace() {
            continue;
        }
        out.push(ch.to_ascii_lowercase());
    }

    out
}

/// Final path segment of a value that may be a bare name, a path, or a URL.
pub fn basename(value: &str) -> &str {
    value.rsplit(['/', '\\']).next().unwrap_or(value)
}

/// Normalized form of the final path segment.
///
/// Removal directives may carry ids, bare names, or full URLs; stored files
/// carry plain names. Reducing both sides with this function makes them
/// comparable.
pub fn normalized_basename(value: &str) -> String {
    normalized_name(basename(value))
}

/// Lowercased extension of a filename, without the dot.
pub fn file_extension(name: &str) -> Option<String> {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
