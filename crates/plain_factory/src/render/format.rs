/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Output format trait for the per-format page pieces.

use crate::metadata::LicenseMetadata;

/// How the pieces that differ between the reader, markdown and plaintext
/// forms of a license are rendered.
pub trait OutputFormat: Default + Clone {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The title and version lines that open the license.
    fn header_block(&self, meta: &LicenseMetadata) -> String;

    /// Render an interpretation note with its title.
    fn interpretation(&self, meta: &LicenseMetadata, title: &str, text: &str) -> String;

    /// The interpretation note, present only for licenses with an official
    /// original and some interpretation text. Otherwise empty.
    fn interpretation_block(&self, meta: &LicenseMetadata) -> String {
        if !meta.has_official() {
            return String::new();
        }
        match &meta.interpretation_text {
            Some(text) => self.interpretation(meta, meta.interpretation_title(), text),
            None => {
                tracing::debug!(format = self.name(), spdx_id = %meta.spdx_id, "no interpretation text");
                String::new()
            }
        }
    }
}

/// `original version: X  |  ` when the original is versioned.
pub(crate) fn original_version_prefix(meta: &LicenseMetadata) -> String {
    meta.original_version
        .as_deref()
        .map(|v| format!("original version: {v}  |  "))
        .unwrap_or_default()
}
