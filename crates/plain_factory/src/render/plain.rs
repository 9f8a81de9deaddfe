/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain text output format.

use plain_core::{dedent, markdown_to_plaintext, replace_plain_name, rich_to_markdown};

use super::format::{original_version_prefix, OutputFormat};
use crate::metadata::LicenseMetadata;

#[derive(Debug, Default, Clone)]
pub struct PlainText;

impl OutputFormat for PlainText {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn header_block(&self, meta: &LicenseMetadata) -> String {
        format!(
            "{}plain version: {}\n\n{}\n\n",
            original_version_prefix(meta),
            meta.plain_version,
            meta.plain_name.to_uppercase()
        )
    }

    fn interpretation(&self, meta: &LicenseMetadata, title: &str, text: &str) -> String {
        // titles may name the license through the template variable
        let title = replace_plain_name(title, &meta.title().to_uppercase()).to_uppercase();
        let body = markdown_to_plaintext(&rich_to_markdown(&dedent(text)));
        format!("{title}\n\n{body}")
    }
}
