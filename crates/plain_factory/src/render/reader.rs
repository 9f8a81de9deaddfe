/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Reader (site) output format.

use plain_core::dedent;

use super::blockify;
use super::format::OutputFormat;
use crate::metadata::LicenseMetadata;

#[derive(Debug, Default, Clone)]
pub struct Reader;

impl OutputFormat for Reader {
    fn name(&self) -> &'static str {
        "reader"
    }

    fn header_block(&self, meta: &LicenseMetadata) -> String {
        let original_version = meta
            .original_version
            .as_deref()
            .map(|v| {
                format!("<span class='license original_version'>original version: {v}</span><br />")
            })
            .unwrap_or_default();
        let plain_version = format!(
            "<span class='license plain_version'>plain version: {}</span>",
            meta.plain_version
        );
        format!(
            "<div class='license license-header'>\n# {}\n\n<div class='version-info'>{original_version}{plain_version}</div></div>",
            meta.plain_name
        )
    }

    fn interpretation(&self, _meta: &LicenseMetadata, title: &str, text: &str) -> String {
        blockify(&dedent(text), "note", title, 4, &[])
    }
}
