/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain markdown output format.

use plain_core::{dedent, rich_to_markdown, wrap_text, DEFAULT_WRAP_WIDTH};

use super::format::{original_version_prefix, OutputFormat};
use crate::metadata::LicenseMetadata;

#[derive(Debug, Clone)]
pub struct Markdown {
    pub wrap_width: usize,
}

impl Default for Markdown {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl Markdown {
    pub fn with_width(wrap_width: usize) -> Self {
        Self { wrap_width }
    }
}

impl OutputFormat for Markdown {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn header_block(&self, meta: &LicenseMetadata) -> String {
        format!(
            "> {}plain version: {}\n\n# {}\n\n",
            original_version_prefix(meta),
            meta.plain_version,
            meta.plain_name
        )
    }

    fn interpretation(&self, _meta: &LicenseMetadata, title: &str, text: &str) -> String {
        format!(
            "### {title}\n\n{}",
            wrap_text(&rich_to_markdown(&dedent(text)), self.wrap_width)
        )
    }
}
