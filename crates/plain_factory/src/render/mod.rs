/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Rendering utilities for license pages.
//!
//! Pages are assembled from two containers understood by the site: content
//! tabs (`=== "title"` with an indented body) and blocks (`/// kind | title`
//! fenced by a run of slashes). Everything here is pure string building.

pub mod format;
pub mod markdown;
pub mod plain;
pub mod reader;
mod test_formats;

pub use format::OutputFormat;
pub use markdown::Markdown;
pub use plain::PlainText;
pub use reader::Reader;

use indexmap::IndexMap;
use plain_core::{dedent, indent};

/// Wrap `text` in a content tab.
///
/// The body is dedented and then indented four spaces per `level`; the tab
/// line itself sits one level shallower.
pub fn tabify(text: &str, title: &str, level: usize, icon: Option<&str>) -> String {
    let level = level.max(1);
    let indentation = " ".repeat(4 * level);
    let title_indent = " ".repeat(4 * (level - 1));
    let icon = icon.map(|icon| format!("{icon} ")).unwrap_or_default();
    format!(
        "{title_indent}=== \"{icon}{title}\"\n\n{}\n",
        indent(&dedent(text), &indentation)
    )
}

/// A block header option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOption {
    Value(String),
    Map(IndexMap<String, String>),
}

impl BlockOption {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }
}

/// Wrap `text` in a `/// kind | title` block.
///
/// Options are rendered below the header line; empty values are skipped and
/// map values are written inline as `{ key: value, ... }`.
pub fn blockify(
    text: &str,
    kind: &str,
    title: &str,
    separator_count: usize,
    options: &[(&str, BlockOption)],
) -> String {
    let separator = "/".repeat(separator_count);
    let pad = " ".repeat(separator_count + 1);
    let mut option_block = String::new();
    for (key, value) in options {
        match value {
            BlockOption::Map(map) => {
                let entries: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                option_block.push_str(&format!("{pad} {key}: {{ {} }}\n", entries.join(", ")));
            }
            BlockOption::Value(v) if !v.is_empty() => {
                option_block.push_str(&format!("{pad}{key}: {v}\n"));
            }
            BlockOption::Value(_) => {}
        }
    }
    format!("\n{separator} {kind} | {title}\n{option_block}\n{text}\n{separator}\n")
}

/// A backtick fence long enough to enclose `content`.
pub fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// The legal disclaimer: always the not-advice tab, plus a not-official tab
/// when there is an official license to point to.
///
/// `official` is the original license name and its not-official text.
pub fn disclaimer_block(plain_name: &str, not_advice: &str, official: Option<(&str, &str)>) -> String {
    const NOT_ADVICE_TITLE: &str = "legal advice";
    let Some((original_name, not_official)) = official else {
        return tabify(not_advice, NOT_ADVICE_TITLE, 2, None);
    };
    format!(
        "<div class='admonition warning'><p class='admonition-title'>The {plain_name} isn't...</p>\n\n{}{}</div>",
        tabify(not_advice, NOT_ADVICE_TITLE, 1, None),
        tabify(not_official, &format!("the official {original_name}"), 1, None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabify_levels() {
        assert_eq!(
            tabify("line one\n\nline two", "reader", 1, Some(":icon:")),
            "=== \":icon: reader\"\n\n    line one\n\n    line two\n"
        );
        assert_eq!(
            tabify("  nested", "inner", 2, None),
            "    === \"inner\"\n\n        nested\n"
        );
    }

    #[test]
    fn test_blockify_options() {
        let mut classes = IndexMap::new();
        classes.insert("class".to_string(), "wide".to_string());
        let block = blockify(
            "Body.",
            "admonition",
            "The MIT License",
            3,
            &[
                ("type", BlockOption::value("license")),
                ("open", BlockOption::value("")),
                ("attrs", BlockOption::Map(classes)),
            ],
        );
        assert_eq!(
            block,
            "\n/// admonition | The MIT License\n    type: license\n     attrs: { class: wide }\n\nBody.\n///\n"
        );
    }

    #[test]
    fn test_fence_outgrows_content() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("has ```code``` inside"), "````");
        assert_eq!(fence_for("`````"), "``````");
    }

    #[test]
    fn test_disclaimer_with_and_without_official() {
        let bare = disclaimer_block("MIT License", "Not advice.", None);
        assert_eq!(bare, "    === \"legal advice\"\n\n        Not advice.\n");

        let full = disclaimer_block("MIT License", "Not advice.", Some(("MIT", "Not official.")));
        assert!(full.starts_with("<div class='admonition warning'><p class='admonition-title'>The MIT License isn't...</p>"));
        assert!(full.contains("=== \"legal advice\"\n\n    Not advice.\n"));
        assert!(full.contains("=== \"the official MIT\"\n\n    Not official.\n"));
        assert!(full.ends_with("</div>"));
    }
}
