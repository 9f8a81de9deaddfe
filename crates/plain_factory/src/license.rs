/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The per-license aggregate.
//!
//! A [`LicenseContent`] owns one license's metadata and reader text and
//! lazily derives every rendering of it. Each derived string is computed at
//! most once per instance; build a new instance for a new assembly pass.

use std::cell::OnceCell;
use std::fs;
use std::path::Path;

use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use plain_core::text::replace_year_with;
use plain_core::{dedent, markdown_to_plaintext, rich_to_markdown, Paragraphs};
use serde_json::{json, Value};

use crate::boilerplate::{
    embed_instructions, embed_link, extract_iframe, not_advice_text, not_official_text,
    DEFAULT_CHANGELOG,
};
use crate::config::FactorySettings;
use crate::error::Result;
use crate::metadata::{LicenseMetadata, LicenseType};
use crate::render::{
    blockify, disclaimer_block, BlockOption, Markdown, OutputFormat, PlainText, Reader,
};
use crate::snippets::expand_snippets;
use crate::tabs::{self, Boilerplate, PlaintextParts, TabKind};

#[derive(Debug)]
pub struct LicenseContent {
    meta: LicenseMetadata,
    settings: FactorySettings,
    year: i32,
    reader_text: String,
    changelog_text: String,
    original_text: Option<String>,
    markdown_text: OnceCell<String>,
    plaintext_text: OnceCell<String>,
    tabs: [OnceCell<String>; 6],
    page: OnceCell<String>,
}

impl LicenseContent {
    /// Build for the current year.
    pub fn new(meta: LicenseMetadata, settings: FactorySettings) -> Result<Self> {
        Self::with_year(meta, settings, Utc::now().year())
    }

    /// Build with a fixed year for `{{ year }}` placeholders.
    pub fn with_year(meta: LicenseMetadata, settings: FactorySettings, year: i32) -> Result<Self> {
        let snippet_base = settings
            .snippet_dir
            .clone()
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        let expanded = expand_snippets(&meta.reader_license_text, &snippet_base)?;
        let reader_text = replace_year_with(&dedent(&expanded), year).trim().to_string();
        let original_text = meta
            .original_license_text
            .as_deref()
            .map(|text| replace_year_with(&dedent(text), year).trim().to_string());
        let changelog_text = load_changelog(&meta, &settings)?;

        tracing::debug!(spdx_id = %meta.spdx_id, year, "license content ready");
        Ok(Self {
            meta,
            settings,
            year,
            reader_text,
            changelog_text,
            original_text,
            markdown_text: OnceCell::new(),
            plaintext_text: OnceCell::new(),
            tabs: Default::default(),
            page: OnceCell::new(),
        })
    }

    pub fn meta(&self) -> &LicenseMetadata {
        &self.meta
    }

    pub fn settings(&self) -> &FactorySettings {
        &self.settings
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn has_official(&self) -> bool {
        self.original_text.is_some()
    }

    /// The reader text after snippet expansion and year substitution.
    pub fn reader_license_text(&self) -> &str {
        &self.reader_text
    }

    pub fn markdown_license_text(&self) -> &str {
        self.markdown_text.get_or_init(|| {
            tracing::trace!(spdx_id = %self.meta.spdx_id, "rendering markdown text");
            rich_to_markdown(&self.reader_text)
        })
    }

    pub fn plaintext_license_text(&self) -> &str {
        self.plaintext_text.get_or_init(|| {
            tracing::trace!(spdx_id = %self.meta.spdx_id, "rendering plaintext text");
            markdown_to_plaintext(self.markdown_license_text())
        })
    }

    pub fn changelog_text(&self) -> &str {
        &self.changelog_text
    }

    pub fn original_license_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn header_block<F: OutputFormat>(&self, format: &F) -> String {
        format.header_block(&self.meta)
    }

    pub fn interpretation_block<F: OutputFormat>(&self, format: &F) -> String {
        format.interpretation_block(&self.meta)
    }

    fn not_advice(&self) -> String {
        not_advice_text(
            self.meta.issues_link(&self.settings),
            self.meta.edit_link(&self.settings),
        )
    }

    /// Original name and not-official text, for licenses with an official
    /// original.
    fn not_official(&self) -> Option<(&str, String)> {
        if !self.has_official() {
            return None;
        }
        let original_name = self.meta.original_name.as_deref()?;
        let text = not_official_text(
            &self.meta.plain_name,
            original_name,
            self.meta.original_organization.as_deref()?,
            self.meta.original_url.as_deref()?,
        );
        Some((original_name, text))
    }

    /// The tabbed disclaimer shown on the page.
    pub fn disclaimer_block(&self) -> String {
        let official = self.not_official();
        disclaimer_block(
            &self.meta.plain_name,
            &self.not_advice(),
            official.as_ref().map(|(name, text)| (*name, text.as_str())),
        )
    }

    /// The disclaimer as plain text, for exports outside the page.
    pub fn plaintext_disclaimer(&self) -> String {
        let mut text = markdown_to_plaintext(&self.not_advice());
        if let Some((_, not_official)) = self.not_official() {
            text.push_str("\n\n");
            text.push_str(&markdown_to_plaintext(&not_official));
        }
        text
    }

    /// One tab's rendering; empty for the official tab without an official
    /// text.
    pub fn tab(&self, kind: TabKind) -> &str {
        self.tabs[kind.index()].get_or_init(|| {
            tracing::debug!(spdx_id = %self.meta.spdx_id, tab = %kind, "rendering tab");
            self.render_tab(kind)
        })
    }

    fn render_tab(&self, kind: TabKind) -> String {
        let width = self.settings.wrap_width;
        match kind {
            TabKind::Reader => {
                let interpretation = self.interpretation_block(&Reader);
                tabs::reader_tab(
                    &self.header_block(&Reader),
                    &self.reader_text,
                    Some(interpretation.as_str()).filter(|s| !s.is_empty()),
                    &self.disclaimer_block(),
                )
            }
            TabKind::Markdown => {
                let format = Markdown::with_width(width);
                tabs::markdown_tab(
                    &self.header_block(&format),
                    self.markdown_license_text(),
                    &self.interpretation_block(&format),
                    &self.disclaimer_block(),
                    width,
                )
            }
            TabKind::Plaintext => {
                let header = self.header_block(&PlainText);
                let interpretation = self.interpretation_block(&PlainText);
                let disclaimer = self.disclaimer_block();
                tabs::format_to_plaintext(
                    PlaintextParts {
                        content: self.plaintext_license_text(),
                        header_block: Some(&header),
                        boilerplate: Some(Boilerplate {
                            interpretation: &interpretation,
                            disclaimer: &disclaimer,
                        }),
                        wrap_width: width,
                    },
                    true,
                )
            }
            TabKind::Changelog => tabs::changelog_tab(&self.changelog_text),
            TabKind::Official => tabs::official_tab(
                self.original_text.as_deref(),
                self.meta.official_link.as_deref(),
                self.meta.link_in_original,
            ),
            TabKind::Embed => tabs::embed_tab(&self.embed_link(), &self.embed_instructions()),
        }
    }

    pub fn reader(&self) -> &str {
        self.tab(TabKind::Reader)
    }

    pub fn markdown(&self) -> &str {
        self.tab(TabKind::Markdown)
    }

    pub fn plaintext(&self) -> &str {
        self.tab(TabKind::Plaintext)
    }

    pub fn changelog(&self) -> &str {
        self.tab(TabKind::Changelog)
    }

    pub fn official(&self) -> &str {
        self.tab(TabKind::Official)
    }

    pub fn embed(&self) -> &str {
        self.tab(TabKind::Embed)
    }

    /// The tabs that appear on the page, in page order.
    pub fn page_tabs(&self) -> Vec<TabKind> {
        TabKind::PAGE_ORDER
            .into_iter()
            .filter(|kind| *kind != TabKind::Official || self.has_official())
            .collect()
    }

    /// The assembled page body: every applicable tab inside one collapsible
    /// block, then the outro.
    pub fn license_content(&self) -> &str {
        self.page.get_or_init(|| {
            let tabs: Vec<&str> = self.page_tabs().into_iter().map(|kind| self.tab(kind)).collect();
            let mut page = blockify(
                &tabs.join("\n"),
                "admonition",
                &self.meta.title(),
                6,
                &[("type", BlockOption::value("license"))],
            );
            match &self.meta.outro {
                Some(outro) => {
                    page.push_str("\n\n");
                    page.push_str(outro);
                    page.push('\n');
                }
                None => page.push('\n'),
            }
            tracing::debug!(spdx_id = %self.meta.spdx_id, tabs = tabs.len(), "assembled page");
            page
        })
    }

    pub fn license_type(&self) -> LicenseType {
        self.meta.license_type()
    }

    /// The plaintext export: body, interpretation and disclaimer with no tab
    /// or fence around them.
    pub fn plaintext_content(&self) -> String {
        let interpretation = self.interpretation_block(&PlainText);
        let disclaimer = self.plaintext_disclaimer();
        tabs::format_to_plaintext(
            PlaintextParts {
                content: self.plaintext_license_text(),
                header_block: None,
                boilerplate: Some(Boilerplate {
                    interpretation: &interpretation,
                    disclaimer: &disclaimer,
                }),
                wrap_width: self.settings.wrap_width,
            },
            false,
        )
    }

    /// The official text as plaintext, when there is one.
    pub fn original_plaintext_content(&self) -> Option<String> {
        let original = self.original_text.as_deref()?;
        let plaintext = markdown_to_plaintext(original);
        Some(tabs::format_to_plaintext(
            PlaintextParts {
                content: &plaintext,
                header_block: None,
                boilerplate: None,
                wrap_width: self.settings.wrap_width,
            },
            false,
        ))
    }

    pub fn embed_link(&self) -> String {
        embed_link(
            &self.meta.embed_url(&self.settings),
            &self.meta.title(),
            &self.meta.page_url(&self.settings),
        )
    }

    pub fn embed_instructions(&self) -> String {
        embed_instructions(&self.meta.embed_url(&self.settings), self.settings.site_root())
    }

    /// The bare iframe element for the embed artifact.
    pub fn embed_block(&self) -> Option<String> {
        extract_iframe(&self.embed_link()).map(str::to_string)
    }

    /// The body of the embed page: the reader form alone in a single block.
    pub fn embed_file_markdown(&self) -> String {
        let body = dedent(&format!(
            "\n{}\n{}\n",
            self.header_block(&Reader),
            self.reader_text
        ));
        blockify(
            &body,
            "admonition",
            &format!(
                "Plain License: <span class='detail-title-highlight'>{}</span>",
                self.meta.title()
            ),
            3,
            &[("type", BlockOption::value("license"))],
        )
    }

    /// Derived attributes to merge back into the site's page metadata.
    pub fn attributes(&self) -> IndexMap<String, Value> {
        let tags: Vec<String> = self.meta.tags().iter().map(ToString::to_string).collect();
        let mut attrs = IndexMap::new();
        attrs.insert("title".to_string(), json!(self.meta.title()));
        attrs.insert("year".to_string(), json!(self.year));
        attrs.insert("reader_license_text".to_string(), json!(self.reader_text));
        attrs.insert(
            "markdown_license_text".to_string(),
            json!(self.markdown_license_text()),
        );
        attrs.insert(
            "plaintext_license_text".to_string(),
            json!(self.plaintext_license_text()),
        );
        attrs.insert("plain_version".to_string(), json!(self.meta.plain_version));
        attrs.insert("license_type".to_string(), json!(self.license_type()));
        attrs.insert("tags".to_string(), json!(tags));
        attrs.insert("changelog".to_string(), json!(self.changelog()));
        attrs.insert(
            "original_license_text".to_string(),
            json!(self.original_text.as_deref().unwrap_or_default()),
        );
        attrs.insert("has_official".to_string(), json!(self.has_official()));
        attrs.insert("final_markdown".to_string(), json!(self.license_content()));
        attrs.insert(
            "embed_file_markdown".to_string(),
            json!(self.embed_file_markdown()),
        );
        attrs
    }

    /// The markdown text decomposed into paragraphs with their footnotes.
    pub fn paragraphs(&self) -> Result<Paragraphs> {
        Ok(Paragraphs::new(self.markdown_license_text())?)
    }
}

/// The metadata changelog, else `<changelog_dir>/<spdx>.md`, else the
/// default placeholder.
fn load_changelog(meta: &LicenseMetadata, settings: &FactorySettings) -> Result<String> {
    if let Some(changelog) = &meta.changelog {
        return Ok(changelog.clone());
    }
    if let Some(dir) = &settings.changelog_dir {
        for name in [meta.spdx_id.clone(), meta.spdx_lower()] {
            let path = dir.join(format!("{name}.md"));
            if path.is_file() {
                tracing::debug!(path = %path.display(), "reading changelog");
                return Ok(fs::read_to_string(path)?);
            }
        }
    }
    tracing::warn!(spdx_id = %meta.spdx_id, "no changelog found; using the default");
    Ok(DEFAULT_CHANGELOG.to_string())
}
