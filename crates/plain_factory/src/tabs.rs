/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The named tabs of a license page and their generators.

use std::fmt;
use std::str::FromStr;

use plain_core::{dedent, wrap_text};
use serde::{Deserialize, Serialize};

use crate::error::FactoryError;
use crate::render::{fence_for, tabify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Reader,
    Markdown,
    Plaintext,
    Changelog,
    Official,
    Embed,
}

impl TabKind {
    pub const ALL: [TabKind; 6] = [
        TabKind::Reader,
        TabKind::Markdown,
        TabKind::Plaintext,
        TabKind::Changelog,
        TabKind::Official,
        TabKind::Embed,
    ];

    /// The order tabs appear in on the page.
    pub const PAGE_ORDER: [TabKind; 6] = [
        TabKind::Reader,
        TabKind::Embed,
        TabKind::Markdown,
        TabKind::Plaintext,
        TabKind::Changelog,
        TabKind::Official,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Markdown => "markdown",
            Self::Plaintext => "plaintext",
            Self::Changelog => "changelog",
            Self::Official => "official",
            Self::Embed => "embed",
        }
    }

    /// The label shown on the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Embed => "html",
            other => other.name(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Reader => ":material-book-open-variant:",
            Self::Markdown => ":octicons-markdown-24:",
            Self::Plaintext => ":nounproject-txt:",
            Self::Changelog => ":material-history:",
            Self::Official => ":material-license:",
            Self::Embed => ":material-language-html5:",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Reader => 0,
            Self::Markdown => 1,
            Self::Plaintext => 2,
            Self::Changelog => 3,
            Self::Official => 4,
            Self::Embed => 5,
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TabKind {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.title() == s)
            .ok_or_else(|| FactoryError::Config(format!("unknown tab `{s}`")))
    }
}

fn tab(kind: TabKind, text: &str) -> String {
    tabify(text, kind.title(), 1, Some(kind.icon()))
}

/// The reader tab: the site form of the license with its header, optional
/// interpretation note and disclaimer.
pub fn reader_tab(
    header_block: &str,
    reader_text: &str,
    interpretation_block: Option<&str>,
    disclaimer_block: &str,
) -> String {
    let mut text = format!("\n{header_block}\n{reader_text}\n");
    if let Some(interpretation) = interpretation_block {
        text.push_str(interpretation);
        text.push('\n');
    }
    text.push_str(disclaimer_block);
    text.push('\n');
    tab(TabKind::Reader, &text)
}

/// The markdown tab: the plain markdown in a copyable code block, followed
/// by the disclaimer.
pub fn markdown_tab(
    header_block: &str,
    markdown_text: &str,
    interpretation_block: &str,
    disclaimer_block: &str,
    wrap_width: usize,
) -> String {
    let body = wrap_text(&dedent(&format!("\n{markdown_text}\n")), wrap_width);
    let interpretation = wrap_text(interpretation_block, wrap_width);
    let fence = fence_for(&format!("{header_block}{body}{interpretation}"));
    let text = format!(
        "\n\n{fence}markdown\n\n{header_block}\n\n{body}\n{interpretation}\n{fence}\n\n{disclaimer_block}\n"
    );
    tab(TabKind::Markdown, &text)
}

/// The interpretation and disclaimer that close a plaintext rendering.
#[derive(Debug, Clone, Copy)]
pub struct Boilerplate<'a> {
    pub interpretation: &'a str,
    pub disclaimer: &'a str,
}

/// The inputs of a plaintext rendering.
#[derive(Debug, Clone, Copy)]
pub struct PlaintextParts<'a> {
    pub content: &'a str,
    pub header_block: Option<&'a str>,
    pub boilerplate: Option<Boilerplate<'a>>,
    pub wrap_width: usize,
}

/// Render plaintext as the plaintext tab (a code block inside the tab) when
/// `tabbed`, otherwise as a bare export with no container.
pub fn format_to_plaintext(parts: PlaintextParts<'_>, tabbed: bool) -> String {
    let width = parts.wrap_width;
    let header = parts
        .header_block
        .map(|header| format!("\n\n{header}\n\n"))
        .unwrap_or_default();
    let body = wrap_text(&dedent(&format!("\n{}\n", parts.content)), width);
    let interpretation = parts
        .boilerplate
        .map(|b| wrap_text(b.interpretation, width))
        .unwrap_or_default();

    if !tabbed {
        let disclaimer = parts.boilerplate.map_or("", |b| b.disclaimer);
        let pieces: Vec<&str> = [header.as_str(), &body, &interpretation, disclaimer]
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();
        return format!("{}\n", pieces.join("\n\n"));
    }

    let fence = fence_for(&format!("{header}{body}{interpretation}"));
    let tail = match parts.boilerplate {
        Some(boilerplate) => format!("{interpretation}\n{fence}\n\n{}\n", boilerplate.disclaimer),
        None => format!("\n{fence}\n"),
    };
    tab(
        TabKind::Plaintext,
        &format!("\n\n{fence}plaintext{header}{body}{tail}"),
    )
}

pub fn changelog_tab(changelog_text: &str) -> String {
    tab(TabKind::Changelog, changelog_text)
}

/// The official tab; empty without an official text.
///
/// The official link is appended unless the text already links to itself.
pub fn official_tab(
    original_text: Option<&str>,
    official_link: Option<&str>,
    link_in_original: bool,
) -> String {
    let Some(original) = original_text else {
        return String::new();
    };
    let text = match official_link {
        Some(link) if !link_in_original => format!("{original}\n\n{link}"),
        _ => original.to_string(),
    };
    tab(TabKind::Official, &text)
}

pub fn embed_tab(embed_link: &str, embed_instructions: &str) -> String {
    tab(TabKind::Embed, &format!("{embed_link}{embed_instructions}"))
}
