/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The fixed catalog of text-matching rules.
//!
//! Every rule is compiled once, on first use, into the process-wide
//! [`PATTERNS`] registry. Rules are grouped by the construct they recognize
//! and can also be looked up by a dotted name (`"footnote.marker"`), which is
//! what tests and diagnostics use.
//!
//! The `regex` crate has no lookaround, so rules that would need a negative
//! lookahead capture the disambiguating suffix as an optional group instead
//! (see [`FootnotePatterns::marker`]).

use std::sync::LazyLock;

use regex::Regex;

/// The global pattern registry.
pub static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::compile);

/// Footnote references and definitions.
#[derive(Debug)]
pub struct FootnotePatterns {
    /// Any `[^n]` marker. The optional `definition` group is set when the
    /// marker is immediately followed by `:`.
    pub marker: Regex,
    /// A whole `[^n]: body` definition line.
    pub definition: Regex,
}

/// Bracket annotations: `(n)` citations, the `{ .annotate }` marker and the
/// numbered list carrying their bodies.
#[derive(Debug)]
pub struct AnnotationPatterns {
    pub citation: Regex,
    pub marker: Regex,
    /// One `n. body` list item (applied per line).
    pub item: Regex,
}

/// Fenced code. Fences are matched line by line since closing fences must
/// repeat the opening fence character.
#[derive(Debug)]
pub struct CodePatterns {
    pub fence_open: Regex,
    /// `title="..."` inside a fence info string.
    pub fence_title: Regex,
    /// A line holding the placeholder left behind while a block is
    /// protected, with whatever prefix the line has gained since.
    pub placeholder: Regex,
}

/// Definition lists (`term` line, then `:   body`).
#[derive(Debug)]
pub struct DefinitionPatterns {
    pub block: Regex,
}

/// Headers, inline emphasis, links and images.
#[derive(Debug)]
pub struct MarkdownPatterns {
    pub header: Regex,
    /// Header markers, `**strong**`, `*em*` and `` `code` `` in one alternation.
    pub emphasis: Regex,
    pub link: Regex,
    pub image: Regex,
    /// `{ .classname }` attribute lists left over from the reader syntax.
    pub format_class: Regex,
    /// A line holding nothing but a format class.
    pub format_class_line: Regex,
    pub excess_newlines: Regex,
}

/// Template tokens substituted at ingestion.
#[derive(Debug)]
pub struct TemplatePatterns {
    pub year: Regex,
    pub plain_name: Regex,
}

/// Block-level extensions: admonitions, GitHub alerts and snippet includes.
#[derive(Debug)]
pub struct BlockPatterns {
    pub admonition: Regex,
    pub alert: Regex,
    pub snippet: Regex,
}

/// All compiled patterns, grouped by domain.
#[derive(Debug)]
pub struct Patterns {
    pub footnote: FootnotePatterns,
    pub annotation: AnnotationPatterns,
    pub code: CodePatterns,
    pub definition: DefinitionPatterns,
    pub markdown: MarkdownPatterns,
    pub template: TemplatePatterns,
    pub block: BlockPatterns,
}

/// Private-use delimiters around a protected code block index.
pub const PLACEHOLDER_OPEN: char = '\u{E000}';
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';

fn compile(name: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern `{name}` is invalid: {e}"))
}

impl Patterns {
    /// Every name accepted by [`Patterns::get`].
    pub const NAMES: &'static [&'static str] = &[
        "footnote.marker",
        "footnote.definition",
        "annotation.citation",
        "annotation.marker",
        "annotation.item",
        "code.fence_open",
        "code.fence_title",
        "code.placeholder",
        "definition.block",
        "markdown.header",
        "markdown.emphasis",
        "markdown.link",
        "markdown.image",
        "markdown.format_class",
        "markdown.format_class_line",
        "markdown.excess_newlines",
        "template.year",
        "template.plain_name",
        "block.admonition",
        "block.alert",
        "block.snippet",
    ];

    fn compile() -> Self {
        Self {
            footnote: FootnotePatterns {
                marker: compile("footnote.marker", r"\[\^(?P<citation>\d+)\](?P<definition>:)?"),
                definition: compile(
                    "footnote.definition",
                    r"(?m)^[ \t]*\[\^(?P<citation>\d+)\]:[ \t]*(?P<content>.*\S)[ \t]*$",
                ),
            },
            annotation: AnnotationPatterns {
                citation: compile("annotation.citation", r"\((?P<number>[1-9])\)"),
                marker: compile("annotation.marker", r"\{[ \t]{0,2}\.annotate[ \t]{0,2}\}"),
                item: compile(
                    "annotation.item",
                    r"^[ \t]{0,3}(?P<number>[1-9])\.[ \t]{1,2}(?P<annotation>\S.*?)[ \t]*$",
                ),
            },
            code: CodePatterns {
                fence_open: compile(
                    "code.fence_open",
                    r"^(?P<indent>[ \t]*)(?P<fence>`{3,}|~{3,})[ \t]*(?P<info>[^`]*?)[ \t]*$",
                ),
                fence_title: compile("code.fence_title", r#"title=["'](?P<title>[^"']*)["']"#),
                placeholder: compile(
                    "code.placeholder",
                    "(?m)^(?P<prefix>[^\n\u{E000}]*)\u{E000}(?P<index>\\d+)\u{E001}[ \t]*$",
                ),
            },
            definition: DefinitionPatterns {
                block: compile(
                    "definition.block",
                    r"(?m)^(?P<term>[^\s:>#|\-*][^\n]*)\n(?:[ \t]*\n)?[ ]{0,3}:[ ]{1,3}(?P<def>[^\n]*(?:\n(?:[ ]{4}|\t)[^\n]*)*)",
                ),
            },
            markdown: MarkdownPatterns {
                header: compile(
                    "markdown.header",
                    r"(?m)^(?P<level>#{1,6})[ \t]+(?P<header>[^\n]*\S)[ \t]*$",
                ),
                emphasis: compile(
                    "markdown.emphasis",
                    r"(?m)^#{1,6}[ \t]+|\*\*(?P<strong>[^*\s](?:[^\n]*?[^*\s])?)\*\*|\*(?P<em>[^*\s](?:[^*\n]*?[^*\s])?)\*|`(?P<code>[^`\n]+?)`",
                ),
                link: compile(
                    "markdown.link",
                    r#"\[(?P<text>[^\]\n]*)\]\((?P<url>[^)\s]+)(?:[ \t]+"(?P<title>[^"]*)")?\)"#,
                ),
                image: compile(
                    "markdown.image",
                    r#"!\[(?P<text>[^\]\n]*)\]\((?P<url>[^)\s]+)(?:[ \t]+"(?P<title>[^"]*)")?\)"#,
                ),
                format_class: compile("markdown.format_class", r"[ \t]*\{[ \t]{0,2}\.[\w-]+[ \t]{0,2}\}"),
                format_class_line: compile(
                    "markdown.format_class_line",
                    r"(?m)^[ \t]*\{[ \t]{0,2}\.[\w-]+[ \t]{0,2}\}[ \t]*\n?",
                ),
                excess_newlines: compile("markdown.excess_newlines", r"\n[ \t]*\n(?:[ \t]*\n)+"),
            },
            template: TemplatePatterns {
                year: compile("template.year", r"\{\{\s*year\s*\}\}"),
                plain_name: compile("template.plain_name", r"\{\{\s*plain_name\s*(?:\|\s*trim\s*)?\}\}"),
            },
            block: BlockPatterns {
                admonition: compile(
                    "block.admonition",
                    r#"^(?P<style>!!!|\?\?\?\+?)[ \t]+(?P<kind>\w+)(?:[ \t]+(?P<inline>inline(?:[ \t]+end)?))?(?:[ \t]+"(?P<title>[^"]*)")?[ \t]*$"#,
                ),
                alert: compile("block.alert", r"^>[ \t]?\[!(?P<alert>[A-Z]+)\][ \t]*$"),
                snippet: compile(
                    "block.snippet",
                    r#"(?m)^(?P<indent>[ \t]*)(?:-{1,}8<-{1,})[ \t]+["'](?P<path>[^"'\n]+)["'][ \t]*$"#,
                ),
            },
        }
    }

    /// Look a pattern up by its dotted name.
    pub fn get(&self, name: &str) -> Option<&Regex> {
        let (group, rule) = name.split_once('.')?;
        let found = match (group, rule) {
            ("footnote", "marker") => &self.footnote.marker,
            ("footnote", "definition") => &self.footnote.definition,
            ("annotation", "citation") => &self.annotation.citation,
            ("annotation", "marker") => &self.annotation.marker,
            ("annotation", "item") => &self.annotation.item,
            ("code", "fence_open") => &self.code.fence_open,
            ("code", "fence_title") => &self.code.fence_title,
            ("code", "placeholder") => &self.code.placeholder,
            ("definition", "block") => &self.definition.block,
            ("markdown", "header") => &self.markdown.header,
            ("markdown", "emphasis") => &self.markdown.emphasis,
            ("markdown", "link") => &self.markdown.link,
            ("markdown", "image") => &self.markdown.image,
            ("markdown", "format_class") => &self.markdown.format_class,
            ("markdown", "format_class_line") => &self.markdown.format_class_line,
            ("markdown", "excess_newlines") => &self.markdown.excess_newlines,
            ("template", "year") => &self.template.year,
            ("template", "plain_name") => &self.template.plain_name,
            ("block", "admonition") => &self.block.admonition,
            ("block", "alert") => &self.block.alert,
            ("block", "snippet") => &self.block.snippet,
            _ => return None,
        };
        Some(found)
    }
}
