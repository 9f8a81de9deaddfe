/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Whole-document text transformations.
//!
//! Every function here is a pure `&str -> String` rewrite. Constructs that do
//! not match are left as literal text. The passes compose into two pipelines:
//!
//! - [`rich_to_markdown`] lowers reader text (annotations, definition lists,
//!   admonitions, attribute lists) to plain GitHub-flavoured markdown;
//! - [`markdown_to_plaintext`] lowers that markdown to plain text.
//!
//! Both protect fenced code first and restore it last.

pub mod admonitions;
pub mod annotations;
pub mod code;
pub mod layout;

use chrono::{Datelike, Utc};
use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::paragraph::Paragraph;
use crate::patterns::PATTERNS;

pub use admonitions::{admonitions_to_alerts, alerts_to_plaintext};
pub use annotations::annotations_to_footnotes;
pub use code::{protect_code_blocks, ProtectedText};
pub use layout::{dedent, indent, wrap_text, DEFAULT_WRAP_WIDTH};

/// Replace `{{ year }}` with the current year.
pub fn replace_year(text: &str) -> String {
    replace_year_with(text, Utc::now().year())
}

/// Replace `{{ year }}` with `year`.
pub fn replace_year_with(text: &str, year: i32) -> String {
    PATTERNS
        .template
        .year
        .replace_all(text, year.to_string().as_str())
        .into_owned()
}

/// Replace `{{ plain_name }}` (optionally `| trim`) with `name`.
pub fn replace_plain_name(text: &str, name: &str) -> String {
    PATTERNS
        .template
        .plain_name
        .replace_all(text, regex::NoExpand(name.trim()))
        .into_owned()
}

/// Which output a definition list is rewritten for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionTarget {
    Markdown,
    Plaintext,
}

/// Rewrite definition-list entries for `target`.
///
/// Markdown gets `term:` followed by the body on the next line; plaintext
/// gets `term - body` with backticks dropped from the term.
pub fn process_definitions(text: &str, target: DefinitionTarget) -> String {
    let mut count = 0usize;
    let out = PATTERNS
        .definition
        .block
        .replace_all(text, |caps: &Captures<'_>| {
            count += 1;
            let term = caps["term"].trim();
            let body = dedent_definition(&caps["def"]);
            match target {
                DefinitionTarget::Markdown => format!("\n{term}:\n{body}\n"),
                DefinitionTarget::Plaintext => format!("\n{} - {body}\n", term.replace('`', "")),
            }
        })
        .into_owned();
    if count > 0 {
        tracing::debug!(count, ?target, "processed definitions");
    }
    out
}

/// Join a definition body, dropping the continuation indent.
fn dedent_definition(def: &str) -> String {
    def.split('\n')
        .map(|line| {
            line.strip_prefix("    ")
                .or_else(|| line.strip_prefix('\t'))
                .unwrap_or(line)
                .trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Drop `{ .classname }` attribute lists.
pub fn strip_format_classes(text: &str) -> String {
    let text = PATTERNS.markdown.format_class_line.replace_all(text, "");
    PATTERNS
        .markdown
        .format_class
        .replace_all(&text, "")
        .into_owned()
}

/// Replace each header line with its uppercased text.
pub fn uppercase_headers(text: &str) -> String {
    PATTERNS
        .markdown
        .header
        .replace_all(text, |caps: &Captures<'_>| format!("{}\n", caps["header"].to_uppercase()))
        .into_owned()
}

/// Strip header markers, `**strong**`, `*em*` and `` `code` `` in one pass,
/// keeping the inner text.
pub fn strip_markup(text: &str) -> String {
    PATTERNS
        .markdown
        .emphasis
        .replace_all(text, |caps: &Captures<'_>| {
            ["strong", "em", "code"]
                .iter()
                .find_map(|name| caps.name(name))
                .map_or(String::new(), |m| m.as_str().to_string())
        })
        .into_owned()
}

fn text_with_url(caps: &Captures<'_>) -> String {
    let text = caps["text"].trim();
    let url = &caps["url"];
    if text.is_empty() || text == url {
        url.to_string()
    } else {
        format!("{text} ({url})")
    }
}

/// Rewrite images, then links, to `text (url)`.
pub fn rewrite_links(text: &str) -> String {
    let text = PATTERNS.markdown.image.replace_all(text, text_with_url);
    PATTERNS
        .markdown
        .link
        .replace_all(&text, text_with_url)
        .into_owned()
}

/// Turn `[^n]` references into `[n]` and `[^n]: body` into `[n] body`.
pub fn footnotes_to_plaintext(text: &str) -> String {
    PATTERNS
        .footnote
        .marker
        .replace_all(text, |caps: &Captures<'_>| format!("[{}]", &caps["citation"]))
        .into_owned()
}

/// Collapse runs of blank lines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    PATTERNS
        .markdown
        .excess_newlines
        .replace_all(text, "\n\n")
        .into_owned()
}

/// Renumber every footnote in `text` to a dense `1..N` sequence, numbered
/// by first reference. Definitions nobody references go last.
pub fn realign_footnotes(text: &str) -> String {
    Paragraph::new(text)
        .with_footnotes_in_reading_order()
        .text()
        .to_string()
}

fn finish(text: &str) -> String {
    format!("{}\n", text.trim_end())
}

/// Lower reader text to plain markdown.
pub fn rich_to_markdown(text: &str) -> String {
    let protected = protect_code_blocks(text).map(|body| {
        let body = annotations_to_footnotes(body);
        let body = realign_footnotes(&body);
        let body = process_definitions(&body, DefinitionTarget::Markdown);
        let body = admonitions_to_alerts(&body);
        let body = strip_format_classes(&body);
        collapse_blank_lines(&body)
    });
    finish(&protected.restore())
}

/// Lower plain markdown to plaintext.
pub fn markdown_to_plaintext(text: &str) -> String {
    let protected = protect_code_blocks(text).map(|body| {
        let body = process_definitions(body, DefinitionTarget::Plaintext);
        let body = alerts_to_plaintext(&body);
        let body = uppercase_headers(&body);
        let body = strip_markup(&body);
        let body = rewrite_links(&body);
        let body = footnotes_to_plaintext(&body);
        let body = strip_format_classes(&body);
        collapse_blank_lines(&body)
    });
    finish(&protected.restore_plaintext())
}

#[cfg(test)]
mod tests;
