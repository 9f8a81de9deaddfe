/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Fenced code protection.
//!
//! Code blocks are swapped for single-line placeholders before any rewrite
//! pass runs and swapped back at the end, so their content reaches the output
//! byte for byte. A fence that never closes is not a code block and stays in
//! the text.

use regex::Captures;

use crate::patterns::{PATTERNS, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

/// Languages whose plaintext header shows the block title instead.
const TEXT_LANGUAGES: &[&str] = &["md", "markdown", "plaintext", "text"];

/// Delimiter used for code blocks in plaintext output.
pub const PLAINTEXT_DELIMITER: &str = "===";

/// A fenced code block lifted out of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Whitespace before the opening fence.
    pub indent: String,
    pub language: Option<String>,
    pub title: Option<String>,
    /// Every line of the block, fences included, as written.
    pub lines: Vec<String>,
}

impl CodeBlock {
    /// The lines between the fences.
    pub fn content(&self) -> &[String] {
        self.lines
            .get(1..self.lines.len().saturating_sub(1))
            .unwrap_or(&[])
    }

    /// The plaintext header line for this block.
    pub fn plaintext_header(&self) -> String {
        match (&self.language, &self.title) {
            (Some(lang), Some(title)) if TEXT_LANGUAGES.contains(&lang.as_str()) => {
                format!("{PLAINTEXT_DELIMITER} {}:", title_case(title))
            }
            (Some(lang), _) if TEXT_LANGUAGES.contains(&lang.as_str()) => PLAINTEXT_DELIMITER.to_string(),
            (Some(lang), _) => format!("{PLAINTEXT_DELIMITER} {}", title_case(lang)),
            (None, _) => PLAINTEXT_DELIMITER.to_string(),
        }
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text with its code blocks replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    text: String,
    blocks: Vec<CodeBlock>,
}

fn is_closing_fence(line: &str, fence: &str) -> bool {
    let trimmed = line.trim();
    let Some(marker) = fence.chars().next() else {
        return false;
    };
    trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == marker)
}

/// Lift every closed fenced code block out of `text`.
pub fn protect_code_blocks(text: &str) -> ProtectedText {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut blocks: Vec<CodeBlock> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let Some(open) = PATTERNS.code.fence_open.captures(line) else {
            out.push(line.to_string());
            i += 1;
            continue;
        };
        let fence = &open["fence"];
        let close = lines[i + 1..]
            .iter()
            .position(|l| is_closing_fence(l, fence))
            .map(|offset| i + 1 + offset);
        let Some(close) = close else {
            out.push(line.to_string());
            i += 1;
            continue;
        };

        let info = open.name("info").map_or("", |m| m.as_str());
        let language = info
            .split_whitespace()
            .next()
            .filter(|token| !token.contains('='))
            .map(|token| token.trim_start_matches(['{', '.']).to_lowercase())
            .filter(|token| !token.is_empty());
        let title = PATTERNS
            .code
            .fence_title
            .captures(info)
            .map(|caps| caps["title"].to_string());
        let indent = open["indent"].to_string();

        out.push(format!("{indent}{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", blocks.len()));
        blocks.push(CodeBlock {
            indent,
            language,
            title,
            lines: lines[i..=close].iter().map(|l| l.to_string()).collect(),
        });
        i = close + 1;
    }

    if !blocks.is_empty() {
        tracing::trace!(count = blocks.len(), "protected code blocks");
    }
    ProtectedText {
        text: out.join("\n"),
        blocks,
    }
}

impl ProtectedText {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn blocks(&self) -> &[CodeBlock] {
        &self.blocks
    }

    /// Rewrite the unprotected text, keeping the blocks aside.
    pub fn map(self, f: impl FnOnce(&str) -> String) -> Self {
        Self {
            text: f(&self.text),
            blocks: self.blocks,
        }
    }

    fn restore_with(&self, render: impl Fn(&CodeBlock) -> Vec<String>) -> String {
        PATTERNS
            .code
            .placeholder
            .replace_all(&self.text, |caps: &Captures<'_>| {
                let block = caps["index"]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.blocks.get(i));
                let Some(block) = block else {
                    return caps[0].to_string();
                };
                let prefix = &caps["prefix"];
                render(block)
                    .iter()
                    .map(|line| {
                        let line = line.strip_prefix(block.indent.as_str()).unwrap_or(line);
                        if line.is_empty() {
                            prefix.trim_end().to_string()
                        } else {
                            format!("{prefix}{line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .into_owned()
    }

    /// Put the blocks back exactly as written.
    pub fn restore(&self) -> String {
        self.restore_with(|block| block.lines.clone())
    }

    /// Put the blocks back in the `===` plaintext delimiter form.
    pub fn restore_plaintext(&self) -> String {
        self.restore_with(|block| {
            let mut lines = Vec::with_capacity(block.lines.len());
            lines.push(format!("{}{}", block.indent, block.plaintext_header()));
            lines.extend(block.content().iter().cloned());
            lines.push(format!("{}{PLAINTEXT_DELIMITER}", block.indent));
            lines
        })
    }
}
