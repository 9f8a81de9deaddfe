/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Immutable text values that carry their own citations.
//!
//! A [`Paragraph`] owns a trimmed block of text together with the citations
//! found in it and the footnote bodies attached to it. Every operation that
//! changes text or footnotes returns a new value.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexSet;

use crate::citation::{
    collision_map, parse_annotations, parse_footnote_citations, parse_footnote_definitions,
    renumber_markers, Citation, Footnote,
};
use crate::error::{CoreError, Result};
use crate::text::layout::dedent;

/// The separator between paragraphs.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// A text block with its citations and attached footnotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    footnote_citations: Vec<Citation>,
    annotations: Vec<Citation>,
    footnotes: Vec<Footnote>,
}

impl Paragraph {
    /// Build a paragraph from raw text, scanning it for citations.
    ///
    /// The text is dedented and trimmed before it is scanned, so citation
    /// offsets point into [`Paragraph::text`].
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = dedent(text.as_ref()).trim().to_string();
        let footnote_citations = parse_footnote_citations(&text);
        let annotations = parse_annotations(&text);
        Self {
            text,
            footnote_citations,
            annotations,
            footnotes: Vec::new(),
        }
    }

    /// Build a paragraph from already-known parts without rescanning.
    pub fn from_parts(
        text: impl Into<String>,
        footnote_citations: Vec<Citation>,
        annotations: Vec<Citation>,
        footnotes: Vec<Footnote>,
    ) -> Self {
        let mut footnote_citations = footnote_citations;
        let mut annotations = annotations;
        footnote_citations.sort();
        annotations.sort();
        Self {
            text: text.into(),
            footnote_citations,
            annotations,
            footnotes,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn footnote_citations(&self) -> &[Citation] {
        &self.footnote_citations
    }

    pub fn annotations(&self) -> &[Citation] {
        &self.annotations
    }

    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Ordinals referenced in the text, in ascending order.
    pub fn referenced_ordinals(&self) -> BTreeSet<u32> {
        self.footnote_citations.iter().map(Citation::ordinal).collect()
    }

    fn footnote_ordinals(&self) -> BTreeSet<u32> {
        self.footnotes.iter().map(Footnote::ordinal).collect()
    }

    /// Replace the text, recomputing citations and keeping the footnotes.
    pub fn with_text(&self, text: impl AsRef<str>) -> Self {
        Self {
            footnotes: self.footnotes.clone(),
            ..Self::new(text)
        }
    }

    /// Replace the footnotes, keeping the text and its citations.
    pub fn with_footnotes(&self, footnotes: Vec<Footnote>) -> Self {
        Self {
            footnotes,
            ..self.clone()
        }
    }

    /// Append a footnote without renumbering anything.
    pub fn add_footnote(&self, ordinal: u32, body: impl Into<String>) -> Result<Self> {
        let mut footnotes = self.footnotes.clone();
        footnotes.push(Footnote::new(ordinal, body)?);
        Ok(self.with_footnotes(footnotes))
    }

    /// Partition on `delimiter`, carrying into each part only the footnotes
    /// it references.
    ///
    /// Footnotes referenced by no part are dropped. An empty delimiter
    /// returns the paragraph unchanged. Each part is dedented and trimmed
    /// like any new paragraph, so merging the parts back gives the original
    /// text only when parts are separated by exactly one delimiter and carry
    /// no indentation of their own.
    pub fn split_paragraphs(&self, delimiter: &str) -> Vec<Paragraph> {
        if delimiter.is_empty() {
            return vec![self.clone()];
        }
        self.text
            .split(delimiter)
            .filter(|part| !part.trim().is_empty())
            .map(|part| {
                let piece = Paragraph::new(part);
                let referenced = piece.referenced_ordinals();
                let footnotes = self
                    .footnotes
                    .iter()
                    .filter(|f| referenced.contains(&f.ordinal()))
                    .cloned()
                    .collect();
                piece.with_footnotes(footnotes)
            })
            .collect()
    }

    /// Concatenate `other` onto this paragraph.
    ///
    /// Footnotes of `other` whose ordinal is already taken here are moved to
    /// fresh ordinals above every ordinal in play, and the references in
    /// `other`'s text are rewritten to match before joining. A footnote
    /// identical to one already here is shared rather than duplicated.
    pub fn merge_with(&self, other: &Paragraph, separator: &str) -> Paragraph {
        let existing: BTreeSet<u32> = self
            .footnote_ordinals()
            .union(&self.referenced_ordinals())
            .copied()
            .collect();

        let shared: BTreeSet<u32> = other
            .footnotes
            .iter()
            .filter(|f| self.footnotes.contains(f))
            .map(Footnote::ordinal)
            .collect();

        // bare references carry no body to move, so only attached footnotes renumber
        let incoming: BTreeSet<u32> = other
            .footnote_ordinals()
            .difference(&shared)
            .copied()
            .collect();
        let reserved = other.referenced_ordinals();

        let mapping = collision_map(&existing, &incoming, &reserved);
        if !mapping.is_empty() {
            tracing::debug!(?mapping, "renumbering colliding footnotes during merge");
        }

        let other_text = renumber_markers(&other.text, &mapping);
        let mut footnotes = self.footnotes.clone();
        for footnote in &other.footnotes {
            if shared.contains(&footnote.ordinal()) {
                continue;
            }
            let moved = match mapping.get(&footnote.ordinal()) {
                Some(&to) => Footnote::new(to, footnote.body()),
                None => Ok(footnote.clone()),
            };
            // renumbering an already-valid footnote to a positive ordinal cannot fail
            if let Ok(moved) = moved {
                footnotes.push(moved);
            }
        }

        let text = match (self.text.is_empty(), other_text.is_empty()) {
            (true, _) => other_text,
            (_, true) => self.text.clone(),
            _ => format!("{}{separator}{other_text}", self.text),
        };
        Paragraph::new(text).with_footnotes(footnotes)
    }

    /// Renumber footnotes to a dense `1..N` sequence.
    ///
    /// The sequence covers every ordinal that is attached, referenced or
    /// defined in the text, ordered by original ordinal, and every `[^n]`
    /// marker in the text is rewritten in a single pass.
    pub fn with_footnotes_realigned(&self) -> Paragraph {
        let mapping: BTreeMap<u32, u32> = self.ordinals_in_play().into_iter().zip(1..).collect();
        self.renumbered_by(&mapping)
    }

    /// Renumber footnotes to a dense `1..N` sequence in reading order.
    ///
    /// Referenced ordinals are numbered by their first reference in the
    /// text. Ordinals that are attached or defined but never referenced
    /// follow, in ascending order.
    pub fn with_footnotes_in_reading_order(&self) -> Paragraph {
        let mut order: IndexSet<u32> = self
            .footnote_citations
            .iter()
            .map(Citation::ordinal)
            .collect();
        order.extend(self.ordinals_in_play());
        let mapping: BTreeMap<u32, u32> = order.into_iter().zip(1..).collect();
        self.renumbered_by(&mapping)
    }

    fn ordinals_in_play(&self) -> BTreeSet<u32> {
        let mut ordinals = self.footnote_ordinals();
        ordinals.extend(self.referenced_ordinals());
        ordinals.extend(parse_footnote_definitions(&self.text).iter().map(Footnote::ordinal));
        ordinals
    }

    fn renumbered_by(&self, mapping: &BTreeMap<u32, u32>) -> Paragraph {
        let text = renumber_markers(&self.text, mapping);
        let mut footnotes: Vec<Footnote> = self
            .footnotes
            .iter()
            .filter_map(|f| match mapping.get(&f.ordinal()) {
                Some(&to) => f.renumbered(to).ok(),
                None => Some(f.clone()),
            })
            .collect();
        footnotes.sort();

        Paragraph::new(text).with_footnotes(footnotes)
    }

    /// The text followed by its footnote definitions.
    pub fn to_markdown(&self) -> String {
        if self.footnotes.is_empty() {
            return self.text.clone();
        }
        let definitions: Vec<String> = self.footnotes.iter().map(Footnote::to_string).collect();
        format!("{}{PARAGRAPH_BREAK}{}", self.text, definitions.join("\n"))
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Paragraph::new(text)
    }
}

/// A non-empty sequence of paragraphs split on blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraphs(Vec<Paragraph>);

impl Paragraphs {
    /// Split `text` on blank-line separators, dropping blank segments.
    pub fn new(text: &str) -> Result<Self> {
        let paragraphs: Vec<Paragraph> = text
            .split(PARAGRAPH_BREAK)
            .filter(|segment| !segment.trim().is_empty())
            .map(Paragraph::new)
            .collect();
        if paragraphs.is_empty() {
            return Err(CoreError::NoContent);
        }
        Ok(Self(paragraphs))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejoin the paragraphs with blank lines.
    pub fn rich_markdown(&self) -> String {
        self.0
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }

    pub fn into_inner(self) -> Vec<Paragraph> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Paragraphs {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
