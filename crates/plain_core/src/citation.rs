/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Inline citation markers and the footnote bodies they point at.
//!
//! Two kinds of citation appear in reader text:
//!
//! - footnote references, `[^n]`, whose bodies live in out-of-line
//!   `[^n]: body` definitions;
//! - bracket annotations, `(n)`, whose bodies come from the numbered list
//!   that follows an `{ .annotate }` marker.
//!
//! Offsets are byte offsets into the text the citation was parsed from.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::patterns::PATTERNS;

/// Which syntax a citation was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CitationKind {
    Footnote,
    Annotation,
}

impl fmt::Display for CitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationKind::Footnote => write!(f, "footnote"),
            CitationKind::Annotation => write!(f, "annotation"),
        }
    }
}

/// The source match kept alongside an annotation so its body can be
/// extracted later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackingMatch {
    /// The literal marker text, e.g. `(2)`.
    pub matched: String,
    /// The list-item body the marker refers to.
    pub annotation: String,
}

/// An inline citation marker.
///
/// Equality and ordering consider only the span, ordinal and kind; the
/// backing match is payload.
#[derive(Debug, Clone)]
pub struct Citation {
    ordinal: u32,
    kind: CitationKind,
    start: usize,
    end: usize,
    raw_match: Option<BackingMatch>,
}

impl Citation {
    pub fn new(ordinal: u32, kind: CitationKind, span: Range<usize>) -> Self {
        debug_assert!(span.start < span.end, "citation span must be non-empty");
        Self {
            ordinal,
            kind,
            start: span.start,
            end: span.end,
            raw_match: None,
        }
    }

    /// Attach the source match carrying the annotation body.
    pub fn with_backing(mut self, backing: BackingMatch) -> Self {
        self.raw_match = Some(backing);
        self
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn kind(&self) -> CitationKind {
        self.kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn raw_match(&self) -> Option<&BackingMatch> {
        self.raw_match.as_ref()
    }

    /// A copy of this citation carrying a different ordinal.
    pub fn renumbered(&self, ordinal: u32) -> Self {
        Self {
            ordinal,
            ..self.clone()
        }
    }

    /// Convert an annotation into the footnote it stands for.
    ///
    /// Only annotation citations that kept their backing match carry a body.
    /// Footnote references have nothing to convert; their bodies live
    /// elsewhere in the document.
    pub fn to_footnote(&self, override_ordinal: Option<u32>) -> Result<Footnote> {
        match (self.kind, &self.raw_match) {
            (CitationKind::Annotation, Some(backing)) => Footnote::new(
                override_ordinal.unwrap_or(self.ordinal),
                backing.annotation.clone(),
            ),
            _ => Err(CoreError::NotConvertible {
                kind: self.kind,
                ordinal: self.ordinal,
            }),
        }
    }
}

impl PartialEq for Citation {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.ordinal == other.ordinal
            && self.kind == other.kind
    }
}

impl Eq for Citation {}

impl Hash for Citation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.start, self.end, self.ordinal, self.kind).hash(state);
    }
}

impl PartialOrd for Citation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Citation {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end, self.ordinal, self.kind).cmp(&(
            other.start,
            other.end,
            other.ordinal,
            other.kind,
        ))
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CitationKind::Footnote => write!(f, "[^{}]", self.ordinal),
            CitationKind::Annotation => write!(f, "({})", self.ordinal),
        }
    }
}

/// A footnote body: the out-of-line `[^n]: body` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Footnote {
    ordinal: u32,
    body: String,
}

impl Footnote {
    /// Build a footnote, trimming the body.
    pub fn new(ordinal: u32, body: impl Into<String>) -> Result<Self> {
        if ordinal == 0 {
            return Err(CoreError::InvalidOrdinal(ordinal));
        }
        let body = body.into().trim().to_string();
        if body.is_empty() {
            return Err(CoreError::EmptyFootnote(ordinal));
        }
        Ok(Self { ordinal, body })
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn renumbered(&self, ordinal: u32) -> Result<Self> {
        Self::new(ordinal, self.body.clone())
    }

    /// The inline reference for this footnote, `[^n]`.
    pub fn reference(&self) -> String {
        format!("[^{}]", self.ordinal)
    }
}

impl fmt::Display for Footnote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[^{}]: {}", self.ordinal, self.body)
    }
}

/// Every `[^n]` reference in `text`, skipping `[^n]:` definitions.
pub fn parse_footnote_citations(text: &str) -> Vec<Citation> {
    PATTERNS
        .footnote
        .marker
        .captures_iter(text)
        .filter(|caps| caps.name("definition").is_none())
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ordinal = caps["citation"].parse::<u32>().ok().filter(|n| *n > 0)?;
            Some(Citation::new(ordinal, CitationKind::Footnote, whole.range()))
        })
        .collect()
}

/// Every `[^n]: body` definition written out in `text`.
///
/// Definitions with an unusable ordinal are left alone.
pub fn parse_footnote_definitions(text: &str) -> Vec<Footnote> {
    PATTERNS
        .footnote
        .definition
        .captures_iter(text)
        .filter_map(|caps| {
            let ordinal = caps["citation"].parse::<u32>().ok()?;
            Footnote::new(ordinal, &caps["content"]).ok()
        })
        .collect()
}

/// A stretch of text closed by an `{ .annotate }` marker.
///
/// The region runs from the start of the paragraph holding the marker up to
/// the marker itself. The numbered list after the marker supplies the bodies
/// and ends at `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRegion {
    pub start: usize,
    pub marker: Range<usize>,
    pub end: usize,
    pub annotations: IndexMap<u32, String>,
}

impl AnnotatedRegion {
    /// Whether an offset lies in the annotated body (before the marker).
    pub fn covers(&self, offset: usize) -> bool {
        (self.start..self.marker.start).contains(&offset)
    }
}

/// Locate every annotated region in `text`.
pub fn annotated_regions(text: &str) -> Vec<AnnotatedRegion> {
    let mut regions: Vec<AnnotatedRegion> = Vec::new();
    for marker in PATTERNS.annotation.marker.find_iter(text) {
        let floor = regions.last().map_or(0, |r| r.end);
        let start = text[..marker.start()]
            .rfind("\n\n")
            .map_or(0, |i| i + 2)
            .max(floor);
        let line_start = text[..marker.start()].rfind('\n').map_or(0, |i| i + 1);
        let line = &text[line_start..marker.start()];
        let indent = &line[..line.len() - line.trim_start().len()];
        let (annotations, end) = scan_annotation_list(text, marker.end(), indent);
        if annotations.is_empty() {
            tracing::warn!(offset = marker.start(), "annotation marker without an annotation list");
        }
        regions.push(AnnotatedRegion {
            start,
            marker: marker.range(),
            end,
            annotations,
        });
    }
    regions
}

/// Read the numbered list that follows a marker ending at `from`.
///
/// Lines are read relative to `indent`, the indentation of the marker's
/// line. Blank lines may precede and separate items; lines indented by four
/// more spaces or a tab continue the previous item. Returns the items and
/// the offset just past the last consumed line.
fn scan_annotation_list(text: &str, from: usize, indent: &str) -> (IndexMap<u32, String>, usize) {
    let mut annotations: IndexMap<u32, String> = IndexMap::new();
    let mut current: Option<u32> = None;
    let mut end = from;

    // the rest of the marker's own line belongs to the marker
    let mut offset = match text[from..].find('\n') {
        Some(i) => {
            end = from + i;
            from + i + 1
        }
        None => return (annotations, text.len()),
    };

    for line in text[offset..].split_inclusive('\n') {
        let raw = line.trim_end_matches(['\n', '\r']);
        let line_start = offset;
        offset += line.len();

        if raw.trim().is_empty() {
            continue;
        }
        let content = raw.strip_prefix(indent).unwrap_or(raw);
        if let Some(caps) = PATTERNS.annotation.item.captures(content) {
            let Ok(number) = caps["number"].parse::<u32>() else {
                break;
            };
            annotations.insert(number, caps["annotation"].to_string());
            current = Some(number);
        } else if current.is_some() && (content.starts_with("    ") || content.starts_with('\t')) {
            if let Some(body) = current.and_then(|n| annotations.get_mut(&n)) {
                body.push(' ');
                body.push_str(content.trim());
            }
        } else {
            break;
        }
        end = line_start + raw.len();
    }
    (annotations, end)
}

/// Every `(n)` annotation citation in `text`.
///
/// Citations inside an annotated region whose list has an item `n` carry
/// that item as their backing match; any other `(n)` is still reported but
/// cannot be converted.
pub fn parse_annotations(text: &str) -> Vec<Citation> {
    let regions = annotated_regions(text);
    PATTERNS
        .annotation
        .citation
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ordinal = caps["number"].parse::<u32>().ok()?;
            let citation = Citation::new(ordinal, CitationKind::Annotation, whole.range());
            let body = regions
                .iter()
                .find(|r| r.covers(whole.start()))
                .and_then(|r| r.annotations.get(&ordinal));
            Some(match body {
                Some(annotation) => citation.with_backing(BackingMatch {
                    matched: whole.as_str().to_string(),
                    annotation: annotation.clone(),
                }),
                None => citation,
            })
        })
        .collect()
}

/// Rewrite `[^n]` markers (references and definitions) in one pass.
///
/// Ordinals missing from `mapping` are kept as written.
pub fn renumber_markers(text: &str, mapping: &BTreeMap<u32, u32>) -> String {
    if mapping.iter().all(|(from, to)| from == to) {
        return text.to_string();
    }
    PATTERNS
        .footnote
        .marker
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let suffix = caps.name("definition").map_or("", |m| m.as_str());
            match caps["citation"].parse::<u32>().ok().and_then(|n| mapping.get(&n)) {
                Some(to) => format!("[^{to}]{suffix}"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Resolve ordinal collisions between an existing set and an incoming one.
///
/// Each incoming ordinal already present in `existing` is moved to the next
/// free number above every ordinal of all three sets, in ascending order.
/// `reserved` ordinals are never handed out. Returns only the ordinals that
/// move.
pub fn collision_map(
    existing: &BTreeSet<u32>,
    incoming: &BTreeSet<u32>,
    reserved: &BTreeSet<u32>,
) -> BTreeMap<u32, u32> {
    let mut next = existing
        .iter()
        .chain(incoming)
        .chain(reserved)
        .max()
        .copied()
        .unwrap_or(0)
        + 1;
    incoming
        .iter()
        .filter(|n| existing.contains(n))
        .map(|&n| {
            let to = next;
            next += 1;
            (n, to)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footnote_citations_skip_definitions() {
        let text = "One[^1] and two[^2].\n\n[^1]: First.\n[^2]: Second.";
        let citations = parse_footnote_citations(text);
        let ordinals: Vec<u32> = citations.iter().map(Citation::ordinal).collect();
        assert_eq!(ordinals, vec![1, 2]);
        assert_eq!(&text[citations[0].span()], "[^1]");
        assert!(citations.iter().all(|c| c.kind() == CitationKind::Footnote));
    }

    #[test]
    fn test_footnote_definitions() {
        let defs = parse_footnote_definitions("Text[^4].\n\n[^4]: A body.\n[^0]: ignored");
        assert_eq!(defs, vec![Footnote::new(4, "A body.").unwrap()]);
    }

    #[test]
    fn test_annotation_with_region_is_convertible() {
        let text = "See the note(1).\n{ .annotate }\n1. This is the note.";
        let citations = parse_annotations(text);
        assert_eq!(citations.len(), 1);
        let footnote = citations[0].to_footnote(None).unwrap();
        assert_eq!(footnote.ordinal(), 1);
        assert_eq!(footnote.body(), "This is the note.");
        assert_eq!(footnote.to_string(), "[^1]: This is the note.");
    }

    #[test]
    fn test_annotation_override_ordinal() {
        let text = "Item(2).\n{ .annotate }\n\n2. Two.";
        let citation = &parse_annotations(text)[0];
        assert_eq!(citation.to_footnote(Some(7)).unwrap().ordinal(), 7);
    }

    #[test]
    fn test_annotation_outside_region_is_literal() {
        let text = "Section (2) applies.\n\nOther(1).\n{ .annotate }\n1. Body.";
        let citations = parse_annotations(text);
        assert_eq!(citations.len(), 2);
        assert!(citations[0].raw_match().is_none());
        assert!(matches!(
            citations[0].to_footnote(None),
            Err(CoreError::NotConvertible { kind: CitationKind::Annotation, ordinal: 2 })
        ));
        assert!(citations[1].to_footnote(None).is_ok());
    }

    #[test]
    fn test_footnote_kind_is_not_convertible() {
        let citation = Citation::new(1, CitationKind::Footnote, 0..4);
        assert_eq!(
            citation.to_footnote(None),
            Err(CoreError::NotConvertible { kind: CitationKind::Footnote, ordinal: 1 })
        );
    }

    #[test]
    fn test_region_list_continuation() {
        let text = "A(1) b(2).\n{ .annotate }\n\n1. First\n    continued.\n2. Second.\n\nAfter.";
        let regions = annotated_regions(text);
        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.start, 0);
        assert_eq!(region.annotations.get(&1).unwrap(), "First continued.");
        assert_eq!(region.annotations.get(&2).unwrap(), "Second.");
        assert_eq!(&text[region.end..], "\n\nAfter.");
    }

    #[test]
    fn test_region_list_follows_marker_indent() {
        let text = "    Nested(1).\n    { .annotate }\n\n    1. Inside a block.";
        let citations = parse_annotations(text);
        assert_eq!(citations[0].to_footnote(None).unwrap().body(), "Inside a block.");
    }

    #[test]
    fn test_region_starts_at_paragraph() {
        let text = "Intro(1).\n\nBody(1).\n{ .annotate }\n1. Note.";
        let regions = annotated_regions(text);
        assert_eq!(regions[0].start, "Intro(1).\n\n".len());
        let citations = parse_annotations(text);
        assert!(citations[0].raw_match().is_none());
        assert!(citations[1].raw_match().is_some());
    }

    #[test]
    fn test_citation_equality_ignores_backing() {
        let plain = Citation::new(1, CitationKind::Annotation, 3..6);
        let backed = plain.clone().with_backing(BackingMatch {
            matched: "(1)".into(),
            annotation: "x".into(),
        });
        assert_eq!(plain, backed);
        assert_ne!(plain, plain.renumbered(2));
    }

    #[test]
    fn test_citation_ordering_by_start() {
        let mut citations = [
            Citation::new(1, CitationKind::Footnote, 10..14),
            Citation::new(2, CitationKind::Annotation, 2..5),
        ];
        citations.sort();
        assert_eq!(citations[0].start(), 2);
    }

    #[test]
    fn test_footnote_validation() {
        assert_eq!(Footnote::new(0, "x"), Err(CoreError::InvalidOrdinal(0)));
        assert_eq!(Footnote::new(3, "   "), Err(CoreError::EmptyFootnote(3)));
        assert_eq!(Footnote::new(3, " body ").unwrap().body(), "body");
    }

    #[test]
    fn test_renumber_markers_single_pass() {
        let text = "a[^1] b[^2]\n\n[^1]: one\n[^2]: two";
        let mapping = BTreeMap::from([(1, 2), (2, 1)]);
        assert_eq!(
            renumber_markers(text, &mapping),
            "a[^2] b[^1]\n\n[^2]: one\n[^1]: two"
        );
    }

    #[test]
    fn test_collision_map() {
        let existing = BTreeSet::from([1, 2]);
        let incoming = BTreeSet::from([1, 3]);
        let none = BTreeSet::new();
        assert_eq!(collision_map(&existing, &incoming, &none), BTreeMap::from([(1, 4)]));

        let reserved = BTreeSet::from([9]);
        assert_eq!(
            collision_map(&existing, &incoming, &reserved),
            BTreeMap::from([(1, 10)])
        );

        assert!(collision_map(&BTreeSet::from([1]), &BTreeSet::from([2]), &none).is_empty());
    }
}
