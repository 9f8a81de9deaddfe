/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Annotation to footnote lowering.

use std::collections::HashMap;
use std::ops::Range;

use crate::citation::{annotated_regions, parse_annotations, Footnote};
use crate::patterns::PATTERNS;

/// Replace every convertible `(n)` annotation with a `[^m]` footnote
/// reference and append the generated definitions at the end.
///
/// Numbers are handed out in first-occurrence order, starting after the
/// highest footnote ordinal already in the text (so at 1 for text without
/// footnotes), clear of every written one;
/// [`super::realign_footnotes`] puts the combined set in reading order
/// afterwards. A repeated `(n)` inside one region reuses its number. The
/// `{ .annotate }` markers and their lists are removed. Annotations without a
/// body stay as written.
pub fn annotations_to_footnotes(text: &str) -> String {
    let regions = annotated_regions(text);
    if regions.is_empty() {
        return text.to_string();
    }

    let highest = PATTERNS
        .footnote
        .marker
        .captures_iter(text)
        .filter_map(|caps| caps["citation"].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let mut next = highest + 1;

    let mut assigned: HashMap<(usize, u32), u32> = HashMap::new();
    let mut footnotes: Vec<Footnote> = Vec::new();
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for citation in parse_annotations(text) {
        let Some(region) = regions.iter().position(|r| r.covers(citation.start())) else {
            continue;
        };
        let key = (region, citation.ordinal());
        let number = match assigned.get(&key) {
            Some(&number) => number,
            None => match citation.to_footnote(Some(next)) {
                Ok(footnote) => {
                    footnotes.push(footnote);
                    assigned.insert(key, next);
                    next += 1;
                    next - 1
                }
                Err(_) => continue,
            },
        };
        edits.push((citation.span(), format!("[^{number}]")));
    }

    for region in &regions {
        let before = text[..region.marker.start].trim_end_matches([' ', '\t', '\n', '\r']).len();
        edits.push((before.max(region.start)..region.end, String::new()));
    }
    edits.sort_by_key(|(range, _)| range.start);

    let mut body = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        if range.start < cursor {
            continue;
        }
        body.push_str(&text[cursor..range.start]);
        body.push_str(&replacement);
        cursor = range.end;
    }
    body.push_str(&text[cursor..]);

    tracing::debug!(
        regions = regions.len(),
        footnotes = footnotes.len(),
        "converted annotations to footnotes"
    );
    if footnotes.is_empty() {
        return body;
    }
    let definitions: Vec<String> = footnotes.iter().map(Footnote::to_string).collect();
    format!("{}\n\n{}\n", body.trim_end(), definitions.join("\n"))
}
