/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::*;
use crate::citation::{parse_footnote_definitions, Footnote};
use proptest::prelude::*;

const NOTE_DOC: &str = "See the note(1).\n{ .annotate }\n1. This is the note.";

#[test]
fn test_rich_to_markdown_converts_annotation() {
    let markdown = rich_to_markdown(NOTE_DOC);
    assert!(markdown.contains("See the note[^1]."));
    assert!(!markdown.contains("(1)"));
    assert!(!markdown.contains(".annotate"));
    assert!(markdown.trim_end().ends_with("[^1]: This is the note."));
}

#[test]
fn test_markdown_to_plaintext_keeps_note_readable() {
    let plaintext = markdown_to_plaintext(&rich_to_markdown(NOTE_DOC));
    assert!(!plaintext.contains("[^1]"));
    assert!(!plaintext.contains("[^"));
    assert!(plaintext.contains("See the note[1]."));
    assert!(plaintext.trim_end().ends_with("[1] This is the note."));
}

#[test]
fn test_code_block_survives_plaintext() {
    let markdown = "Keep **this** plain.\n\n```text\nliteral **bold** and `tick`\n```\n\nAnd *that*.";
    let plaintext = markdown_to_plaintext(markdown);
    assert!(plaintext.contains("literal **bold** and `tick`"));
    assert!(plaintext.contains("Keep this plain."));
    assert!(plaintext.contains("And that."));
    assert!(plaintext.contains("===\nliteral"));
}

#[test]
fn test_code_block_survives_markdown() {
    let reader = "Text(1).\n{ .annotate }\n1. Note.\n\n```\n(1) { .annotate }\n1. inside\n```";
    let markdown = rich_to_markdown(reader);
    assert!(markdown.contains("```\n(1) { .annotate }\n1. inside\n```"));
    assert!(markdown.contains("Text[^1]."));
}

#[test]
fn test_definitions_markdown_and_plaintext() {
    let text = "Intro.\n\n`Licensor`\n:   The person giving permission.\n\nOutro.";
    assert_eq!(
        process_definitions(text, DefinitionTarget::Markdown),
        "Intro.\n\n\n`Licensor`:\nThe person giving permission.\n\n\nOutro."
    );
    assert_eq!(
        process_definitions(text, DefinitionTarget::Plaintext),
        "Intro.\n\n\nLicensor - The person giving permission.\n\n\nOutro."
    );
}

#[test]
fn test_definition_continuation_lines() {
    let text = "Work\n:   The thing\n    you made.";
    assert_eq!(
        process_definitions(text, DefinitionTarget::Markdown),
        "\nWork:\nThe thing\nyou made.\n"
    );
}

#[test]
fn test_headers_upper_and_stripped() {
    let plaintext = markdown_to_plaintext("# The MIT License\n\n## You **can** use it\n\nBody.");
    assert_eq!(plaintext, "THE MIT LICENSE\n\nYOU CAN USE IT\n\nBody.\n");
}

#[test]
fn test_strip_markup_single_pass() {
    assert_eq!(strip_markup("**bold**, *em* and `code`"), "bold, em and code");
    assert_eq!(strip_markup("3 * 4 * 5"), "3 * 4 * 5");
}

#[test]
fn test_rewrite_links_and_images() {
    assert_eq!(
        rewrite_links("See [our site](https://plainlicense.org \"home\") and ![logo](logo.svg)."),
        "See our site (https://plainlicense.org) and logo (logo.svg)."
    );
    assert_eq!(rewrite_links("[https://x.org](https://x.org)"), "https://x.org");
}

#[test]
fn test_format_classes_removed() {
    assert_eq!(
        strip_format_classes("A paragraph { .note }\n{ .annotate }\nnext"),
        "A paragraph\nnext"
    );
}

#[test]
fn test_admonition_lowering_through_both_pipelines() {
    let reader = "!!! note \"Keep in mind\"\n\n    You **must** share alike.\n\nAfter.";
    let markdown = rich_to_markdown(reader);
    assert_eq!(
        markdown,
        "> [!NOTE]\n> **Keep in mind**\n> You **must** share alike.\n\nAfter.\n"
    );
    let plaintext = markdown_to_plaintext(&markdown);
    assert_eq!(plaintext, "NOTE: Keep in mind\n\nYou must share alike.\n\nAfter.\n");
}

#[test]
fn test_code_inside_admonition() {
    let reader = "!!! example \"Try\"\n\n    ```\n    a  **b**\n    ```";
    let markdown = rich_to_markdown(reader);
    assert_eq!(markdown, "> [!TIP]\n> **Try**\n> ```\n> a  **b**\n> ```\n");
}

#[test]
fn test_pipelines_realign_footnotes() {
    let reader = "Hand[^5] written.\n\nAnd noted(1).\n{ .annotate }\n1. Converted.\n\n[^5]: By hand.";
    let markdown = rich_to_markdown(reader);
    assert!(markdown.starts_with("Hand[^1] written."));
    assert!(markdown.contains("noted[^2]."));
    assert!(markdown.contains("[^1]: By hand."));
    assert!(markdown.trim_end().ends_with("[^2]: Converted."));
}

#[test]
fn test_unreferenced_definition_keeps_its_own_number() {
    let reader = "Only[^2] here.\n\n[^1]: Orphan body.\n[^2]: Real body.";
    assert_eq!(
        rich_to_markdown(reader),
        "Only[^1] here.\n\n[^2]: Orphan body.\n[^1]: Real body.\n"
    );
}

#[test]
fn test_annotation_before_written_footnote_numbers_first() {
    let reader = "Noted(1).\n{ .annotate }\n1. Converted.\n\nLater[^1].\n\n[^1]: Hand.";
    let markdown = rich_to_markdown(reader);
    assert!(markdown.starts_with("Noted[^1]."));
    assert!(markdown.contains("Later[^2]."));
    assert!(markdown.contains("[^1]: Converted."));
    assert!(markdown.contains("[^2]: Hand."));
}

#[test]
fn test_blank_lines_collapsed() {
    assert_eq!(collapse_blank_lines("a\n\n\n\nb\n \n\t\nc"), "a\n\nb\n\nc");
}

#[test]
fn test_replace_plain_name() {
    assert_eq!(
        replace_plain_name("Reading {{ plain_name | trim }}", " MIT License "),
        "Reading MIT License"
    );
}

#[test]
fn test_unmatched_constructs_pass_through() {
    let text = "Nothing (special) here [^x] or **unclosed.";
    assert_eq!(rich_to_markdown(text), format!("{text}\n"));
}

proptest! {
    #[test]
    fn prop_year_substitution_is_idempotent(prefix in "[a-z ]{0,12}", suffix in "[a-z ]{0,12}", year in 1990i32..2100) {
        let text = format!("{prefix}{{{{ year }}}}{suffix}");
        let once = replace_year_with(&text, year);
        prop_assert_eq!(replace_year_with(&once, year), once.clone());
        prop_assert!(once.contains(&year.to_string()));
    }

    #[test]
    fn prop_markdown_definitions_are_unique_and_in_reading_order(
        refs in prop::collection::vec(1u32..9, 1..6),
        orphans in prop::collection::btree_set(1u32..12, 0..4),
        separator in prop::sample::select(vec!["\n", "\n\n", "\n\n\n"]),
    ) {
        let words: Vec<String> = refs.iter().enumerate().map(|(i, n)| format!("w{i}[^{n}]")).collect();
        let mut seen: Vec<u32> = Vec::new();
        for n in &refs {
            if !seen.contains(n) {
                seen.push(*n);
            }
        }
        let mut definitions: Vec<String> = seen.iter().map(|n| format!("[^{n}]: ref {n}")).collect();
        let orphans: Vec<u32> = orphans.into_iter().filter(|n| !seen.contains(n)).collect();
        definitions.extend(orphans.iter().map(|n| format!("[^{n}]: orphan {n}")));
        let reader = format!("{}\n\n{}", words.join(" "), definitions.join(separator));

        let markdown = rich_to_markdown(&reader);
        let written = parse_footnote_definitions(&markdown);
        let mut numbers: Vec<u32> = written.iter().map(Footnote::ordinal).collect();
        numbers.sort_unstable();
        let expected: Vec<u32> = (1..=(seen.len() + orphans.len()) as u32).collect();
        prop_assert_eq!(numbers, expected);

        for (k, old) in seen.iter().enumerate() {
            let wanted = format!("ref {old}");
            let body = written.iter().find(|f| f.ordinal() == k as u32 + 1).map(Footnote::body);
            prop_assert_eq!(body, Some(wanted.as_str()));
        }
        for (k, old) in orphans.iter().enumerate() {
            let number = (seen.len() + k) as u32 + 1;
            let wanted = format!("orphan {old}");
            let body = written.iter().find(|f| f.ordinal() == number).map(Footnote::body);
            prop_assert_eq!(body, Some(wanted.as_str()));
        }
    }

    #[test]
    fn prop_plaintext_never_shows_footnote_carets(n in 1u32..9) {
        let reader = format!("Clause(1) text.\n{{ .annotate }}\n1. Note {n}.");
        let plaintext = markdown_to_plaintext(&rich_to_markdown(&reader));
        prop_assert!(!plaintext.contains("[^"));
    }
}

#[test]
fn test_replace_year_current() {
    let year = Utc::now().year().to_string();
    assert_eq!(replace_year("© {{ year }}"), format!("© {year}"));
}
