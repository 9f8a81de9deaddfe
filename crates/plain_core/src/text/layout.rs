/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Indentation and line-wrapping helpers.

/// Default wrapping width for markdown and plaintext bodies.
pub const DEFAULT_WRAP_WIDTH: usize = 70;

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or(a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}

/// Remove the whitespace prefix shared by every non-blank line.
///
/// Whitespace-only lines become empty and do not count toward the prefix.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every non-blank line with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Lines that must never be reflowed.
fn is_structural(trimmed: &str) -> bool {
    trimmed.starts_with('#')
        || trimmed.starts_with('|')
        || trimmed.starts_with('<')
        || trimmed.starts_with("[^")
        || trimmed.starts_with("!!!")
        || trimmed.starts_with("???")
}

fn is_fence(trimmed: &str) -> bool {
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// The prefix continuation lines inherit from `line`.
fn continuation_prefix(line: &str) -> String {
    let lead = leading_whitespace(line);
    let rest = &line[lead.len()..];
    if rest.starts_with("> ") || rest == ">" {
        return format!("{lead}> ");
    }
    if rest.starts_with("- ") || rest.starts_with("* ") || rest.starts_with("+ ") {
        return format!("{lead}  ");
    }
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && rest[digits..].starts_with(". ") {
        return format!("{lead}{}", " ".repeat(digits + 2));
    }
    lead.to_string()
}

/// Greedily wrap one line to `width` columns without breaking words.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let lead = leading_whitespace(line);
    let next_prefix = continuation_prefix(line);
    let rest = &line[lead.len()..];
    // a blockquote's own marker is part of the first line's lead
    let (first_prefix, body) = match rest.strip_prefix("> ") {
        Some(body) => (format!("{lead}> "), body),
        None => (lead.to_string(), rest),
    };

    let mut lines = Vec::new();
    let mut current = first_prefix.clone();
    let mut current_width = first_prefix.chars().count();
    let mut has_word = false;
    for word in body.split_whitespace() {
        let word_width = word.chars().count();
        if has_word && current_width + 1 + word_width > width {
            lines.push(std::mem::replace(&mut current, next_prefix.clone()));
            current_width = next_prefix.chars().count();
            has_word = false;
        }
        if has_word {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
        has_word = true;
    }
    lines.push(current);
    lines
}

/// Wrap running text to `width` columns, line by line.
///
/// Fenced code, `===` plaintext code blocks, headings, tables, HTML,
/// footnote definitions and admonition headers pass through untouched.
/// Blockquote and list continuations keep their prefix.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut fence: Option<String> = None;
    let mut in_plain_block = false;

    for line in text.split('\n') {
        let trimmed = line.trim_start();
        if let Some(open) = &fence {
            if trimmed.starts_with(open.as_str()) && trimmed.trim_end().chars().all(|c| c == '`' || c == '~') {
                fence = None;
            }
            out.push(line.to_string());
            continue;
        }
        if is_fence(trimmed) {
            let marker: String = trimmed.chars().take_while(|c| *c == '`' || *c == '~').collect();
            fence = Some(marker);
            out.push(line.to_string());
            continue;
        }
        if trimmed.starts_with("===") {
            // a bare "===" closes, anything else opens
            in_plain_block = !(in_plain_block && trimmed.trim_end() == "===");
            out.push(line.to_string());
            continue;
        }
        if in_plain_block || trimmed.is_empty() || is_structural(trimmed) {
            out.push(line.to_string());
            continue;
        }
        out.extend(wrap_line(line, width));
    }
    out.join("\n")
}
