/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Admonition blocks and their GitHub alert counterparts.
//!
//! Reader text uses admonitions (`!!! note "Title"` followed by an indented
//! body). Plain markdown has no such construct, so they are lowered to GitHub
//! alert blockquotes, and plaintext lowers those once more to a
//! `KIND: Title` header line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::patterns::PATTERNS;
use crate::text::layout::dedent;

/// How an admonition opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdmonitionStyle {
    /// `!!!`
    Open,
    /// `???`
    Collapsed,
    /// `???+`
    Expanded,
}

impl FromStr for AdmonitionStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "!!!" => Ok(Self::Open),
            "???" => Ok(Self::Collapsed),
            "???+" => Ok(Self::Expanded),
            other => Err(CoreError::UnknownAdmonition(other.to_string())),
        }
    }
}

impl fmt::Display for AdmonitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "!!!",
            Self::Collapsed => "???",
            Self::Expanded => "???+",
        })
    }
}

/// Every admonition kind the reader syntax supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Admonition {
    Abstract,
    Bug,
    Caution,
    Danger,
    Example,
    Failure,
    Info,
    Note,
    Question,
    Quote,
    Success,
    Tip,
    Warning,
}

impl FromStr for Admonition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abstract" => Ok(Self::Abstract),
            "bug" => Ok(Self::Bug),
            "caution" => Ok(Self::Caution),
            "danger" => Ok(Self::Danger),
            "example" => Ok(Self::Example),
            "failure" => Ok(Self::Failure),
            "info" => Ok(Self::Info),
            "note" => Ok(Self::Note),
            "question" => Ok(Self::Question),
            "quote" => Ok(Self::Quote),
            "success" => Ok(Self::Success),
            "tip" => Ok(Self::Tip),
            "warning" => Ok(Self::Warning),
            _ => Err(CoreError::UnknownAdmonition(s.to_string())),
        }
    }
}

/// GitHub's alert kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GithubAlert {
    Caution,
    Important,
    Note,
    Tip,
    Warning,
}

impl From<Admonition> for GithubAlert {
    fn from(admonition: Admonition) -> Self {
        match admonition {
            Admonition::Abstract
            | Admonition::Info
            | Admonition::Note
            | Admonition::Quote
            | Admonition::Question
            | Admonition::Success => Self::Note,
            Admonition::Tip | Admonition::Example => Self::Tip,
            Admonition::Caution | Admonition::Danger | Admonition::Failure => Self::Caution,
            Admonition::Bug | Admonition::Warning => Self::Warning,
        }
    }
}

impl GithubAlert {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Caution => "CAUTION",
            Self::Important => "IMPORTANT",
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Warning => "WARNING",
        }
    }

    /// The opening blockquote line, `> [!NOTE]`.
    pub fn alert_line(&self) -> String {
        format!("> [!{}]", self.label())
    }
}

impl FromStr for GithubAlert {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAUTION" => Ok(Self::Caution),
            "IMPORTANT" => Ok(Self::Important),
            "NOTE" => Ok(Self::Note),
            "TIP" => Ok(Self::Tip),
            "WARNING" => Ok(Self::Warning),
            other => Err(CoreError::UnknownAdmonition(other.to_string())),
        }
    }
}

/// A parsed admonition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmonitionBlock {
    pub style: AdmonitionStyle,
    pub kind: Admonition,
    pub title: Option<String>,
    /// `inline` or `inline end`, when floated.
    pub inline: Option<String>,
    /// The dedented body.
    pub body: String,
}

impl AdmonitionBlock {
    /// Parse a header line; the body is supplied separately.
    pub fn parse_header(line: &str) -> Option<Result<Self, CoreError>> {
        let caps = PATTERNS.block.admonition.captures(line)?;
        let parsed = caps["style"].parse::<AdmonitionStyle>().and_then(|style| {
            Ok(Self {
                style,
                kind: caps["kind"].parse()?,
                title: caps
                    .name("title")
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|t| !t.is_empty()),
                inline: caps.name("inline").map(|m| m.as_str().to_string()),
                body: String::new(),
            })
        });
        Some(parsed)
    }

    pub fn alert(&self) -> GithubAlert {
        self.kind.into()
    }

    /// Render as a GitHub alert blockquote.
    pub fn to_alert(&self) -> String {
        let mut lines = vec![self.alert().alert_line()];
        if let Some(title) = &self.title {
            lines.push(format!("> **{title}**"));
        }
        for line in self.body.trim_matches('\n').split('\n') {
            if line.trim().is_empty() {
                lines.push(">".to_string());
            } else {
                lines.push(format!("> {line}"));
            }
        }
        lines.join("\n")
    }
}

fn is_body_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with("    ") || line.starts_with('\t')
}

/// Lower every admonition in `text` to a GitHub alert.
///
/// Admonitions of an unknown kind are left exactly as written.
pub fn admonitions_to_alerts(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let block = match AdmonitionBlock::parse_header(lines[i]) {
            Some(Ok(block)) => block,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "leaving admonition untouched");
                out.push(lines[i].to_string());
                i += 1;
                continue;
            }
            None => {
                out.push(lines[i].to_string());
                i += 1;
                continue;
            }
        };

        let mut end = i + 1 + lines[i + 1..].iter().take_while(|l| is_body_line(l)).count();
        // trailing blank lines belong to the surrounding text
        while end > i + 1 && lines[end - 1].trim().is_empty() {
            end -= 1;
        }
        let body = dedent(&lines[i + 1..end].join("\n"));
        out.push(AdmonitionBlock { body, ..block }.to_alert());
        i = end;
    }
    out.join("\n")
}

/// Lower GitHub alerts to a `KIND: Title` line followed by the unquoted body.
pub fn alerts_to_plaintext(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let alert = PATTERNS
            .block
            .alert
            .captures(lines[i])
            .and_then(|caps| caps["alert"].parse::<GithubAlert>().ok());
        let Some(alert) = alert else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };
        let kind = alert.label();
        let body: Vec<&str> = lines[i + 1..]
            .iter()
            .take_while(|l| l.starts_with('>'))
            .map(|l| l.strip_prefix("> ").or_else(|| l.strip_prefix('>')).unwrap_or(*l))
            .collect();
        i += 1 + body.len();

        let title = body
            .first()
            .and_then(|first| first.strip_prefix("**"))
            .and_then(|first| first.strip_suffix("**"))
            .filter(|title| !title.is_empty());
        let rest = if title.is_some() { &body[1..] } else { &body[..] };
        out.push(match title {
            Some(title) => format!("{kind}: {title}"),
            None => format!("{kind}:"),
        });
        let rest: Vec<&str> = rest.iter().copied().skip_while(|l| l.trim().is_empty()).collect();
        if !rest.is_empty() {
            out.push(String::new());
            out.extend(rest.into_iter().map(str::to_string));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustive_alert_mapping() {
        use Admonition::*;
        let cases = [
            (Abstract, GithubAlert::Note),
            (Info, GithubAlert::Note),
            (Note, GithubAlert::Note),
            (Quote, GithubAlert::Note),
            (Question, GithubAlert::Note),
            (Success, GithubAlert::Note),
            (Tip, GithubAlert::Tip),
            (Example, GithubAlert::Tip),
            (Caution, GithubAlert::Caution),
            (Danger, GithubAlert::Caution),
            (Failure, GithubAlert::Caution),
            (Bug, GithubAlert::Warning),
            (Warning, GithubAlert::Warning),
        ];
        for (admonition, alert) in cases {
            assert_eq!(GithubAlert::from(admonition), alert, "{admonition:?}");
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        assert_eq!(
            "sparkle".parse::<Admonition>(),
            Err(CoreError::UnknownAdmonition("sparkle".into()))
        );
        assert_eq!("WARNING".parse::<Admonition>(), Ok(Admonition::Warning));
    }

    #[test]
    fn test_admonition_to_alert() {
        let text = "Before.\n\n!!! warning \"Heads up\"\n\n    First line.\n\n    Second line.\n\nAfter.";
        assert_eq!(
            admonitions_to_alerts(text),
            "Before.\n\n> [!WARNING]\n> **Heads up**\n> First line.\n>\n> Second line.\n\nAfter."
        );
    }

    #[test]
    fn test_collapsible_without_title() {
        let text = "???+ example inline end\n    Body.";
        assert_eq!(admonitions_to_alerts(text), "> [!TIP]\n> Body.");
    }

    #[test]
    fn test_unknown_admonition_untouched() {
        let text = "!!! sparkle \"Shiny\"\n    Body.";
        assert_eq!(admonitions_to_alerts(text), text);
    }

    #[test]
    fn test_alert_to_plaintext() {
        let text = "> [!WARNING]\n> **Heads up**\n> First line.\n>\n> Second line.\n\nAfter.";
        assert_eq!(
            alerts_to_plaintext(text),
            "WARNING: Heads up\n\nFirst line.\n\nSecond line.\n\nAfter."
        );
        assert_eq!(alerts_to_plaintext("> [!NOTE]\n> Body."), "NOTE:\n\nBody.");
    }
}
