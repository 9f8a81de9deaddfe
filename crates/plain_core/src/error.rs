/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Error types for the text engine.

use thiserror::Error;

use crate::citation::CitationKind;

/// Errors raised by citation, paragraph, and admonition operations.
///
/// Pattern non-matches are never errors; absent constructs pass through
/// the pipelines as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{kind} citation {ordinal} cannot be converted to a footnote")]
    NotConvertible { kind: CitationKind, ordinal: u32 },

    #[error("footnote ordinals start at 1, got {0}")]
    InvalidOrdinal(u32),

    #[error("footnote {0} has an empty body")]
    EmptyFootnote(u32),

    #[error("text contains no paragraphs")]
    NoContent,

    #[error("unknown admonition kind: {0}")]
    UnknownAdmonition(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
