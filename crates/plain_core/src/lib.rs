/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain Core
//!
//! The text engine behind Plain License pages. It understands the reader
//! dialect of markdown (footnotes, `{ .annotate }` annotations, definition
//! lists, admonitions, attribute lists) and lowers it to plain markdown and to
//! plaintext while keeping every footnote number consistent.
//!
//! The pieces:
//!
//! - [`patterns`] holds the compiled text-matching rules;
//! - [`citation`] models footnote and annotation references;
//! - [`paragraph`] keeps a block of text together with its footnotes through
//!   splitting, merging and renumbering;
//! - [`text`] provides the whole-document rewrite passes.
//!
//! # Example
//!
//! ```rust
//! use plain_core::{markdown_to_plaintext, rich_to_markdown};
//!
//! let reader = "See the note(1).\n{ .annotate }\n1. This is the note.";
//! let markdown = rich_to_markdown(reader);
//! assert!(markdown.contains("See the note[^1]."));
//! assert!(markdown.trim_end().ends_with("[^1]: This is the note."));
//!
//! let plaintext = markdown_to_plaintext(&markdown);
//! assert!(!plaintext.contains("[^1]"));
//! ```

pub mod citation;
pub mod error;
pub mod paragraph;
pub mod patterns;
pub mod text;

pub use citation::{Citation, CitationKind, Footnote};
pub use error::{CoreError, Result};
pub use paragraph::{Paragraph, Paragraphs, PARAGRAPH_BREAK};
pub use patterns::{Patterns, PATTERNS};
pub use text::{
    dedent, indent, markdown_to_plaintext, replace_plain_name, replace_year, rich_to_markdown,
    wrap_text, DEFAULT_WRAP_WIDTH,
};
