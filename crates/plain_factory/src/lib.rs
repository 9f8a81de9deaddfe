/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain Factory
//!
//! Assembles Plain License pages from license metadata and reader text. A
//! [`LicenseContent`] renders the six page tabs (reader, markdown, plaintext,
//! changelog, official, embed), the assembled page body, a plaintext export
//! and the embed page, using the text engine in [`plain_core`].
//!
//! # Example
//!
//! ```rust
//! use plain_factory::{FactorySettings, LicenseContent, LicenseMetadata, TabKind};
//!
//! let meta = LicenseMetadata::from_yaml_str(r#"
//! plain_name: Unlicense
//! spdx_id: Unlicense
//! category: public-domain
//! reader_license_text: |
//!   You can do anything(1) with this work.
//!   { .annotate }
//!   1. Really, anything.
//! "#).unwrap();
//!
//! let license = LicenseContent::with_year(meta, FactorySettings::default(), 2025).unwrap();
//! assert!(license.markdown_license_text().contains("anything[^1]"));
//! assert_eq!(license.tab(TabKind::Official), "");
//! assert!(license.license_content().contains("/// admonition | The Unlicense"));
//! ```

pub mod artifacts;
pub mod boilerplate;
pub mod build;
pub mod config;
pub mod error;
pub mod license;
pub mod metadata;
pub mod render;
pub mod snippets;
pub mod tabs;
pub mod tags;

pub use artifacts::{collect_artifacts, write_artifacts, ArtifactKind, ArtifactPaths};
pub use build::BuildStatus;
pub use config::FactorySettings;
pub use error::{FactoryError, Result};
pub use license::LicenseContent;
pub use metadata::{LicenseMetadata, LicenseType};
pub use render::{Markdown, OutputFormat, PlainText, Reader};
pub use tabs::TabKind;
pub use tags::{map_tags, PlainTag};
