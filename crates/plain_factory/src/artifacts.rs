/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Naming and writing of the per-license artifact files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::license::LicenseContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    FullMarkdown,
    EmbedBlock,
    EmbedInstructions,
    MkdocsMarkdown,
    Plaintext,
    Changelog,
    OfficialMarkdown,
    OfficialPlaintext,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::FullMarkdown,
        ArtifactKind::EmbedBlock,
        ArtifactKind::EmbedInstructions,
        ArtifactKind::MkdocsMarkdown,
        ArtifactKind::Plaintext,
        ArtifactKind::Changelog,
        ArtifactKind::OfficialMarkdown,
        ArtifactKind::OfficialPlaintext,
    ];

    pub fn stem(&self) -> &'static str {
        match self {
            Self::FullMarkdown => "full-markdown",
            Self::EmbedBlock => "embed-block",
            Self::EmbedInstructions => "embed-instructions",
            Self::MkdocsMarkdown => "mkdocs-markdown",
            Self::Plaintext => "plaintext",
            Self::Changelog => "changelog",
            Self::OfficialMarkdown => "official-markdown",
            Self::OfficialPlaintext => "official-plaintext",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::EmbedBlock => "html",
            Self::Plaintext | Self::OfficialPlaintext => "txt",
            _ => "md",
        }
    }

    pub fn is_official(&self) -> bool {
        matches!(self, Self::OfficialMarkdown | Self::OfficialPlaintext)
    }
}

/// File names for one license version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    root: PathBuf,
    spdx_id: String,
    version: String,
}

impl ArtifactPaths {
    pub fn new(root: impl Into<PathBuf>, spdx_id: &str, version: &str) -> Self {
        Self {
            root: root.into(),
            spdx_id: spdx_id.to_lowercase(),
            version: version.to_string(),
        }
    }

    pub fn for_license(root: impl Into<PathBuf>, license: &LicenseContent) -> Self {
        let meta = license.meta();
        Self::new(root, &meta.spdx_id, &meta.plain_version)
    }

    /// `<root>/<spdx>/<version>`
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.spdx_id).join(&self.version)
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir().join(format!(
            "{}-{}-{}.{}",
            kind.stem(),
            self.spdx_id,
            self.version,
            kind.extension()
        ))
    }
}

/// Every artifact of `license` with its content. The official artifacts are
/// left out for licenses without an official text.
pub fn collect_artifacts(license: &LicenseContent) -> Vec<(ArtifactKind, String)> {
    ArtifactKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let content = match kind {
                ArtifactKind::FullMarkdown => Some(license.license_content().to_string()),
                ArtifactKind::EmbedBlock => license.embed_block(),
                ArtifactKind::EmbedInstructions => Some(license.embed().to_string()),
                ArtifactKind::MkdocsMarkdown => Some(license.reader().to_string()),
                ArtifactKind::Plaintext => Some(license.plaintext_content()),
                ArtifactKind::Changelog => Some(license.changelog().to_string()),
                ArtifactKind::OfficialMarkdown => {
                    license.has_official().then(|| license.official().to_string())
                }
                ArtifactKind::OfficialPlaintext => license.original_plaintext_content(),
            };
            content.map(|content| (kind, content))
        })
        .collect()
}

/// Write every artifact under `root`, returning the written paths.
pub fn write_artifacts(license: &LicenseContent, root: &Path) -> Result<Vec<PathBuf>> {
    let paths = ArtifactPaths::for_license(root, license);
    fs::create_dir_all(paths.dir())?;

    let mut written = Vec::new();
    for (kind, content) in collect_artifacts(license) {
        let path = paths.path(kind);
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        written.push(path);
    }
    tracing::info!(
        spdx_id = %license.meta().spdx_id,
        count = written.len(),
        dir = %paths.dir().display(),
        "artifacts written"
    );
    Ok(written)
}
