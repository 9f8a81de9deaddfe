/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorySettings {
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_issues_link")]
    pub issues_link: String,

    #[serde(default = "default_edit_link")]
    pub edit_link: String,

    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_dir: Option<PathBuf>,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            issues_link: default_issues_link(),
            edit_link: default_edit_link(),
            wrap_width: default_wrap_width(),
            output_dir: default_output_dir(),
            snippet_dir: None,
            changelog_dir: None,
        }
    }
}

fn default_site_url() -> String {
    "https://plainlicense.org".to_string()
}

fn default_issues_link() -> String {
    "https://github.com/plainlicense/plainlicense/issues/new/choose".to_string()
}

fn default_edit_link() -> String {
    "https://github.com/plainlicense/plainlicense".to_string()
}

fn default_wrap_width() -> usize {
    plain_core::DEFAULT_WRAP_WIDTH
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl FactorySettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: FactorySettings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn load_from_project() -> Result<Option<Self>> {
        let config_paths = [Path::new("plain-factory.toml"), Path::new(".plain-factory.toml")];

        for path in &config_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading factory settings");
                return Ok(Some(Self::load(path)?));
            }
        }

        Ok(None)
    }

    /// The site URL without a trailing slash.
    pub fn site_root(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: FactorySettings = toml::from_str("wrap_width = 60").unwrap();
        assert_eq!(settings.wrap_width, 60);
        assert_eq!(settings.site_url, "https://plainlicense.org");
        assert_eq!(settings.output_dir, PathBuf::from("assets"));
        assert!(settings.snippet_dir.is_none());
    }

    #[test]
    fn test_load_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain-factory.toml");
        std::fs::write(
            &path,
            "site_url = \"https://example.org/\"\nchangelog_dir = \"changelogs\"\n",
        )
        .unwrap();
        let settings = FactorySettings::load(&path).unwrap();
        assert_eq!(settings.site_root(), "https://example.org");
        assert_eq!(settings.changelog_dir, Some(PathBuf::from("changelogs")));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "wrap_width = \"wide\"").unwrap();
        assert!(matches!(
            FactorySettings::load(&path),
            Err(crate::FactoryError::Config(_))
        ));
    }
}
