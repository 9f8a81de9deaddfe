/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Loading license metadata files.

use anyhow::{bail, Context, Result};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use plain_factory::{FactorySettings, LicenseMetadata};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Load license metadata from a YAML, JSON or markdown file.
///
/// Markdown files carry the metadata as YAML frontmatter; the body becomes
/// the reader text unless the frontmatter already has one.
pub fn load_metadata(path: &Path) -> Result<LicenseMetadata> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let meta = match extension.as_str() {
        "yaml" | "yml" => LicenseMetadata::from_yaml_str(&content)?,
        "json" => LicenseMetadata::from_json_str(&content)?,
        "md" | "markdown" => LicenseMetadata::from_value(frontmatter_value(&content)?)?,
        other => bail!("unsupported license file type `{other}`: {}", path.display()),
    };
    tracing::debug!(path = %path.display(), spdx_id = %meta.spdx_id, "loaded metadata");
    Ok(meta)
}

fn frontmatter_value(content: &str) -> Result<Value> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(content);

    let mut frontmatter: Map<String, Value> = parsed
        .data
        .map(|d| d.deserialize())
        .transpose()
        .context("invalid frontmatter")?
        .unwrap_or_default();

    let body = parsed.content.trim();
    let has_reader_text = frontmatter
        .get("reader_license_text")
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty());
    if !has_reader_text && !body.is_empty() {
        frontmatter.insert(
            "reader_license_text".to_string(),
            Value::String(body.to_string()),
        );
    }
    Ok(Value::Object(frontmatter))
}

/// The settings from `--config`, else the project file, else defaults.
pub fn load_settings(config: Option<&Path>) -> Result<FactorySettings> {
    match config {
        Some(path) => FactorySettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(FactorySettings::load_from_project()?.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_body_becomes_reader_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mit.md");
        fs::write(
            &path,
            "---\nplain_name: MIT License\nspdx_id: MIT\n---\n\nYou can do what you want.\n",
        )
        .unwrap();
        let meta = load_metadata(&path).unwrap();
        assert_eq!(meta.reader_license_text, "You can do what you want.");
    }

    #[test]
    fn test_frontmatter_reader_text_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mit.md");
        fs::write(
            &path,
            "---\nplain_name: MIT License\nspdx_id: MIT\nreader_license_text: From frontmatter.\n---\n\nPage body.\n",
        )
        .unwrap();
        assert_eq!(load_metadata(&path).unwrap().reader_license_text, "From frontmatter.");
    }

    #[test]
    fn test_json_and_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("x.json");
        fs::write(
            &json,
            r#"{"plain_name": "X", "spdx_id": "X", "reader_license_text": "Text."}"#,
        )
        .unwrap();
        assert_eq!(load_metadata(&json).unwrap().spdx_id, "X");

        let other = dir.path().join("x.txt");
        fs::write(&other, "Text.").unwrap();
        assert!(load_metadata(&other).is_err());
    }

    #[test]
    fn test_missing_key_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "plain_name: X\nreader_license_text: Text.").unwrap();
        let err = load_metadata(&path).unwrap_err();
        assert!(err.to_string().contains("spdx_id"));
    }
}
