/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! License metadata as supplied by the site layer.
//!
//! Metadata arrives as a loose mapping (page frontmatter, a YAML or JSON file).
//! It is deserialized leniently, trimmed, and then validated once; a
//! [`LicenseMetadata`] value always holds the required keys.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::FactorySettings;
use crate::error::{FactoryError, Result};
use crate::tags::{map_tags, PlainTag};

const DEFAULT_PLAIN_VERSION: &str = "0.0.0";
const DEFAULT_INTERPRETATION_TITLE: &str = "Interpretation";

/// Whether a work is licensed or dedicated to the public domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    License,
    Dedication,
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::License => "license",
            Self::Dedication => "dedication",
        })
    }
}

/// Scalar values as trimmed strings; blank counts as absent.
fn scalar<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(text(d)?.filter(|s| !s.is_empty()))
}

/// Like [`scalar`], but a blank value stays present.
fn text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn tag_list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    let tags = Option::<Vec<String>>::deserialize(d)?.unwrap_or_default();
    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
        _ => false,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    #[serde(deserialize_with = "scalar")]
    plain_name: Option<String>,
    #[serde(deserialize_with = "scalar")]
    spdx_id: Option<String>,
    #[serde(deserialize_with = "text")]
    reader_license_text: Option<String>,
    #[serde(deserialize_with = "scalar")]
    original_name: Option<String>,
    #[serde(deserialize_with = "scalar")]
    original_url: Option<String>,
    #[serde(deserialize_with = "scalar")]
    original_organization: Option<String>,
    #[serde(deserialize_with = "scalar")]
    original_version: Option<String>,
    #[serde(deserialize_with = "scalar")]
    original_license_text: Option<String>,
    #[serde(deserialize_with = "scalar")]
    interpretation_text: Option<String>,
    #[serde(deserialize_with = "scalar")]
    interpretation_title: Option<String>,
    #[serde(deserialize_with = "scalar")]
    outro: Option<String>,
    #[serde(deserialize_with = "flag")]
    link_in_original: bool,
    #[serde(deserialize_with = "scalar")]
    official_link: Option<String>,
    #[serde(deserialize_with = "scalar")]
    plain_version: Option<String>,
    #[serde(deserialize_with = "scalar")]
    category: Option<String>,
    #[serde(deserialize_with = "scalar")]
    license_description: Option<String>,
    #[serde(deserialize_with = "tag_list")]
    permissions: Vec<String>,
    #[serde(deserialize_with = "tag_list")]
    conditions: Vec<String>,
    #[serde(deserialize_with = "tag_list")]
    limitations: Vec<String>,
    #[serde(deserialize_with = "scalar")]
    changelog: Option<String>,
    #[serde(deserialize_with = "scalar")]
    github_issues_link: Option<String>,
    #[serde(deserialize_with = "scalar")]
    github_edit_link: Option<String>,
    #[serde(deserialize_with = "scalar")]
    page_url: Option<String>,
}

/// Validated metadata for one license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseMetadata {
    pub plain_name: String,
    pub spdx_id: String,
    pub reader_license_text: String,
    pub original_name: Option<String>,
    pub original_url: Option<String>,
    pub original_organization: Option<String>,
    pub original_version: Option<String>,
    pub original_license_text: Option<String>,
    pub interpretation_text: Option<String>,
    pub interpretation_title: Option<String>,
    pub outro: Option<String>,
    pub link_in_original: bool,
    pub official_link: Option<String>,
    pub plain_version: String,
    pub category: Option<String>,
    pub license_description: Option<String>,
    pub permissions: Vec<String>,
    pub conditions: Vec<String>,
    pub limitations: Vec<String>,
    pub changelog: Option<String>,
    pub github_issues_link: Option<String>,
    pub github_edit_link: Option<String>,
    pub page_url: Option<String>,
}

fn required(value: Option<String>, key: &'static str) -> Result<String> {
    value.ok_or(FactoryError::MissingMetadata { key })
}

impl LicenseMetadata {
    /// Build from an already-parsed mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::validate(serde_json::from_value(value)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Self::validate(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::validate(serde_json::from_str(s)?)
    }

    fn validate(raw: RawMetadata) -> Result<Self> {
        let plain_name = required(raw.plain_name, "plain_name")?;
        let spdx_id = required(raw.spdx_id, "spdx_id")?;
        let reader_license_text = required(raw.reader_license_text, "reader_license_text")?;
        if reader_license_text.is_empty() {
            return Err(FactoryError::EmptyReaderText { spdx_id });
        }

        // an official text is meaningless without knowing whose it is
        if raw.original_license_text.is_some() {
            if raw.original_name.is_none() {
                return Err(FactoryError::MissingMetadata { key: "original_name" });
            }
            if raw.original_organization.is_none() {
                return Err(FactoryError::MissingMetadata {
                    key: "original_organization",
                });
            }
            if raw.original_url.is_none() {
                return Err(FactoryError::MissingMetadata { key: "original_url" });
            }
        }

        Ok(Self {
            plain_name,
            spdx_id,
            reader_license_text,
            original_name: raw.original_name,
            original_url: raw.original_url,
            original_organization: raw.original_organization,
            original_version: raw.original_version,
            original_license_text: raw.original_license_text,
            interpretation_text: raw.interpretation_text,
            interpretation_title: raw.interpretation_title,
            outro: raw.outro,
            link_in_original: raw.link_in_original,
            official_link: raw.official_link,
            plain_version: raw
                .plain_version
                .unwrap_or_else(|| DEFAULT_PLAIN_VERSION.to_string()),
            category: raw.category,
            license_description: raw.license_description,
            permissions: raw.permissions,
            conditions: raw.conditions,
            limitations: raw.limitations,
            changelog: raw.changelog,
            github_issues_link: raw.github_issues_link,
            github_edit_link: raw.github_edit_link,
            page_url: raw.page_url,
        })
    }

    /// `The {plain_name}`.
    pub fn title(&self) -> String {
        format!("The {}", self.plain_name)
    }

    /// The original license's name, falling back to [`Self::title`].
    pub fn original_title(&self) -> String {
        self.original_name.clone().unwrap_or_else(|| self.title())
    }

    pub fn spdx_lower(&self) -> String {
        self.spdx_id.to_lowercase()
    }

    pub fn license_type(&self) -> LicenseType {
        let mentions_domain = |s: &str| s.to_lowercase().contains("domain");
        let dedication = mentions_domain(&self.title())
            || self.page_url.as_deref().is_some_and(mentions_domain)
            || self.category.as_deref().is_some_and(mentions_domain);
        if dedication {
            LicenseType::Dedication
        } else {
            LicenseType::License
        }
    }

    pub fn has_official(&self) -> bool {
        self.original_license_text.is_some()
    }

    /// Plain License tags, from conditions, permissions and limitations in
    /// that order.
    pub fn tags(&self) -> Vec<PlainTag> {
        map_tags(
            self.conditions
                .iter()
                .chain(&self.permissions)
                .chain(&self.limitations)
                .map(String::as_str),
        )
    }

    pub fn interpretation_title(&self) -> &str {
        self.interpretation_title
            .as_deref()
            .unwrap_or(DEFAULT_INTERPRETATION_TITLE)
    }

    pub fn embed_url(&self, settings: &FactorySettings) -> String {
        format!("{}/embed/{}.html", settings.site_root(), self.spdx_lower())
    }

    /// The license page URL; derived from the category when not given.
    pub fn page_url(&self, settings: &FactorySettings) -> String {
        if let Some(url) = &self.page_url {
            return url.clone();
        }
        match &self.category {
            Some(category) => format!(
                "{}/licenses/{}/{}.html",
                settings.site_root(),
                category.to_lowercase(),
                self.spdx_lower()
            ),
            None => format!("{}/licenses/{}.html", settings.site_root(), self.spdx_lower()),
        }
    }

    pub fn issues_link<'a>(&'a self, settings: &'a FactorySettings) -> &'a str {
        self.github_issues_link
            .as_deref()
            .unwrap_or(&settings.issues_link)
    }

    pub fn edit_link<'a>(&'a self, settings: &'a FactorySettings) -> &'a str {
        self.github_edit_link.as_deref().unwrap_or(&settings.edit_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIT: &str = r#"
plain_name: " MIT License "
spdx_id: MIT
reader_license_text: |
  You can do what you want.
plain_version: 0.2
category: permissive
permissions: [commercial-use, modifications, distribution, private-use]
conditions: [include-copyright]
original_name: MIT License
original_organization: Open Source Initiative
original_url: https://opensource.org/license/mit
original_license_text: Permission is hereby granted...
link_in_original: "yes"
"#;

    #[test]
    fn test_yaml_metadata_is_trimmed_and_validated() {
        let meta = LicenseMetadata::from_yaml_str(MIT).unwrap();
        assert_eq!(meta.plain_name, "MIT License");
        assert_eq!(meta.title(), "The MIT License");
        assert_eq!(meta.reader_license_text, "You can do what you want.");
        assert_eq!(meta.plain_version, "0.2");
        assert!(meta.has_official());
        assert!(meta.link_in_original);
        assert_eq!(meta.license_type(), LicenseType::License);
        assert_eq!(
            meta.tags(),
            vec![
                PlainTag::GiveCredit,
                PlainTag::SellIt,
                PlainTag::ChangeIt,
                PlainTag::ShareIt
            ]
        );
    }

    #[test]
    fn test_missing_required_key() {
        let err = LicenseMetadata::from_yaml_str("spdx_id: MIT\nreader_license_text: x").unwrap_err();
        assert!(matches!(err, FactoryError::MissingMetadata { key: "plain_name" }));
    }

    #[test]
    fn test_blank_reader_text_is_empty_error() {
        let err = LicenseMetadata::from_json_str(
            r#"{"plain_name": "X", "spdx_id": "X-1", "reader_license_text": "   "}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FactoryError::EmptyReaderText { spdx_id } if spdx_id == "X-1"));
    }

    #[test]
    fn test_official_text_needs_its_source() {
        let err = LicenseMetadata::from_yaml_str(
            "plain_name: X\nspdx_id: X\nreader_license_text: body\noriginal_license_text: legal\noriginal_name: X",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::MissingMetadata {
                key: "original_organization"
            }
        ));
    }

    #[test]
    fn test_defaults_without_official() {
        let meta = LicenseMetadata::from_yaml_str(
            "plain_name: Unlicense\nspdx_id: Unlicense\nreader_license_text: Free.\ncategory: public-domain\noutro: ''",
        )
        .unwrap();
        assert_eq!(meta.plain_version, "0.0.0");
        assert!(!meta.has_official());
        assert!(meta.outro.is_none());
        assert_eq!(meta.license_type(), LicenseType::Dedication);
        assert_eq!(meta.original_title(), "The Unlicense");
        assert!(meta.tags().is_empty());

        let settings = FactorySettings::default();
        assert_eq!(meta.embed_url(&settings), "https://plainlicense.org/embed/unlicense.html");
        assert_eq!(
            meta.page_url(&settings),
            "https://plainlicense.org/licenses/public-domain/unlicense.html"
        );
        assert_eq!(meta.issues_link(&settings), settings.issues_link);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = LicenseMetadata::from_yaml_str("plain_name: [unclosed").unwrap_err();
        assert!(matches!(err, FactoryError::ParseError(format, _) if format == "YAML"));
    }
}
