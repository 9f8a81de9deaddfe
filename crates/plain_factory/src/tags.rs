/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain License tags and their choosealicense.com sources.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlainTag {
    #[serde(rename = "share-it")]
    ShareIt,
    #[serde(rename = "sell-it")]
    SellIt,
    #[serde(rename = "change-it")]
    ChangeIt,
    #[serde(rename = "revoke-it")]
    RevokeIt,
    #[serde(rename = "relicense-it")]
    RelicenseIt,
    #[serde(rename = "share-your-work")]
    ShareYourWork,
    #[serde(rename = "describe-changes")]
    DescribeChanges,
    #[serde(rename = "give-credit")]
    GiveCredit,
    #[serde(rename = "share-alike (strict)")]
    ShareAlikeStrict,
    #[serde(rename = "share-alike (relaxed)")]
    ShareAlikeRelaxed,
}

impl PlainTag {
    /// Map a choosealicense.com permission, condition or limitation tag.
    pub fn from_choosealicense(tag: &str) -> Option<Self> {
        match tag.trim() {
            "distribution" => Some(Self::ShareIt),
            "commercial-use" => Some(Self::SellIt),
            "modifications" => Some(Self::ChangeIt),
            "revokable" => Some(Self::RevokeIt),
            "relicense" => Some(Self::RelicenseIt),
            "disclose-source" => Some(Self::ShareYourWork),
            "document-changes" => Some(Self::DescribeChanges),
            "include-copyright" => Some(Self::GiveCredit),
            "same-license" => Some(Self::ShareAlikeStrict),
            "same-license--file" | "same-license--library" => Some(Self::ShareAlikeRelaxed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShareIt => "share-it",
            Self::SellIt => "sell-it",
            Self::ChangeIt => "change-it",
            Self::RevokeIt => "revoke-it",
            Self::RelicenseIt => "relicense-it",
            Self::ShareYourWork => "share-your-work",
            Self::DescribeChanges => "describe-changes",
            Self::GiveCredit => "give-credit",
            Self::ShareAlikeStrict => "share-alike (strict)",
            Self::ShareAlikeRelaxed => "share-alike (relaxed)",
        }
    }
}

impl fmt::Display for PlainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map source tags in order, skipping unknown ones and repeats.
pub fn map_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<PlainTag> {
    let mut mapped = IndexSet::new();
    for tag in tags {
        match PlainTag::from_choosealicense(tag) {
            Some(plain) => {
                mapped.insert(plain);
            }
            None => tracing::trace!(tag, "no plain tag for source tag"),
        }
    }
    mapped.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_tags_skips_unknown_and_repeats() {
        let tags = map_tags([
            "include-copyright",
            "commercial-use",
            "patent-use",
            "same-license--file",
            "same-license--library",
            "private-use",
        ]);
        assert_eq!(
            tags,
            vec![
                PlainTag::GiveCredit,
                PlainTag::SellIt,
                PlainTag::ShareAlikeRelaxed
            ]
        );
    }

    #[test]
    fn test_serialized_names_match_display() {
        for tag in map_tags(["distribution", "same-license", "disclose-source"]) {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{tag}\""));
        }
    }
}
