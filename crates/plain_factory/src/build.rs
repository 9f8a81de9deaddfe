/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Build-wide bookkeeping of which licenses were assembled.

use indexmap::IndexSet;

use crate::error::{FactoryError, Result};
use crate::license::LicenseContent;

/// Expected versus assembled licenses for one build invocation.
///
/// SPDX ids are compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct BuildStatus {
    expected: IndexSet<String>,
    assembled: IndexSet<String>,
}

impl BuildStatus {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            expected: expected
                .into_iter()
                .map(|id| id.as_ref().trim().to_lowercase())
                .filter(|id| !id.is_empty())
                .collect(),
            assembled: IndexSet::new(),
        }
    }

    pub fn record(&mut self, license: &LicenseContent) {
        let id = license.meta().spdx_lower();
        if !self.is_expected(&id) {
            tracing::warn!(spdx_id = %license.meta().spdx_id, "assembled a license that was not expected");
        }
        self.assembled.insert(id);
    }

    pub fn is_expected(&self, spdx_id: &str) -> bool {
        self.expected.contains(&spdx_id.to_lowercase())
    }

    /// Expected ids with no assembled license, in expected order.
    pub fn missing(&self) -> Vec<String> {
        self.expected
            .iter()
            .filter(|id| !self.assembled.contains(*id))
            .cloned()
            .collect()
    }

    pub fn assembled_count(&self) -> usize {
        self.assembled.len()
    }

    pub fn check(&self) -> Result<()> {
        if self.expected.is_empty() {
            return Err(FactoryError::NoExpectedLicenses);
        }
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(FactoryError::MissingLicenses(missing));
        }
        tracing::info!(count = self.assembled.len(), "all expected licenses assembled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FactorySettings;
    use crate::metadata::LicenseMetadata;

    fn license(spdx: &str) -> LicenseContent {
        let meta = LicenseMetadata::from_yaml_str(&format!(
            "plain_name: {spdx} License\nspdx_id: {spdx}\nreader_license_text: Text."
        ))
        .unwrap();
        LicenseContent::with_year(meta, FactorySettings::default(), 2025).unwrap()
    }

    #[test]
    fn test_empty_expectation_fails() {
        let status = BuildStatus::new(Vec::<String>::new());
        assert!(matches!(status.check(), Err(FactoryError::NoExpectedLicenses)));
    }

    #[test]
    fn test_missing_licenses_listed() {
        let mut status = BuildStatus::new(["MIT", "Unlicense", "MPL-2.0"]);
        status.record(&license("MIT"));
        match status.check() {
            Err(FactoryError::MissingLicenses(missing)) => {
                assert_eq!(missing, vec!["unlicense".to_string(), "mpl-2.0".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_all_assembled() {
        let mut status = BuildStatus::new(["mit"]);
        status.record(&license("MIT"));
        assert!(status.is_expected("MIT"));
        assert_eq!(status.assembled_count(), 1);
        assert!(status.check().is_ok());
    }
}
