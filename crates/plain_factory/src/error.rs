/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use plain_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("missing required metadata `{key}`")]
    MissingMetadata { key: &'static str },

    #[error("reader license text for {spdx_id} is empty")]
    EmptyReaderText { spdx_id: String },

    #[error("snippet file not found: {}", .0.display())]
    MissingSnippet(PathBuf),

    #[error("snippet path leaves the snippet directory: {}", .0.display())]
    SnippetOutsideBase(PathBuf),

    #[error("expected licenses were not assembled: {}", .0.join(", "))]
    MissingLicenses(Vec<String>),

    #[error("no expected licenses were set")]
    NoExpectedLicenses,

    #[error("parse error in {0}: {1}")]
    ParseError(String, String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<serde_json::Error> for FactoryError {
    fn from(e: serde_json::Error) -> Self {
        FactoryError::ParseError("JSON".to_string(), e.to_string())
    }
}

impl From<serde_yaml::Error> for FactoryError {
    fn from(e: serde_yaml::Error) -> Self {
        FactoryError::ParseError("YAML".to_string(), e.to_string())
    }
}

impl From<toml::de::Error> for FactoryError {
    fn from(e: toml::de::Error) -> Self {
        FactoryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FactoryError>;
