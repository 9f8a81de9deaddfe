/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `--8<-- "file"` snippet expansion.

use std::fs;
use std::path::{Component, Path, PathBuf};

use plain_core::{indent, PATTERNS};

use crate::error::{FactoryError, Result};

/// Replace every snippet line with the referenced file, resolved against
/// `base_dir` and indented like the snippet line.
///
/// Snippet paths must be relative and stay inside `base_dir`.
pub fn expand_snippets(text: &str, base_dir: &Path) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0usize;

    for caps in PATTERNS.block.snippet.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let path = resolve(base_dir, caps["path"].trim())?;
        if !path.is_file() {
            return Err(FactoryError::MissingSnippet(path));
        }
        let content = fs::read_to_string(&path)?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(&indent(content.trim_end_matches(['\n', '\r']), &caps["indent"]));
        last = whole.end();
        count += 1;
    }

    if count == 0 {
        return Ok(text.to_string());
    }
    out.push_str(&text[last..]);
    tracing::debug!(count, base = %base_dir.display(), "expanded snippets");
    Ok(out)
}

fn resolve(base_dir: &Path, raw: &str) -> Result<PathBuf> {
    let relative = Path::new(raw);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        tracing::warn!(path = raw, "rejected snippet outside the snippet directory");
        return Err(FactoryError::SnippetOutsideBase(relative.to_path_buf()));
    }
    Ok(base_dir.join(relative))
}
