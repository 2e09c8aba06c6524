//! Generated runner-configuration documents.
//!
//! Consumes the ordered file list produced by `jstd-resolver` and writes
//! the artifacts the external test runner reads: the configuration
//! document (a `basepath:` line and a `load:` section, one absolute path
//! per line, in load order) and an optional JSON manifest for machine
//! consumption. The entry file is always the last load entry.

use anyhow::{Context, Result};
use jstd_common::FileId;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The generated runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub basepath: PathBuf,
    /// Files in load order; the entry file last.
    pub load: Vec<FileId>,
}

impl RunnerConfig {
    pub fn new(basepath: impl Into<PathBuf>, load: Vec<FileId>) -> Self {
        Self {
            basepath: basepath.into(),
            load,
        }
    }

    /// Render the configuration document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("basepath: ");
        out.push_str(&self.basepath.display().to_string());
        out.push('\n');
        out.push_str("load:\n");
        for file in &self.load {
            out.push_str("  - ");
            out.push_str(&file.to_string());
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write runner config to {}", path.display()))
    }
}

/// Machine-readable companion to the configuration document.
#[derive(Debug, Clone, Serialize)]
pub struct LoadManifest {
    pub entry: FileId,
    pub load: Vec<FileId>,
}

impl LoadManifest {
    /// Build a manifest from a resolver load order. Returns `None` for an
    /// empty order (the resolver never produces one for a valid entry).
    pub fn from_load_order(load: Vec<FileId>) -> Option<Self> {
        let entry = load.last()?.clone();
        Some(Self { entry, load })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize load manifest")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write load manifest to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Vec<FileId> {
        vec![
            FileId::new("/p/bar.js"),
            FileId::new("/p/foo.js"),
            FileId::new("/p/test.js"),
        ]
    }

    #[test]
    fn render_lists_files_in_load_order() {
        let conf = RunnerConfig::new("/p", order());
        assert_eq!(
            conf.render(),
            "basepath: /p\nload:\n  - /p/bar.js\n  - /p/foo.js\n  - /p/test.js\n"
        );
    }

    #[test]
    fn render_with_empty_load_has_empty_section() {
        let conf = RunnerConfig::new("/p", Vec::new());
        assert_eq!(conf.render(), "basepath: /p\nload:\n");
    }

    #[test]
    fn write_creates_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsTestDriver.conf");
        let conf = RunnerConfig::new("/p", order());
        conf.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, conf.render());
    }

    #[test]
    fn manifest_entry_is_last_load_element() {
        let manifest = LoadManifest::from_load_order(order()).unwrap();
        assert_eq!(manifest.entry, FileId::new("/p/test.js"));

        let json = manifest.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entry"], "/p/test.js");
        assert_eq!(value["load"][0], "/p/bar.js");
        assert_eq!(value["load"][2], "/p/test.js");
    }

    #[test]
    fn manifest_rejects_empty_order() {
        assert!(LoadManifest::from_load_order(Vec::new()).is_none());
    }
}
