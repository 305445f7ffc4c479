//! History source enumeration

use crate::error::{ClipmarkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One document/sidecar pair yielded by a history source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Path to the document file
    pub file: PathBuf,

    /// Path to the document's sidecar payload
    pub sidecar: PathBuf,
}

/// Enumerates the document/sidecar pairs to aggregate
pub trait HistorySource {
    fn entries(&self) -> Result<Vec<HistoryEntry>>;
}

/// Filesystem history source with two origins
///
/// A legacy session-file directory, where a sidecar named `<doc>.json` sits
/// beside the document `<doc>` it annotates, and a current read-history
/// registry: a JSON array of `{file, sidecar}` records. Legacy entries are
/// appended first.
#[derive(Debug, Default)]
pub struct FsHistorySource {
    legacy_dir: Option<PathBuf>,
    registry: Option<PathBuf>,
}

impl FsHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the legacy session-file directory
    pub fn with_legacy_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.legacy_dir = Some(dir.into());
        self
    }

    /// Set the read-history registry file
    pub fn with_registry(mut self, registry: impl Into<PathBuf>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    fn legacy_entries(&self, dir: &Path) -> Result<Vec<HistoryEntry>> {
        let mut sidecars = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                sidecars.push(path);
            }
        }
        // Directory iteration order is platform-dependent
        sidecars.sort();

        Ok(sidecars
            .into_iter()
            .map(|sidecar| HistoryEntry {
                file: sidecar.with_extension(""),
                sidecar,
            })
            .collect())
    }

    fn registry_entries(&self, registry: &Path) -> Result<Vec<HistoryEntry>> {
        let raw = fs::read_to_string(registry)?;
        serde_json::from_str(&raw).map_err(|e| ClipmarkError::Registry(e.to_string()))
    }
}

impl HistorySource for FsHistorySource {
    fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let mut out = Vec::new();
        if let Some(dir) = self.legacy_dir.as_deref() {
            if dir.is_dir() {
                out.extend(self.legacy_entries(dir)?);
            }
        }
        if let Some(registry) = self.registry.as_deref() {
            if registry.is_file() {
                out.extend(self.registry_entries(registry)?);
            }
        }
        Ok(out)
    }
}
