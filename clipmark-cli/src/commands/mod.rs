//! CLI command implementations

mod clippings;
mod export;
mod inspect;
mod list;

pub use clippings::clippings;
pub use export::export;
pub use inspect::inspect;
pub use list::list;

use anyhow::{Context, Result};
use clipmark_core::{
    AggregatorConfig, Book, ClippingAggregator, FsHistorySource, JsonSidecarStore,
};
use std::collections::BTreeMap;
use std::fs;

/// Run aggregation over the configured history origins
fn aggregate(legacy_dir: Option<&str>, registry: Option<&str>) -> Result<BTreeMap<String, Book>> {
    let mut source = FsHistorySource::new();
    if let Some(dir) = legacy_dir {
        source = source.with_legacy_dir(dir);
    }
    if let Some(registry) = registry {
        source = source.with_registry(registry);
    }

    let aggregator = ClippingAggregator::new(AggregatorConfig::default(), JsonSidecarStore::new());
    aggregator
        .aggregate_source(&source)
        .context("Failed to enumerate history sources")
}

/// Write pretty JSON to a file or stdout
fn write_json<T: serde::Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path))?
        }
        None => println!("{}", json),
    }
    Ok(())
}
