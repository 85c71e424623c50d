//! Metric metadata as published by the Prometheus HTTP API
//!
//! The `/api/v1/metadata` endpoint returns a JSON envelope whose `data` member maps
//! each metric name to the list of metadata entries scraped for it. A metric usually
//! has a single entry, but several targets may publish differing help text or units
//! for the same name, in which case every variant is kept in source order.

mod fetcher;

pub use fetcher::{FetchError, Fetcher, METADATA_PATH};

use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map;

/// One published fact about a metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "type", default)]
    pub metric_type: String,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub unit: String,
}

impl MetadataEntry {
    #[must_use]
    pub fn new(metric_type: impl Into<String>, help: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            metric_type: metric_type.into(),
            help: help.into(),
            unit: unit.into(),
        }
    }
}

/// All metadata entries keyed by metric name.
///
/// Iteration order is unspecified. Anything that needs a stable order goes through
/// [`crate::reports::project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MetadataSet(HashMap<String, Vec<MetadataEntry>>);

impl MetadataSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[MetadataEntry]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Total number of entries across all metric names.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Vec<MetadataEntry>> {
        self.0.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<MetadataEntry>)> for MetadataSet {
    fn from_iter<I: IntoIterator<Item = (N, Vec<MetadataEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, entries)| (name.into(), entries)).collect())
    }
}

impl<'a> IntoIterator for &'a MetadataSet {
    type Item = (&'a String, &'a Vec<MetadataEntry>);
    type IntoIter = hash_map::Iter<'a, String, Vec<MetadataEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The response envelope of `/api/v1/metadata`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub data: MetadataSet,
}
