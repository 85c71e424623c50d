use crate::metadata::MetadataSet;
use serde::Serialize;

/// The name-joined projection of one metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlatRecord<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub metric_type: &'a str,
    pub help: &'a str,
    pub unit: &'a str,
}

/// Flatten a metadata set into one record per (metric name, entry) pair.
///
/// Records are ordered by ascending metric name; entries sharing a name keep
/// their original relative order.
#[must_use]
pub fn project(metadata: &MetadataSet) -> Vec<FlatRecord<'_>> {
    let mut names: Vec<(&String, _)> = metadata.iter().collect();
    names.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut records = Vec::with_capacity(metadata.entry_count());
    for (name, entries) in names {
        records.extend(entries.iter().map(|entry| FlatRecord {
            name: name.as_str(),
            metric_type: &entry.metric_type,
            help: &entry.help,
            unit: &entry.unit,
        }));
    }

    records
}
