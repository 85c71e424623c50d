use super::{FlatRecord, RenderError, project};
use crate::metadata::MetadataSet;
use serde::Serialize;
use std::io::Write;

/// JSON shape of a record: empty fields are left out instead of being emitted as `""`.
#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    #[serde(rename = "type", skip_serializing_if = "str::is_empty")]
    metric_type: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    help: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    unit: &'a str,
}

impl<'a> From<FlatRecord<'a>> for JsonRecord<'a> {
    fn from(record: FlatRecord<'a>) -> Self {
        Self {
            name: record.name,
            metric_type: record.metric_type,
            help: record.help,
            unit: record.unit,
        }
    }
}

pub fn generate<W: Write>(metadata: &MetadataSet, writer: &mut W) -> Result<(), RenderError> {
    let records: Vec<JsonRecord<'_>> = project(metadata).into_iter().map(JsonRecord::from).collect();

    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
