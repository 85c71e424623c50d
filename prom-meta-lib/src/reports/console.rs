use super::{RenderError, project};
use crate::metadata::MetadataSet;
use owo_colors::OwoColorize;
use std::io::Write;

pub fn generate<W: Write>(metadata: &MetadataSet, use_colors: bool, writer: &mut W) -> Result<(), RenderError> {
    for record in project(metadata) {
        let name = format!("{:?}", record.name);
        if use_colors {
            writeln!(writer, "{}", name.bold())?;
        } else {
            writeln!(writer, "{name}")?;
        }

        writeln!(writer, "  Type: {:?}", record.metric_type)?;
        writeln!(writer, "  Help: {:?}", record.help)?;
        if !record.unit.is_empty() {
            writeln!(writer, "  Unit: {:?}", record.unit)?;
        }
    }

    writer.flush()?;
    Ok(())
}
