use super::{RenderError, project};
use crate::metadata::MetadataSet;
use std::io::Write;

/// The header is deliberately a single field, so it comes out quoted.
const HEADER: &str = "Name,Type,Help,Unit";

pub fn generate<W: Write>(metadata: &MetadataSet, writer: &mut W) -> Result<(), RenderError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer.write_record([HEADER])?;
    for record in project(metadata) {
        csv_writer.write_record([record.name, record.metric_type, record.help, record.unit])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataEntry;

    fn render(metadata: &MetadataSet) -> String {
        let mut output = Vec::new();
        generate(metadata, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_generate_empty_has_header_only() {
        assert_eq!(render(&MetadataSet::new()), "\"Name,Type,Help,Unit\"\n");
    }

    #[test]
    fn test_generate_rows() {
        let set: MetadataSet = [
            ("up", vec![MetadataEntry::new("gauge", "Whether the target is up", "")]),
            ("go_gc_duration_seconds", vec![MetadataEntry::new("summary", "GC duration", "seconds")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render(&set),
            "\"Name,Type,Help,Unit\"\ngo_gc_duration_seconds,summary,GC duration,seconds\nup,gauge,Whether the target is up,\n"
        );
    }

    #[test]
    fn test_generate_quotes_commas_and_quotes() {
        let set: MetadataSet = [("m", vec![MetadataEntry::new("gauge", "one, two \"three\"", "")])].into_iter().collect();
        let output = render(&set);
        assert!(output.contains("m,gauge,\"one, two \"\"three\"\"\",\n"));
    }

    #[test]
    fn test_generate_reparses_with_csv_reader() {
        let help = "Latency, in seconds,\nsplit over \"two\" lines";
        let set: MetadataSet = [("rpc_latency", vec![MetadataEntry::new("histogram", help, "seconds")])].into_iter().collect();
        let output = render(&set);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(&rows[0][0], HEADER);
        assert_eq!(&rows[1][0], "rpc_latency");
        assert_eq!(&rows[1][1], "histogram");
        assert_eq!(&rows[1][2], help);
        assert_eq!(&rows[1][3], "seconds");
    }
}
