//! Multi-format rendering of metric metadata
//!
//! This module turns a [`MetadataSet`] into one of five textual encodings written to a
//! single output stream.
//!
//! # Implementation Model
//!
//! Five renderers are provided, each selected through [`select`]:
//! - **Text**: A human-readable dump with one quoted block per record
//! - **CSV**: RFC 4180 rows preceded by a single-field header
//! - **JSON**: A pretty-printed array of records with empty fields omitted
//! - **HTML**: A template run with HTML auto-escaping
//! - **Markdown**: A template run without escaping
//!
//! All renderers start from the same [`project`] step, which flattens the metadata set
//! into records sorted by metric name. Sorting is what makes the output deterministic,
//! since the underlying map has no stable iteration order.
//!
//! Format identifiers are matched exactly. Anything unrecognized, including the empty
//! string, selects the text renderer rather than failing.

mod console;
mod csv;
mod json;
mod record;
mod template;

pub use record::{FlatRecord, project};
pub use template::{BuiltinTemplates, HTML_TEMPLATE, MARKDOWN_TEMPLATE, TemplateDir, TemplateRenderer, TemplateSource};

use crate::metadata::MetadataSet;
use std::io::{self, Write};
use strum::{Display, EnumIter, IntoStaticStr};

/// The output encodings understood by [`select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Format {
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "csv")]
    Csv,
    #[strum(serialize = "html")]
    Html,
    #[strum(serialize = "md")]
    Markdown,
    #[strum(serialize = "json")]
    Json,
}

impl Format {
    /// Map a format identifier to a format, falling back to [`Format::Text`].
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "csv" => Self::Csv,
            "html" => Self::Html,
            "md" => Self::Markdown,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// The canonical identifier of this format.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        self.into()
    }
}

/// Failure to render a metadata set.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The named template could not be loaded from its source.
    #[error("unable to load template '{name}'")]
    TemplateLoad {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The named template is not syntactically valid.
    #[error("unable to parse template '{name}'")]
    TemplateParse {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Running the template against the records failed.
    #[error("unable to execute template '{name}'")]
    Execution {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("unable to encode JSON output")]
    Json(#[from] serde_json::Error),

    #[error("unable to encode CSV output")]
    Csv(#[from] ::csv::Error),

    #[error("unable to write output")]
    Io(#[from] io::Error),
}

impl RenderError {
    /// Whether this error was raised while obtaining the template, before any output was produced.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateLoad { .. } | Self::TemplateParse { .. })
    }
}

/// A strategy that writes a metadata set in one output format.
#[derive(Debug, Clone, Copy)]
pub enum Renderer<'a> {
    Text { use_colors: bool },
    Csv,
    Json,
    Html(TemplateRenderer<'a>),
    Markdown(TemplateRenderer<'a>),
}

/// Choose the renderer for a format identifier.
///
/// `templates` is only consulted by the HTML and Markdown renderers, and only when
/// they render.
#[must_use]
pub fn select<'a>(identifier: &str, templates: &'a dyn TemplateSource) -> Renderer<'a> {
    Renderer::new(Format::from_identifier(identifier), templates)
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(format: Format, templates: &'a dyn TemplateSource) -> Self {
        match format {
            Format::Text => Self::Text { use_colors: false },
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Html => Self::Html(TemplateRenderer::html(templates)),
            Format::Markdown => Self::Markdown(TemplateRenderer::markdown(templates)),
        }
    }

    /// Enable or disable ANSI styling. Only the text renderer is affected.
    #[must_use]
    pub const fn with_colors(self, enabled: bool) -> Self {
        match self {
            Self::Text { .. } => Self::Text { use_colors: enabled },
            other => other,
        }
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::Text { .. } => Format::Text,
            Self::Csv => Format::Csv,
            Self::Json => Format::Json,
            Self::Html(_) => Format::Html,
            Self::Markdown(_) => Format::Markdown,
        }
    }

    /// Render `metadata` to `writer`.
    ///
    /// Template errors are raised before anything is written. An execution error may
    /// leave partial output behind in `writer`.
    pub fn render<W: Write>(&self, metadata: &MetadataSet, writer: &mut W) -> Result<(), RenderError> {
        match self {
            Self::Text { use_colors } => console::generate(metadata, *use_colors, writer),
            Self::Csv => csv::generate(metadata, writer),
            Self::Json => json::generate(metadata, writer),
            Self::Html(renderer) | Self::Markdown(renderer) => renderer.generate(metadata, writer),
        }
    }
}


#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::metadata::MetadataEntry;

    fn create_test_metadata() -> MetadataSet {
        [
            ("up", vec![MetadataEntry::new("gauge", "Whether the target is up", "")]),
            ("go_gc_duration_seconds", vec![MetadataEntry::new("summary", "GC duration", "seconds")]),
            (
                "http_requests_total",
                vec![
                    MetadataEntry::new("counter", "Total requests, by handler", ""),
                    MetadataEntry::new("counter", "Requests served", ""),
                ],
            ),
        ]
        .into_iter()
        .collect()
    }

    fn render(identifier: &str, metadata: &MetadataSet) -> String {
        let mut output = Vec::new();
        select(identifier, &BuiltinTemplates).render(metadata, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_report() {
        insta::assert_snapshot!(render("text", &create_test_metadata()), @r#"
        "go_gc_duration_seconds"
          Type: "summary"
          Help: "GC duration"
          Unit: "seconds"
        "http_requests_total"
          Type: "counter"
          Help: "Total requests, by handler"
        "http_requests_total"
          Type: "counter"
          Help: "Requests served"
        "up"
          Type: "gauge"
          Help: "Whether the target is up"
        "#);
    }

    #[test]
    fn test_csv_report() {
        insta::assert_snapshot!(render("csv", &create_test_metadata()), @r#"
        "Name,Type,Help,Unit"
        go_gc_duration_seconds,summary,GC duration,seconds
        http_requests_total,counter,"Total requests, by handler",
        http_requests_total,counter,Requests served,
        up,gauge,Whether the target is up,
        "#);
    }

    #[test]
    fn test_json_report() {
        insta::assert_snapshot!(render("json", &create_test_metadata()), @r#"
        [
          {
            "name": "go_gc_duration_seconds",
            "type": "summary",
            "help": "GC duration",
            "unit": "seconds"
          },
          {
            "name": "http_requests_total",
            "type": "counter",
            "help": "Total requests, by handler"
          },
          {
            "name": "http_requests_total",
            "type": "counter",
            "help": "Requests served"
          },
          {
            "name": "up",
            "type": "gauge",
            "help": "Whether the target is up"
          }
        ]
        "#);
    }

    #[test]
    fn test_markdown_report() {
        insta::assert_snapshot!(render("md", &create_test_metadata()), @r"
        # Prometheus Metrics Metadata

        | Name | Type | Help | Unit |
        |------|------|------|------|
        | go_gc_duration_seconds | summary | GC duration | seconds |
        | http_requests_total | counter | Total requests, by handler |  |
        | http_requests_total | counter | Requests served |  |
        | up | gauge | Whether the target is up |  |
        ");
    }

    #[test]
    fn test_empty_reports() {
        let empty = MetadataSet::new();
        assert_eq!(render("text", &empty), "");
        assert_eq!(render("csv", &empty), "\"Name,Type,Help,Unit\"\n");
        assert_eq!(render("json", &empty), "[]\n");
        assert!(render("html", &empty).contains("<tbody>"));
    }

    #[test]
    fn test_unknown_format_renders_text() {
        let metadata = create_test_metadata();
        assert_eq!(render("xml", &metadata), render("text", &metadata));
        assert_eq!(render("", &metadata), render("text", &metadata));
        assert_eq!(render("TEXT", &metadata), render("text", &metadata));
    }
}
