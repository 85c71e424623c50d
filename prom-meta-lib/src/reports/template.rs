//! Template-driven renderers
//!
//! The HTML and Markdown reports are produced by running a named template over the
//! projected records. Templates are looked up through a [`TemplateSource`], so callers
//! can use the built-in set, a directory on disk, or an in-memory map.
//!
//! Each template sees a single variable, `records`, holding the projected records in
//! output order. Every record has the attributes `name`, `type`, `help`, and `unit`.
//! Referencing anything else is an execution error.

use super::{RenderError, project};
use crate::metadata::MetadataSet;
use camino::{Utf8Path, Utf8PathBuf};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};

pub(super) const LOG_TARGET: &str = "  template";

/// Name of the template used for HTML output.
pub const HTML_TEMPLATE: &str = "html.tmpl";

/// Name of the template used for Markdown output.
pub const MARKDOWN_TEMPLATE: &str = "md.tmpl";

/// A place templates can be loaded from by name.
pub trait TemplateSource: Send + Sync {
    /// Load the source text of the template called `name`.
    ///
    /// A template that does not exist is reported as [`io::ErrorKind::NotFound`].
    fn load(&self, name: &str) -> io::Result<Cow<'_, str>>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn load(&self, name: &str) -> io::Result<Cow<'_, str>> {
        match name {
            HTML_TEMPLATE => Ok(Cow::Borrowed(include_str!("../../templates/html.tmpl"))),
            MARKDOWN_TEMPLATE => Ok(Cow::Borrowed(include_str!("../../templates/md.tmpl"))),
            _ => Err(not_found(name)),
        }
    }
}

/// Templates read from files in a directory, one file per template name.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: Utf8PathBuf,
}

impl TemplateDir {
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl TemplateSource for TemplateDir {
    fn load(&self, name: &str) -> io::Result<Cow<'_, str>> {
        let path = self.root.join(name);
        log::debug!(target: LOG_TARGET, "Loading template '{path}'");
        fs::read_to_string(path).map(Cow::Owned)
    }
}

impl TemplateSource for BTreeMap<String, String> {
    fn load(&self, name: &str) -> io::Result<Cow<'_, str>> {
        self.get(name).map(|text| Cow::Borrowed(text.as_str())).ok_or_else(|| not_found(name))
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no template named '{name}'"))
}

fn escape_html(_name: &str) -> AutoEscape {
    AutoEscape::Html
}

fn escape_none(_name: &str) -> AutoEscape {
    AutoEscape::None
}

/// Renders records through a named template.
#[derive(Clone, Copy)]
pub struct TemplateRenderer<'a> {
    templates: &'a dyn TemplateSource,
    name: &'static str,
    escape: fn(&str) -> AutoEscape,
}

impl core::fmt::Debug for TemplateRenderer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemplateRenderer").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<'a> TemplateRenderer<'a> {
    /// HTML renderer; every interpolated value is HTML-escaped.
    #[must_use]
    pub fn html(templates: &'a dyn TemplateSource) -> Self {
        Self {
            templates,
            name: HTML_TEMPLATE,
            escape: escape_html,
        }
    }

    /// Markdown renderer; values are interpolated verbatim.
    #[must_use]
    pub fn markdown(templates: &'a dyn TemplateSource) -> Self {
        Self {
            templates,
            name: MARKDOWN_TEMPLATE,
            escape: escape_none,
        }
    }

    #[must_use]
    pub const fn template_name(&self) -> &'static str {
        self.name
    }

    pub fn generate<W: Write>(&self, metadata: &MetadataSet, writer: &mut W) -> Result<(), RenderError> {
        let records = project(metadata);

        let source = self.templates.load(self.name).map_err(|source| RenderError::TemplateLoad {
            name: self.name.to_string(),
            source,
        })?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(self.escape);

        let template = env
            .template_from_named_str(self.name, &source)
            .map_err(|source| RenderError::TemplateParse {
                name: self.name.to_string(),
                source,
            })?;

        log::debug!(target: LOG_TARGET, "Rendering {} record(s) with '{}'", records.len(), self.name);

        let _ = template
            .render_to_write(context! { records => records }, &mut *writer)
            .map_err(|source| RenderError::Execution {
                name: self.name.to_string(),
                source,
            })?;

        writer.flush()?;
        Ok(())
    }
}
