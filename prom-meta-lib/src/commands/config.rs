use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs;
use url::Url;

/// Server queried when neither the command line nor a configuration file names one.
pub const DEFAULT_PROMETHEUS_URL: &str = "http://localhost:9090";

/// Format used when none is requested.
pub const DEFAULT_FORMAT: &str = "text";

/// Settings for a single export run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the Prometheus server
    #[serde(default = "default_prometheus_url")]
    pub prometheus_url: Url,

    /// Output format identifier (text, csv, html, md, json); anything else means text
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory holding `html.tmpl` and `md.tmpl`, replacing the built-in templates
    #[serde(default)]
    pub templates_dir: Option<Utf8PathBuf>,
}

fn default_prometheus_url() -> Url {
    Url::parse(DEFAULT_PROMETHEUS_URL).expect("default URL must be valid")
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prometheus_url: default_prometheus_url(),
            format: default_format(),
            templates_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file or use defaults
    ///
    /// A relative `templates_dir` is resolved against the directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading prom-meta configuration file '{path}'"))?;
        let mut config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;

        if let Some(dir) = &config.templates_dir
            && dir.is_relative()
            && let Some(parent) = path.parent()
        {
            config.templates_dir = Some(parent.join(dir));
        }

        Ok(config)
    }

    /// Replace settings with the ones given explicitly on the command line.
    #[must_use]
    pub fn with_overrides(mut self, prometheus_url: Option<Url>, format: Option<String>, templates_dir: Option<Utf8PathBuf>) -> Self {
        if let Some(url) = prometheus_url {
            self.prometheus_url = url;
        }

        if let Some(format) = format {
            self.format = format;
        }

        if templates_dir.is_some() {
            self.templates_dir = templates_dir;
        }

        self
    }
}
