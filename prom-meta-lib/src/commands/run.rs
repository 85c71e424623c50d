//! Command dispatch logic for prom-meta

use super::{Config, Host, export};
use crate::Result;
use camino::Utf8PathBuf;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, ValueEnum};
use std::io::Write;
use url::Url;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

#[derive(Parser, Debug)]
#[command(name = "prom-meta", version, author, long_about = None)]
#[command(about = "Export the metric metadata of a Prometheus server")]
#[command(styles = CLAP_STYLES)]
struct Args {
    /// URL of the Prometheus server to get information from [default: http://localhost:9090]
    #[arg(long = "prometheus.url", visible_alias = "prometheus-url", value_name = "URL", env = "PROMETHEUS_URL")]
    prometheus_url: Option<Url>,

    /// Output format (text, csv, html, md, json) [default: text]
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Directory containing `html.tmpl` and `md.tmpl` to use instead of the built-in templates
    #[arg(long, value_name = "PATH")]
    templates_dir: Option<Utf8PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    log_level: LogLevel,
}

/// Parse command-line arguments and run the export
///
/// This function is designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the metadata cannot be
/// fetched, or the output cannot be rendered. The error is also reported on the
/// host's error stream before the host is asked to exit with status 1.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let args = Args::parse_from(args);
    init_logging(args.log_level);

    let use_colors = match args.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            use std::io::{IsTerminal, stdout};
            stdout().is_terminal()
        }
    };

    let result = match Config::load(args.config.as_deref()) {
        Ok(config) => {
            let config = config.with_overrides(args.prometheus_url, args.format, args.templates_dir);
            export(host, &config, use_colors).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        let _ = writeln!(host.error(), "error getting data: {e:#}");
        host.exit(1);
    }

    result
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when running more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["prom-meta"]);
        assert!(args.format.is_none());
        assert!(args.templates_dir.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.color, ColorMode::Auto);
        assert_eq!(args.log_level, LogLevel::None);
    }

    #[test]
    fn test_args_dotted_and_dashed_url() {
        let args = Args::parse_from(["prom-meta", "--prometheus.url", "http://prom:9090", "--format", "csv"]);
        assert_eq!(args.prometheus_url.unwrap().as_str(), "http://prom:9090/");
        assert_eq!(args.format.as_deref(), Some("csv"));

        let args = Args::parse_from(["prom-meta", "--prometheus-url", "http://other:9090"]);
        assert_eq!(args.prometheus_url.unwrap().as_str(), "http://other:9090/");
    }

    #[test]
    fn test_args_accept_any_format_string() {
        let args = Args::parse_from(["prom-meta", "--format", "xml"]);
        assert_eq!(args.format.as_deref(), Some("xml"));
    }

    #[test]
    fn test_args_reject_invalid_url() {
        assert!(Args::try_parse_from(["prom-meta", "--prometheus.url", "not a url"]).is_err());
    }

    #[tokio::test]
    async fn test_run_reports_missing_config_file() {
        let mut host = TestHost::new();
        let result = run(&mut host, ["prom-meta", "--config", "/definitely/not/here.toml"]).await;

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.output_buf.is_empty());
        assert!(host.error_str().starts_with("error getting data: "));
    }

    #[tokio::test]
    async fn test_run_reports_unreachable_server() {
        let mut host = TestHost::new();
        // Port 9 (discard) is not expected to serve HTTP
        let result = run(&mut host, ["prom-meta", "--prometheus.url", "http://127.0.0.1:9", "--color", "never"]).await;

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.output_str().is_empty());
        assert!(host.error_str().contains("fetching metric metadata from http://127.0.0.1:9/api/v1/metadata"));
    }
}
