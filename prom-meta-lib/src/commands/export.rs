use super::{Config, Host};
use crate::Result;
use crate::metadata::Fetcher;
use crate::reports::{BuiltinTemplates, TemplateDir, TemplateSource, select};
use ohno::IntoAppError;
use std::io::{BufWriter, Write};

const LOG_TARGET: &str = "    export";

/// Fetch the metadata described by `config` and render it to the host's output.
pub async fn export<H: Host>(host: &mut H, config: &Config, use_colors: bool) -> Result<()> {
    let fetcher = Fetcher::new(&config.prometheus_url)?;
    let metadata = fetcher
        .fetch()
        .await
        .into_app_err_with(|| format!("fetching metric metadata from {}", fetcher.endpoint()))?;

    let templates: Box<dyn TemplateSource> = match &config.templates_dir {
        Some(dir) => Box::new(TemplateDir::new(dir.clone())),
        None => Box::new(BuiltinTemplates),
    };

    let renderer = select(&config.format, &*templates).with_colors(use_colors);
    log::info!(target: LOG_TARGET, "Rendering {} metric(s) as {}", metadata.len(), renderer.format());

    let mut output = BufWriter::new(host.output());
    renderer
        .render(&metadata, &mut output)
        .into_app_err_with(|| format!("rendering {} output", renderer.format()))?;
    output.flush().into_app_err("flushing output")?;

    Ok(())
}
