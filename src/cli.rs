use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::debug;

use crate::config::{Config, Preset};
use crate::projector::{ColumnIntents, ColumnMatcher};
use crate::render::{render_html, render_json, render_text};
use crate::session::ReaderSession;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Render a spreadsheet of shout-outs as cards.
#[derive(Parser, Debug)]
#[command(name = "shoutouts")]
#[command(about = "Render each row of an Excel workbook (.xlsx/.xls) as a shout-out card")]
pub struct Args {
    /// Workbook to read.
    file: Option<PathBuf>,

    /// Config file (default: ./shoutouts.yaml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Card layout and quote column preset.
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Use the first column whose name contains this text as the quote.
    #[arg(long, value_name = "TEXT")]
    quote_column: Option<String>,

    /// Page title.
    #[arg(long)]
    title: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the rendered cards here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

pub fn run(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<()> {
    let args = Args::parse_from(args);
    run_with(args, Path::new("."))
}

/// Load, render and write. Fails after writing when the error banner is set.
pub fn run_with(args: Args, config_dir: &Path) -> Result<()> {
    let mut config = Config::load(args.config.as_deref(), config_dir)?;
    if let Some(preset) = args.preset {
        config.preset = Some(preset);
    }
    if let Some(title) = args.title {
        config.title = Some(title);
    }

    let mut projector = config.projector().context("invalid config")?;
    if let Some(needle) = args.quote_column {
        projector.intents = ColumnIntents::with_quote(ColumnMatcher::contains(needle));
    }

    let mut session = ReaderSession::new(projector);
    session.select_file(args.file);
    if session.error().is_none() {
        // The session records the banner text for every failure.
        if let Err(err) = session.load() {
            debug!("load did not start: {err}");
        }
    }

    let view = session.view();
    let style = config.preset().card_style();
    let rendered = match args.format {
        OutputFormat::Text => render_text(&view, style, config.title()),
        OutputFormat::Html => render_html(&view, style, config.title())?,
        OutputFormat::Json => render_json(&view, config.title())?,
    };

    match &args.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("failed to write output")?,
    }

    if let Some(error) = session.error() {
        bail!("{error}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "shoutouts",
            "team.xlsx",
            "--preset",
            "send",
            "--format",
            "html",
            "-o",
            "cards.html",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("team.xlsx")));
        assert_eq!(args.preset, Some(Preset::Send));
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(args.output, Some(PathBuf::from("cards.html")));
    }

    #[test]
    fn file_is_optional() {
        let args = Args::try_parse_from(["shoutouts"]).unwrap();
        assert_eq!(args.file, None);
        assert_eq!(args.format, OutputFormat::Text);
    }
}
