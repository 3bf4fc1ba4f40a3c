//! Benchmark comparison chart tool.
//!
//! Reads libtest `cargo bench` output, fits a linear trend per benchmark
//! series and renders the comparison chart.
//!
//! Pipeline: load config → read input → parse → aggregate → fit →
//!           print summary → render chart.

mod cli;
mod diag;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchplot::font::{self, ChartFont};
use benchplot::{Analysis, PlotConfig, output, render};
use clap::Parser;

use crate::diag::{Detail, StageTimer, infoln, traceln, warnln};

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "benchplot.toml";

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    diag::set(Detail::from_flags(cli.quiet, cli.verbose));

    let config = load_config(&cli)?;
    let text = read_input(cli.input_path())?;

    let analysis = {
        let _t = StageTimer::start("analysis");
        benchplot::analyze(&text, &config).context("grouping benchmark records")?
    };
    report(&analysis, &config);

    if cli.no_chart {
        return Ok(());
    }

    let font = font::acquire(config.font_path.as_deref()).context("loading chart font")?;
    match &font {
        ChartFont::Loaded(path) => traceln!("Using font {}", path.display()),
        ChartFont::Unavailable => {
            warnln!("no usable font found; drawing chart without text (set font_path or --font)");
        }
    }

    {
        let _t = StageTimer::start("rendering");
        render::render_chart(&analysis, &config, &font).with_context(|| {
            format!("rendering chart to {}", config.output_path.display())
        })?;
    }
    infoln!("Chart written to {}", config.output_path.display());

    Ok(())
}

/// Load the configuration file, apply command-line overrides and validate.
fn load_config(cli: &cli::Cli) -> Result<PlotConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.is_file()),
    };

    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: PlotConfig = toml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            traceln!("Loaded config from {}", path.display());
            config
        }
        None => {
            traceln!("No config file; using built-in defaults");
            PlotConfig::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output_path.clone_from(output);
    }
    if let Some(font) = &cli.font {
        config.font_path = Some(font.clone());
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

/// Read benchmark text from `path`, or standard input when `None`.
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let _t = StageTimer::start("reading input");
    match path {
        Some(path) => read_file(path),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading input from stdin")?;
            Ok(text)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading input {}", path.display()))
}

/// Print stage diagnostics, warnings and the fit summary.
fn report(analysis: &Analysis, config: &PlotConfig) {
    traceln!(
        "Parsed {} records into {} series",
        analysis.records.len(),
        analysis.series.len()
    );

    if analysis.records.is_empty() {
        warnln!("no benchmark records found in input");
    }

    for fitted in &analysis.series {
        let dups = fitted.series.duplicate_sizes();
        if !dups.is_empty() {
            warnln!(
                "series '{}' repeats size(s) {dups:?}; fitting them as separate samples",
                fitted.series.label
            );
        }
    }
    for failure in analysis.fit_failures() {
        warnln!("no trend line for '{}': {failure}", failure.label());
    }

    if diag::detail() != Detail::Silent {
        output::print_trend_table(analysis, config);
    }
}
