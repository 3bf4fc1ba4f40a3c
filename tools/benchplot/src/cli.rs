//! Command-line interface definitions for benchplot.

use clap::Parser;
use std::path::PathBuf;

/// Chart libtest benchmark output with linear trend lines.
#[derive(Parser)]
#[command(name = "benchplot", version, about)]
pub struct Cli {
    /// Benchmark output to read (`-` or omitted reads standard input).
    pub input: Option<PathBuf>,

    /// Configuration file (default: `benchplot.toml` in the current directory, if present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Chart destination, overriding `output_path` from the configuration.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Font file for chart text, overriding `font_path` from the configuration.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Print the fit summary without rendering a chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Suppress the summary table; show only warnings and errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print per-stage diagnostics and timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Input path, or `None` for standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
