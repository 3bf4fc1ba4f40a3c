//! Benchmark comparison charts from libtest `cargo bench` output.
//!
//! Pipeline: parse records → group into per-label series → fit a linear
//! trend per series → render error bars and trend lines to an image.
//!
//! [`analyze`] runs the numeric stages and is deterministic for a fixed
//! input and configuration. [`render::render_chart`] is the only stage that
//! touches the filesystem.

pub mod config;
pub mod error;
pub mod font;
pub mod output;
pub mod record;
pub mod render;
pub mod series;
pub mod trend;

pub use config::PlotConfig;
pub use error::{Error, FitError};
pub use record::BenchmarkRecord;
pub use series::Series;
pub use trend::TrendModel;

/// A series together with the outcome of fitting it.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedSeries {
    /// The scaled samples.
    pub series: Series,
    /// The linear trend, or why none could be fitted.
    pub trend: Result<TrendModel, FitError>,
}

/// Result of the numeric stages of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every record parsed from the input, in input order.
    pub records: Vec<BenchmarkRecord>,
    /// One entry per label, in order of first appearance.
    pub series: Vec<FittedSeries>,
}

impl Analysis {
    /// Fit failures, one per series that has no trend line.
    pub fn fit_failures(&self) -> impl Iterator<Item = &FitError> {
        self.series.iter().filter_map(|f| f.trend.as_ref().err())
    }
}

/// Parse `text`, group the records and fit each series.
///
/// Only label mismatches during grouping fail; fit failures are recorded per
/// series.
pub fn analyze(text: &str, config: &PlotConfig) -> Result<Analysis, Error> {
    let records = record::parse_records(text);
    let series = series::aggregate(&records, &config.scale)?
        .into_iter()
        .map(|series| FittedSeries {
            trend: trend::fit(&series),
            series,
        })
        .collect();
    Ok(Analysis { records, series })
}
