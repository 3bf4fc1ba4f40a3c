//! Configuration types for the plotting pipeline.
//!
//! Deserialized from `benchplot.toml`. Every field is optional; the defaults
//! reproduce the hyphenation benchmark chart.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Error;

/// Upper bound on the gridlines drawn along one axis at one spacing.
pub const MAX_GRID_LINES: usize = 10_000;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Destination of the rendered chart. The extension selects the format.
    pub output_path: PathBuf,
    /// Image width and height in pixels.
    pub image_size: [u32; 2],
    /// TTF/OTF/TTC file used for chart text. Probed from the system if absent.
    pub font_path: Option<PathBuf>,
    /// Unit conversion of raw timings.
    pub scale: ScaleConfig,
    /// Axis bounds, gridlines and trend line domain.
    pub axes: AxesConfig,
    /// Static chart text.
    pub labels: LabelConfig,
    /// Legend text keyed by the label token parsed from the input.
    pub series_names: BTreeMap<String, String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("result.png"),
            image_size: [1600, 960],
            font_path: None,
            scale: ScaleConfig::default(),
            axes: AxesConfig::default(),
            labels: LabelConfig::default(),
            series_names: BTreeMap::from([
                ("acdat".into(), "Aho\u{2013}Corasick Double-Array Trie".into()),
                ("crate".into(), "FnvHashMap Trie (hyphenation 0.6.1)".into()),
            ]),
        }
    }
}

impl PlotConfig {
    /// Legend text for a series, falling back to the raw label.
    pub fn display_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.series_names.get(label).map_or(label, String::as_str)
    }

    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<(), Error> {
        positive("scale.mean_divisor", self.scale.mean_divisor)?;
        positive("scale.error_divisor", self.scale.error_divisor())?;

        range("axes.x_range", self.axes.x_range)?;
        range("axes.y_range", self.axes.y_range)?;
        range("axes.trend_domain", self.axes.trend_domain)?;

        positive("axes.x_major_step", self.axes.x_major_step)?;
        positive("axes.y_major_step", self.axes.y_major_step)?;
        if let Some(step) = self.axes.x_minor_step {
            positive("axes.x_minor_step", step)?;
        }
        if let Some(step) = self.axes.y_minor_step {
            positive("axes.y_minor_step", step)?;
        }
        grid_density("axes.x_major_step", self.axes.x_range, Some(self.axes.x_major_step))?;
        grid_density("axes.x_minor_step", self.axes.x_range, self.axes.x_minor_step)?;
        grid_density("axes.y_major_step", self.axes.y_range, Some(self.axes.y_major_step))?;
        grid_density("axes.y_minor_step", self.axes.y_range, self.axes.y_minor_step)?;
        if self.axes.trend_samples < 2 {
            return Err(Error::Config(format!(
                "axes.trend_samples must be at least 2, got {}",
                self.axes.trend_samples
            )));
        }

        if self.image_size.contains(&0) {
            return Err(Error::Config(format!(
                "image_size must be non-zero, got {:?}",
                self.image_size
            )));
        }
        Ok(())
    }
}

/// `[scale]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    /// Divisor applied to raw mean timings.
    pub mean_divisor: f64,
    /// Divisor applied to raw error bounds. Defaults to `mean_divisor²`.
    pub error_divisor: Option<f64>,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            mean_divisor: 10_000.0,
            error_divisor: None,
        }
    }
}

impl ScaleConfig {
    /// Effective error divisor.
    pub fn error_divisor(&self) -> f64 {
        self.error_divisor
            .unwrap_or(self.mean_divisor * self.mean_divisor)
    }
}

/// `[axes]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxesConfig {
    /// Horizontal axis bounds.
    pub x_range: [f64; 2],
    /// Vertical axis bounds.
    pub y_range: [f64; 2],
    /// Spacing of labelled vertical gridlines.
    pub x_major_step: f64,
    /// Spacing of unlabelled vertical gridlines, if any.
    pub x_minor_step: Option<f64>,
    /// Spacing of labelled horizontal gridlines.
    pub y_major_step: f64,
    /// Spacing of unlabelled horizontal gridlines, if any.
    pub y_minor_step: Option<f64>,
    /// Horizontal span over which trend lines are drawn.
    pub trend_domain: [f64; 2],
    /// Number of evenly spaced samples along each trend line.
    pub trend_samples: usize,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            x_range: [0.0, 20.0],
            y_range: [0.0, 3500.0],
            x_major_step: 1.0,
            x_minor_step: None,
            y_major_step: 200.0,
            y_minor_step: Some(50.0),
            trend_domain: [0.0, 20.0],
            trend_samples: 100,
        }
    }
}

/// `[labels]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Chart caption.
    pub title: String,
    /// Horizontal axis description.
    pub x_label: String,
    /// Vertical axis description.
    pub y_label: String,
    /// Unit appended to every vertical tick label.
    pub y_tick_suffix: String,
    /// Caption font size in pixels.
    pub title_size: u32,
    /// Tick, axis and legend font size in pixels.
    pub text_size: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            title: "hyphenation speed benchmark".into(),
            x_label: "word length".into(),
            y_label: "time cost".into(),
            y_tick_suffix: "ns/word".into(),
            title_size: 40,
            text_size: 22,
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn range(name: &str, [lo, hi]: [f64; 2]) -> Result<(), Error> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{name} must be an increasing pair, got [{lo}, {hi}]"
        )))
    }
}

fn grid_density(name: &str, [lo, hi]: [f64; 2], step: Option<f64>) -> Result<(), Error> {
    let Some(step) = step else {
        return Ok(());
    };
    let lines = (hi - lo) / step;
    if lines.is_finite() && lines < MAX_GRID_LINES as f64 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{name} of {step} gives more than {MAX_GRID_LINES} gridlines over [{lo}, {hi}]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_reference_defaults() {
        let config: PlotConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.scale.error_divisor(), 100_000_000.0);
        config.validate().unwrap();
    }

    #[test]
    fn error_divisor_follows_mean_divisor() {
        let config: PlotConfig = toml::from_str("[scale]\nmean_divisor = 100.0\n").unwrap();
        assert_eq!(config.scale.error_divisor(), 10_000.0);

        let config: PlotConfig =
            toml::from_str("[scale]\nmean_divisor = 100.0\nerror_divisor = 7.0\n").unwrap();
        assert_eq!(config.scale.error_divisor(), 7.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PlotConfig = toml::from_str(
            r#"
            output_path = "out/chart.svg"

            [axes]
            y_range = [0.0, 1000.0]

            [series_names]
            fast = "Fast path"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/chart.svg"));
        assert_eq!(config.axes.y_range, [0.0, 1000.0]);
        assert_eq!(config.axes.x_range, [0.0, 20.0]);
        assert_eq!(config.display_name("fast"), "Fast path");
        assert_eq!(config.display_name("slow"), "slow");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<PlotConfig>("colour = \"red\"\n").is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = PlotConfig::default();
        config.scale.mean_divisor = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = PlotConfig::default();
        config.axes.x_range = [20.0, 0.0];
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = PlotConfig::default();
        config.axes.y_minor_step = Some(-1.0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = PlotConfig::default();
        config.image_size = [0, 960];
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_dense_grids() {
        let mut config = PlotConfig::default();
        config.axes.x_range = [0.0, 1e15];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("axes.x_major_step"), "{err}");

        let mut config = PlotConfig::default();
        config.axes.y_minor_step = Some(0.01);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("axes.y_minor_step"), "{err}");

        let mut config = PlotConfig::default();
        config.axes.y_range = [0.0, 9_000.0];
        config.axes.y_minor_step = Some(1.0);
        config.validate().unwrap();
    }
}
