//! Chart rendering: error-bar series, trend lines and a fixed grid.
//!
//! The chart is drawn into a staging file beside the destination and renamed
//! over it once the backend has flushed, so a failed render never leaves a
//! truncated image at `output_path`.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::Analysis;
use crate::config::{AxesConfig, MAX_GRID_LINES, PlotConfig};
use crate::error::Error;
use crate::font::{ChartFont, FONT_FAMILY};

/// Series colors, assigned in series order.
const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
];

/// Grid line colors.
const MAJOR_GRID: RGBColor = RGBColor(176, 176, 176);
const MINOR_GRID: RGBColor = RGBColor(224, 224, 224);

/// Width of the error bar caps in pixels.
const CAP_WIDTH: u32 = 10;
const MARKER_SIZE: i32 = 5;

/// Image encoding, chosen from the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// Raster image; the extension selects the encoder.
    Bitmap,
    /// Scalable vector graphics.
    Svg,
}

impl ChartFormat {
    /// Format implied by `path`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Bitmap,
        }
    }
}

/// Render `analysis` to `config.output_path`, replacing any existing file.
///
/// Series whose fit failed are drawn without a trend line.
pub fn render_chart(analysis: &Analysis, config: &PlotConfig, font: &ChartFont) -> Result<(), Error> {
    let output = &config.output_path;
    let staging = StagingFile::create(output)?;
    let size = (config.image_size[0], config.image_size[1]);

    match ChartFormat::from_path(output) {
        ChartFormat::Svg => {
            let root = SVGBackend::new(staging.path(), size).into_drawing_area();
            draw(&root, analysis, config, font.has_text()).map_err(draw_error)?;
        }
        ChartFormat::Bitmap => {
            let root = BitMapBackend::new(staging.path(), size).into_drawing_area();
            draw(&root, analysis, config, font.has_text()).map_err(draw_error)?;
        }
    }

    staging.commit()
}

fn draw_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> Error {
    Error::Draw(err.to_string())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &Analysis,
    config: &PlotConfig,
    text: bool,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let axes = &config.axes;
    let labels = &config.labels;
    let text_style = (FONT_FAMILY, labels.text_size);

    root.fill(&WHITE)?;

    let [x_lo, x_hi] = axes.x_range;
    let [y_lo, y_hi] = axes.y_range;
    let (x_major, x_minor, y_major, y_minor) = grid_points(axes);

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if text {
        builder
            .caption(&labels.title, (FONT_FAMILY, labels.title_size))
            .x_label_area_size(labels.text_size * 3)
            .y_label_area_size(labels.text_size * 7);
    }
    let mut chart = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    // Minor lines first so majors stay on top where they cross.
    for (xs, ys, style) in [
        (&x_minor, &y_minor, MINOR_GRID.stroke_width(1)),
        (&x_major, &y_major, MAJOR_GRID.stroke_width(1)),
    ] {
        chart.draw_series(
            xs.iter()
                .map(|&x| PathElement::new(vec![(x, y_lo), (x, y_hi)], style)),
        )?;
        chart.draw_series(
            ys.iter()
                .map(|&y| PathElement::new(vec![(x_lo, y), (x_hi, y)], style)),
        )?;
    }

    let suffix = labels.y_tick_suffix.as_str();
    let x_format = |x: &f64| tick_label(*x, "");
    let y_format = |y: &f64| tick_label(*y, suffix);

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format);
        if text {
            mesh.x_labels(x_major.len())
                .y_labels(y_major.len())
                .x_desc(labels.x_label.as_str())
                .y_desc(labels.y_label.as_str())
                .label_style(text_style)
                .axis_desc_style(text_style);
        }
        mesh.draw()?;
    }

    for (idx, fitted) in analysis.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let series = &fitted.series;

        chart
            .draw_series(LineSeries::new(series.points(), color.stroke_width(1)))?
            .label(config.display_name(&series.label))
            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));

        chart.draw_series(series.points().zip(&series.errors).map(|((x, y), &e)| {
            ErrorBar::new_vertical(x, y - e, y, y + e, color.stroke_width(1), CAP_WIDTH)
        }))?;
        chart.draw_series(
            series
                .points()
                .map(|point| Circle::new(point, MARKER_SIZE, color.filled())),
        )?;

        if let Ok(trend) = &fitted.trend {
            chart.draw_series(LineSeries::new(
                trend.sample(axes.trend_domain, axes.trend_samples),
                color.mix(0.7).stroke_width(2),
            ))?;
        }
    }

    if text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(text_style)
            .draw()?;
    }

    root.present()
}

/// Major and minor gridline positions for both axes.
fn grid_points(axes: &AxesConfig) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let x_major = multiples(axes.x_range, axes.x_major_step);
    let y_major = multiples(axes.y_range, axes.y_major_step);
    let x_minor = minor_multiples(axes.x_range, axes.x_minor_step, &x_major);
    let y_minor = minor_multiples(axes.y_range, axes.y_minor_step, &y_major);
    (x_major, x_minor, y_major, y_minor)
}

/// Every multiple of `step` inside `[lo, hi]`.
///
/// Empty when the range would hold more than [`MAX_GRID_LINES`] lines;
/// `PlotConfig::validate` rejects such axes up front.
fn multiples([lo, hi]: [f64; 2], step: f64) -> Vec<f64> {
    let first = (lo / step).ceil();
    let last = (hi / step + 1e-9).floor();
    let span = last - first;
    if !span.is_finite() || span < 0.0 || span >= MAX_GRID_LINES as f64 {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = span as usize + 1;
    (0..count).map(|k| (first + k as f64) * step).collect()
}

fn minor_multiples(range: [f64; 2], step: Option<f64>, major: &[f64]) -> Vec<f64> {
    let Some(step) = step else {
        return Vec::new();
    };
    multiples(range, step)
        .into_iter()
        .filter(|v| !major.iter().any(|m| (m - v).abs() < step * 1e-6))
        .collect()
}

/// Tick text: integers without a fractional part, then the unit suffix.
fn tick_label(value: f64, suffix: &str) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}{suffix}")
    } else {
        format!("{value}{suffix}")
    }
}

/// Drawing target beside the final path, removed unless committed.
struct StagingFile {
    path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagingFile {
    /// Create the staging file, surfacing permission and missing-directory
    /// errors before any drawing happens.
    fn create(target: &Path) -> Result<Self, Error> {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staged_name = match target.extension() {
            Some(ext) => format!(".{name}.partial.{}", ext.to_string_lossy()),
            None => format!(".{name}.partial"),
        };
        let path = target.with_file_name(staged_name);

        std::fs::File::create(&path).map_err(|e| Error::io(&path, e))?;
        Ok(Self {
            path,
            target: target.to_path_buf(),
            committed: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Move the finished image into place.
    fn commit(mut self) -> Result<(), Error> {
        std::fs::rename(&self.path, &self.target).map_err(|e| Error::io(&self.target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
