//! Terminal output formatting for fitted series.

use std::io::{self, Write};

use crate::Analysis;
use crate::config::PlotConfig;

/// Print one row per series: label, legend text, samples and fit.
pub fn print_trend_table(analysis: &Analysis, config: &PlotConfig) {
    let stdout = io::stdout();
    let _ = write_trend_table(&mut stdout.lock(), analysis, config);
}

/// Write the table printed by [`print_trend_table`] to `out`.
pub fn write_trend_table<W: Write>(
    out: &mut W,
    analysis: &Analysis,
    config: &PlotConfig,
) -> io::Result<()> {
    if analysis.series.is_empty() {
        writeln!(out, "  No benchmark records to display.")?;
        return Ok(());
    }

    // Compute column widths.
    let max_label = analysis
        .series
        .iter()
        .map(|f| f.series.label.len())
        .max()
        .unwrap_or(5)
        .max(5);
    let max_name = analysis
        .series
        .iter()
        .map(|f| config.display_name(&f.series.label).chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    // Header.
    writeln!(out)?;
    writeln!(
        out,
        "  {:<lw$}  {:<nw$}  {:>7}  {:>12}  {:>12}",
        "Label",
        "Series",
        "Samples",
        "Slope",
        "Intercept",
        lw = max_label,
        nw = max_name
    )?;
    writeln!(
        out,
        "  {:-<lw$}  {:-<nw$}  {:->7}  {:->12}  {:->12}",
        "",
        "",
        "",
        "",
        "",
        lw = max_label,
        nw = max_name
    )?;

    for fitted in &analysis.series {
        let label = &fitted.series.label;
        let name = config.display_name(label);
        match &fitted.trend {
            Ok(trend) => writeln!(
                out,
                "  {:<lw$}  {:<nw$}  {:>7}  {:>12.4}  {:>12.4}",
                label,
                name,
                fitted.series.len(),
                trend.slope,
                trend.intercept,
                lw = max_label,
                nw = max_name
            )?,
            Err(err) => writeln!(
                out,
                "  {:<lw$}  {:<nw$}  {:>7}  no trend: {err}",
                label,
                name,
                fitted.series.len(),
                lw = max_label,
                nw = max_name
            )?,
        }
    }

    writeln!(out)?;
    writeln!(out, "  Records parsed: {}", analysis.records.len())?;
    writeln!(out)
}
