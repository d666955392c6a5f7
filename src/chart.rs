//! Terminal charts for experiment results
//!
//! Renders onto any [`io::Write`] so a rendering failure never disturbs the
//! simulation results being drawn.
use std::io::{self, Write};
use thiserror::Error;
use yansi::Paint;

/// A named sequence of values: per-parameter means for a line chart, or raw
/// episode scores for a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Error rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no data series to draw")]
    NoData,
    #[error("series \"{name}\" has {len} values but {expected} x-values")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

const BAR_WIDTH: usize = 40;
const PALETTE: [u8; 6] = [33, 178, 40, 135, 203, 45];

const fn color(index: usize) -> u8 {
    PALETTE[index % PALETTE.len()]
}

fn bar(fraction: f64, width: usize) -> String {
    let cells = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "▇".repeat(cells)
}

fn value_bounds(series: &[Series]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in series {
        for &value in &series.values {
            min = min.min(value);
            max = max.max(value);
        }
    }
    (min, max)
}

fn name_width(series: &[Series]) -> usize {
    series.iter().map(|s| s.name.len()).max().unwrap_or(0)
}

/// Draw one y-series per name against shared x-values.
///
/// Every series must have exactly one value per x-value. Bars are scaled
/// linearly between the minimum and maximum across all series.
pub fn render_line_chart<W: Write>(
    out: &mut W,
    title: &str,
    x_label: &str,
    xs: &[f64],
    series: &[Series],
) -> Result<(), ChartError> {
    if series.is_empty() || xs.is_empty() {
        return Err(ChartError::NoData);
    }
    for s in series {
        if s.values.len() != xs.len() {
            return Err(ChartError::LengthMismatch {
                name: s.name.clone(),
                len: s.values.len(),
                expected: xs.len(),
            });
        }
    }

    let (min, max) = value_bounds(series);
    let span = if max > min { max - min } else { 1.0 };
    let width = name_width(series);

    writeln!(out, "{}", Paint::new(title).bold())?;
    for (i, &x) in xs.iter().enumerate() {
        writeln!(out, "{} = {}", x_label, x)?;
        for (j, s) in series.iter().enumerate() {
            let value = s.values[i];
            let fraction = (value - min) / span;
            writeln!(
                out,
                "  {:<width$}  {} {:.2}",
                s.name,
                Paint::fixed(color(j), bar(fraction, BAR_WIDTH)),
                value,
                width = width,
            )?;
        }
    }
    Ok(())
}

/// Draw overlaid histograms of named score distributions.
///
/// Bins span the minimum to maximum score across all distributions; each bin
/// shows one bar per distribution, scaled to the largest bin count.
pub fn render_histogram<W: Write>(
    out: &mut W,
    title: &str,
    distributions: &[Series],
    num_bins: usize,
) -> Result<(), ChartError> {
    if distributions.is_empty()
        || num_bins == 0
        || distributions.iter().all(|d| d.values.is_empty())
    {
        return Err(ChartError::NoData);
    }

    let (min, max) = value_bounds(distributions);
    let span = if max > min { max - min } else { 1.0 };
    let bin_size = span / num_bins as f64;

    let mut counts = vec![vec![0_u64; num_bins]; distributions.len()];
    for (j, d) in distributions.iter().enumerate() {
        for &value in &d.values {
            // The maximum value falls into the last bin.
            let bin = (((value - min) / bin_size) as usize).min(num_bins - 1);
            counts[j][bin] += 1;
        }
    }
    let max_count = counts.iter().flatten().copied().max().unwrap_or(0).max(1);
    let width = name_width(distributions);

    writeln!(out, "{}", Paint::new(title).bold())?;
    for bin in 0..num_bins {
        let low = min + bin_size * bin as f64;
        writeln!(out, "[{:.1}, {:.1})", low, low + bin_size)?;
        for (j, d) in distributions.iter().enumerate() {
            let count = counts[j][bin];
            if count == 0 {
                continue;
            }
            let fraction = count as f64 / max_count as f64;
            writeln!(
                out,
                "  {:<width$}  {} {}",
                d.name,
                Paint::fixed(color(j), bar(fraction, BAR_WIDTH)),
                count,
                width = width,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_chart_renders_every_series() {
        let xs = [0.0, 0.1, 0.2];
        let series = [
            Series::new("Random", vec![-12.0, -14.0, -16.0]),
            Series::new("Full Reflex", vec![3.0, 8.0, 12.0]),
        ];
        let mut out = Vec::new();
        render_line_chart(&mut out, "Mean reward", "p", &xs, &series).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Mean reward"));
        assert!(text.contains("Random"));
        assert!(text.contains("Full Reflex"));
        assert_eq!(text.matches("p = ").count(), 3);
    }

    #[test]
    fn line_chart_rejects_mismatched_series() {
        let xs = [0.0, 0.1];
        let series = [Series::new("Random", vec![1.0])];
        let mut out = Vec::new();
        let result = render_line_chart(&mut out, "t", "x", &xs, &series);
        assert!(matches!(
            result,
            Err(ChartError::LengthMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            render_line_chart(&mut out, "t", "x", &[], &[]),
            Err(ChartError::NoData)
        ));
        assert!(matches!(
            render_histogram(&mut out, "t", &[], 15),
            Err(ChartError::NoData)
        ));
    }

    #[test]
    fn histogram_places_extremes_in_outer_bins() {
        let distributions = [Series::new("Greedy", vec![-100.0, 100.0, 100.0])];
        let mut out = Vec::new();
        render_histogram(&mut out, "Scores", &distributions, 2).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[-100.0, 0.0)"));
        assert!(text.contains("[0.0, 100.0)"));
    }
}
