//! Score distribution histogram
//!
//! Renders the composite score distribution as a 20-bin histogram over the
//! [0, 10] scale, with dashed vertical marker lines for the platform mean,
//! the critical-only mean, and the minimum score.

use crate::models::{PlatformSummary, ScoredPackage};
use anyhow::Result;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;
use tracing::info;

const BINS: usize = 20;
const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;

const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const MEAN_COLOR: RGBColor = RED;
const CRITICAL_MEAN_COLOR: RGBColor = RGBColor(0, 128, 0);
const MIN_COLOR: RGBColor = RGBColor(255, 140, 0);

fn bin_counts(scores: impl Iterator<Item = f64>) -> [u32; BINS] {
    let mut counts = [0u32; BINS];
    for score in scores {
        let bin = ((score / 10.0) * BINS as f64).floor() as usize;
        counts[bin.min(BINS - 1)] += 1;
    }
    counts
}

/// Render the histogram PNG to `path`.
pub fn render_histogram(
    path: &Path,
    packages: &[ScoredPackage],
    summary: &PlatformSummary,
) -> Result<()> {
    let counts = bin_counts(packages.iter().map(|p| p.security_score));
    let y_max = counts.iter().copied().max().unwrap_or(0) + 1;

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Security score distribution", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(48)
        .build_cartesian_2d(0f64..10f64, 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Security score")
        .y_desc("Packages")
        .draw()?;

    let bin_width = 10.0 / BINS as f64;
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = i as f64 * bin_width;
        let mut bar = Rectangle::new([(x0, 0), (x0 + bin_width, count)], BAR_COLOR.filled());
        bar.set_margin(0, 0, 1, 1);
        bar
    }))?;

    let mut marker = |value: f64, color: RGBColor, label: String| -> Result<()> {
        chart
            .draw_series(DashedLineSeries::new(
                [(value, 0u32), (value, y_max)],
                6,
                4,
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        Ok(())
    };

    marker(summary.mean, MEAN_COLOR, format!("Mean: {:.2}", summary.mean))?;
    if let Some(critical_mean) = summary.critical_mean {
        marker(
            critical_mean,
            CRITICAL_MEAN_COLOR,
            format!("Critical mean: {critical_mean:.2}"),
        )?;
    }
    marker(summary.min, MIN_COLOR, format!("Min: {:.2}", summary.min))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!("Histogram written to {}", path.display());
    Ok(())
}
