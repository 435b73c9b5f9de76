//! Chart rendering to SVG files.

use crate::reports::series::Series;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

const FONT: &str = "sans-serif";
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// What a chart draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// One vertical bar per point, labelled with its value.
    Bar(Series),
    /// One horizontal bar per point, first point at the bottom.
    HorizontalBar(Series),
    /// Distribution of raw values.
    BoxPlot(Vec<f64>),
}

/// A fully computed chart, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub file_name: String,
    pub size: (u32, u32),
    pub kind: ChartKind,
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str, file_name: &str, kind: ChartKind) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            file_name: file_name.to_string(),
            size: (800, 600),
            kind,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

/// Text drawn on top of a bar.
pub fn value_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Renders `chart` into `dir/<file_name>` and returns the written path.
#[tracing::instrument(skip(chart), fields(file = %chart.file_name))]
pub fn render(chart: &Chart, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&chart.file_name);

    let drawn = match &chart.kind {
        ChartKind::Bar(series) => draw_bars(chart, series, &path),
        ChartKind::HorizontalBar(series) => draw_horizontal_bars(chart, series, &path),
        ChartKind::BoxPlot(values) => draw_box_plot(chart, values, &path),
    };
    drawn.with_context(|| format!("failed to render {}", path.display()))?;

    info!(path = %path.display(), "Chart written");
    Ok(path)
}

fn draw_bars(chart: &Chart, series: &Series, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let labels = series.labels();
    let slots = series.len().max(1);
    let top = series.max_value().max(1.0) * 1.1;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, 20))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..top)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(slots)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    ctx.draw_series(series.points.iter().enumerate().map(|(i, (_, v))| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
            BAR_COLOR.filled(),
        );
        bar.set_margin(0, 0, 5, 5);
        bar
    }))?;

    ctx.draw_series(series.points.iter().enumerate().map(|(i, (_, v))| {
        Text::new(
            value_label(*v),
            (SegmentValue::CenterOf(i), *v),
            (FONT, 12).into_font().color(&BLACK),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_horizontal_bars(chart: &Chart, series: &Series, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let labels = series.labels();
    let slots = series.len().max(1);
    let right = series.max_value().max(1.0) * 1.15;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, 20))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(180)
        .build_cartesian_2d(0f64..right, (0..slots).into_segmented())?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .y_labels(slots)
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    ctx.draw_series(series.points.iter().enumerate().map(|(i, (_, v))| {
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(i)), (*v, SegmentValue::Exact(i + 1))],
            BAR_COLOR.filled(),
        );
        bar.set_margin(5, 5, 0, 0);
        bar
    }))?;

    ctx.draw_series(series.points.iter().enumerate().map(|(i, (_, v))| {
        Text::new(
            format!(" {}", value_label(*v)),
            (*v, SegmentValue::CenterOf(i)),
            (FONT, 12).into_font().color(&BLACK),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_box_plot(chart: &Chart, values: &[f64], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if low.is_finite() && high.is_finite() {
        (low as f32, high as f32)
    } else {
        (0.0, 1.0)
    };
    let pad = ((high - low) * 0.05).max(1.0);

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, 20))
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d((0..1usize).into_segmented(), (low - pad)..(high + pad))?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(1)
        .x_label_formatter(&|_| String::new())
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    if !values.is_empty() {
        let quartiles = Quartiles::new(values);
        ctx.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(0), &quartiles)
                .width(80)
                .style(BAR_COLOR),
        ))?;
    }

    root.present()?;
    Ok(())
}
