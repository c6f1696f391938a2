use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::PlannerColors;
use crate::data::model::{DomainSeries, Metric, Planner};
use crate::fonts::CHART_FONT_FAMILY;

// ---------------------------------------------------------------------------
// LineChart – the data intent of one output image
// ---------------------------------------------------------------------------

/// Order in which a chart's points are plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotOrder {
    /// Keep the order of the domain series.
    AsGiven,
    /// Re-sort all points by (HSP value, MCP value, problem label).
    ByHsp,
}

/// Title, axis labels and the ordered points of a two-planner line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Problem labels; categorical x positions.
    pub problems: Vec<String>,
    pub mcp: Vec<f64>,
    pub hsp: Vec<f64>,
}

impl LineChart {
    /// Select `metric` from a domain series.
    pub fn from_series(series: &DomainSeries, metric: Metric, title: &str) -> Self {
        LineChart {
            title: title.to_string(),
            x_label: metric.x_label().to_string(),
            y_label: metric.y_label().to_string(),
            problems: series.problems.clone(),
            mcp: series.values(Planner::Mcp, metric).to_vec(),
            hsp: series.values(Planner::Hsp, metric).to_vec(),
        }
    }

    pub fn values(&self, planner: Planner) -> &[f64] {
        match planner {
            Planner::Mcp => &self.mcp,
            Planner::Hsp => &self.hsp,
        }
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn reordered(self, order: PlotOrder) -> Self {
        match order {
            PlotOrder::AsGiven => self,
            PlotOrder::ByHsp => self.sorted_by_hsp(),
        }
    }

    fn sorted_by_hsp(self) -> Self {
        let LineChart {
            title,
            x_label,
            y_label,
            problems,
            mcp,
            hsp,
        } = self;

        let mut rows: Vec<(f64, f64, String)> = hsp
            .into_iter()
            .zip(mcp)
            .zip(problems)
            .map(|((h, m), p)| (h, m, p))
            .collect();
        rows.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then(a.1.total_cmp(&b.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        let mut chart = LineChart {
            title,
            x_label,
            y_label,
            problems: Vec::with_capacity(rows.len()),
            mcp: Vec::with_capacity(rows.len()),
            hsp: Vec::with_capacity(rows.len()),
        };
        for (h, m, p) in rows {
            chart.hsp.push(h);
            chart.mcp.push(m);
            chart.problems.push(p);
        }
        chart
    }

    /// Distinct problem labels in order of first appearance, and the x
    /// position of every point. Repeated labels share a position.
    pub fn categories(&self) -> (Vec<&str>, Vec<f64>) {
        let mut labels: Vec<&str> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut xs = Vec::with_capacity(self.problems.len());
        for p in &self.problems {
            let idx = match seen.get(p.as_str()) {
                Some(&idx) => idx,
                None => {
                    labels.push(p);
                    seen.insert(p, labels.len() - 1);
                    labels.len() - 1
                }
            };
            xs.push(idx as f64);
        }
        (labels, xs)
    }

    /// Value range covering every finite point of both planners, padded.
    pub fn y_range(&self) -> Range<f64> {
        let (min, max) = self
            .mcp
            .iter()
            .chain(self.hsp.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() {
            return 0.0..1.0;
        }
        if (max - min).abs() < f64::EPSILON {
            let pad = if min.abs() > 1.0 { min.abs() * 0.1 } else { 1.0 };
            return (min - pad)..(max + pad);
        }
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }
}

/// Split a line into runs of finite points; missing values break the line.
pub fn line_segments(xs: &[f64], ys: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn category_label(labels: &[&str], v: f64) -> String {
    let r = v.round();
    if (v - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    labels
        .get(r as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Canvas settings shared by every chart of a report.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub colors: PlannerColors,
    /// Draw title, axis labels, ticks and legend. Needs a registered font.
    pub text: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: 640,
            height: 480,
            colors: PlannerColors::default(),
            text: true,
        }
    }
}

/// Draw `chart` onto any plotters backend.
pub fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &LineChart,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (labels, xs) = chart.categories();
    let x_range = -0.5..(labels.len().max(1) as f64 - 0.5);

    let mut builder = ChartBuilder::on(root);
    builder.margin(15);
    if style.text {
        builder
            .caption(&chart.title, (CHART_FONT_FAMILY, 14))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut ctx = builder.build_cartesian_2d(x_range, chart.y_range())?;

    if style.text {
        let x_fmt = |v: &f64| category_label(&labels, *v);
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(labels.len().max(2))
            .x_label_formatter(&x_fmt)
            .label_style((CHART_FONT_FAMILY, 12))
            .axis_desc_style((CHART_FONT_FAMILY, 13))
            .draw()?;
    }

    for planner in Planner::ALL {
        let color = style.colors.color_for(planner);
        let segments = line_segments(&xs, chart.values(planner));
        ctx.draw_series(
            segments
                .into_iter()
                .map(|seg| PathElement::new(seg, color.stroke_width(2))),
        )?
        .label(planner.label())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if style.text {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((CHART_FONT_FAMILY, 12))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Render `chart` and write it to `path` as PNG, replacing any existing file.
pub fn save_png(chart: &LineChart, path: &Path, style: &ChartStyle) -> Result<()> {
    let (w, h) = (style.width, style.height);
    let mut buffer = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
        draw_chart(&root, chart, style)
            .with_context(|| format!("drawing chart '{}'", chart.title))?;
    }

    let image = image::RgbImage::from_raw(w, h, buffer).context("chart buffer size mismatch")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
