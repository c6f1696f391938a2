use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::chart::{self, ChartStyle, LineChart};
use crate::color::PlannerColors;
use crate::config::ReportConfig;
use crate::data::filter::collect_domain;
use crate::data::loader::load_file;
use crate::data::model::{BenchmarkTable, Metric};
use crate::fonts::ensure_chart_font;

/// A chart ready to render, with its destination.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChart {
    pub path: PathBuf,
    pub chart: LineChart,
}

/// Every chart of a report, with the matching row count of each domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPlan {
    /// Matching rows per domain label, in chart order.
    pub domain_rows: Vec<(String, usize)>,
    pub charts: Vec<PlannedChart>,
}

/// What a report run did.
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    pub records: usize,
    pub skipped: usize,
    /// Matching rows per domain label, in chart order.
    pub domain_rows: Vec<(String, usize)>,
    pub charts: Vec<PathBuf>,
}

/// Group `table` by the configured domains and lay out every chart, without
/// rendering. Each domain yields its runtime chart then its steps chart.
pub fn build_charts(table: &BenchmarkTable, config: &ReportConfig) -> ReportPlan {
    let row_order = config.variant.row_order();
    let plot_order = config.variant.plot_order();

    let domains = config.domains();
    let grouped: Vec<_> = domains
        .iter()
        .map(|d| (d, collect_domain(table, &d.label, row_order)))
        .collect();

    let mut plan = ReportPlan {
        domain_rows: Vec::with_capacity(grouped.len()),
        charts: Vec::with_capacity(grouped.len() * Metric::ALL.len()),
    };
    for (domain, series) in &grouped {
        log::info!("Domain '{}': {} rows", domain.label, series.len());
        plan.domain_rows.push((domain.label.clone(), series.len()));
        for metric in Metric::ALL {
            let (title, file) = match metric {
                Metric::Runtime => (&domain.runtime_title, &domain.runtime_file),
                Metric::Steps => (&domain.steps_title, &domain.steps_file),
            };
            plan.charts.push(PlannedChart {
                path: config.output_dir.join(file),
                chart: LineChart::from_series(series, metric, title).reordered(plot_order),
            });
        }
    }
    plan
}

/// Load the input, build every chart and write them as PNG files.
pub fn run(config: &ReportConfig) -> Result<ReportSummary> {
    config.validate()?;

    let table = load_file(&config.input)?;

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;

    let style = ChartStyle {
        width: config.width,
        height: config.height,
        colors: PlannerColors::default(),
        text: ensure_chart_font(config.font.as_deref()),
    };

    let plan = build_charts(&table, config);

    let mut summary = ReportSummary {
        records: table.len(),
        skipped: table.skipped,
        domain_rows: plan.domain_rows,
        charts: Vec::with_capacity(plan.charts.len()),
    };

    for PlannedChart { path, chart } in plan.charts {
        chart::save_png(&chart, &path, &style)?;
        log::info!("Wrote {} ({} points)", path.display(), chart.len());
        summary.charts.push(path);
    }

    Ok(summary)
}
