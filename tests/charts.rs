//! Integration tests for chart layout and PNG rendering.

use planner_report::chart::{save_png, ChartStyle, LineChart, PlotOrder};
use planner_report::data::model::{DomainSeries, Metric, Planner};
use planner_report::fonts::ensure_chart_font;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn series() -> DomainSeries {
    DomainSeries {
        problems: vec!["1".into(), "2".into(), "3".into(), "4".into()],
        times_mcp: vec![0.9, 1.5, 0.4, 2.0],
        steps_mcp: vec![8.0, 10.0, 6.0, 14.0],
        times_hsp: vec![1.1, 2.0, 0.3, 1.2],
        steps_hsp: vec![9.0, 12.0, 5.0, 11.0],
    }
}

fn assert_png(path: &std::path::Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.len() > PNG_MAGIC.len());
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn from_series_selects_metric_columns() {
    let runtime = LineChart::from_series(&series(), Metric::Runtime, "rt");
    assert_eq!(runtime.values(Planner::Mcp), &[0.9, 1.5, 0.4, 2.0]);
    assert_eq!(runtime.values(Planner::Hsp), &[1.1, 2.0, 0.3, 1.2]);
    assert_eq!(runtime.y_label, "Resolution time");
    assert_eq!(runtime.x_label, "Problem number");

    let steps = LineChart::from_series(&series(), Metric::Steps, "st");
    assert_eq!(steps.mcp, vec![8.0, 10.0, 6.0, 14.0]);
    assert_eq!(steps.y_label, "Number of steps to resolve");
}

#[test]
fn as_given_keeps_order() {
    let chart = LineChart::from_series(&series(), Metric::Runtime, "rt");
    assert_eq!(chart.clone().reordered(PlotOrder::AsGiven), chart);
}

#[test]
fn by_hsp_sorts_all_three_sequences_together() {
    let chart =
        LineChart::from_series(&series(), Metric::Runtime, "rt").reordered(PlotOrder::ByHsp);
    assert_eq!(chart.hsp, vec![0.3, 1.1, 1.2, 2.0]);
    assert_eq!(chart.mcp, vec![0.4, 0.9, 2.0, 1.5]);
    assert_eq!(chart.problems, vec!["3", "1", "4", "2"]);
}

#[test]
fn by_hsp_breaks_ties_on_mcp_then_problem() {
    let s = DomainSeries {
        problems: vec!["b".into(), "a".into(), "c".into()],
        times_mcp: vec![2.0, 2.0, 1.0],
        steps_mcp: vec![0.0; 3],
        times_hsp: vec![5.0, 5.0, 5.0],
        steps_hsp: vec![0.0; 3],
    };
    let chart = LineChart::from_series(&s, Metric::Runtime, "t").reordered(PlotOrder::ByHsp);
    assert_eq!(chart.problems, vec!["c", "a", "b"]);
}

#[test]
fn repeated_problem_labels_share_a_position() {
    let mut chart = LineChart::from_series(&series(), Metric::Runtime, "rt");
    chart.problems = vec!["2".into(), "1".into(), "2".into(), "3".into()];
    let (labels, xs) = chart.categories();
    assert_eq!(labels, vec!["2", "1", "3"]);
    assert_eq!(xs, vec![0.0, 1.0, 0.0, 2.0]);
}

#[test]
fn y_range_covers_finite_values() {
    let mut chart = LineChart::from_series(&series(), Metric::Steps, "st");
    chart.hsp[0] = f64::NAN;
    let range = chart.y_range();
    assert!(range.start < 5.0);
    assert!(range.end > 14.0);
}

#[test]
fn y_range_of_empty_chart_is_unit() {
    let chart = LineChart::from_series(&DomainSeries::default(), Metric::Runtime, "empty");
    assert_eq!(chart.y_range(), 0.0..1.0);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn renders_png_with_system_font_when_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphRuntimeBlocks.png");
    let style = ChartStyle {
        text: ensure_chart_font(None),
        ..ChartStyle::default()
    };

    let chart = LineChart::from_series(&series(), Metric::Runtime, "Resolution time");
    save_png(&chart, &path, &style).unwrap();
    assert_png(&path);

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (640, 480));
}

#[test]
fn renders_without_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.png");
    let style = ChartStyle {
        width: 320,
        height: 200,
        text: false,
        ..ChartStyle::default()
    };

    let chart = LineChart::from_series(&series(), Metric::Steps, "Steps");
    save_png(&chart, &path, &style).unwrap();
    assert_png(&path);
}

#[test]
fn empty_chart_still_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphRuntimeGripper.png");
    let style = ChartStyle {
        text: false,
        ..ChartStyle::default()
    };

    let chart = LineChart::from_series(&DomainSeries::default(), Metric::Runtime, "empty");
    save_png(&chart, &path, &style).unwrap();
    assert_png(&path);
}

#[test]
fn missing_values_do_not_fail_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gaps.png");
    let mut s = series();
    s.times_mcp[1] = f64::NAN;
    s.times_hsp = vec![f64::NAN; 4];
    let style = ChartStyle {
        text: false,
        ..ChartStyle::default()
    };

    let chart = LineChart::from_series(&s, Metric::Runtime, "gaps");
    save_png(&chart, &path, &style).unwrap();
    assert_png(&path);
}

#[test]
fn existing_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.png");
    std::fs::write(&path, b"stale").unwrap();
    let style = ChartStyle {
        text: false,
        ..ChartStyle::default()
    };

    let chart = LineChart::from_series(&series(), Metric::Runtime, "rt");
    save_png(&chart, &path, &style).unwrap();
    assert_png(&path);
}
