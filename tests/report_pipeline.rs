//! End-to-end tests of the report driver.

use std::path::{Path, PathBuf};

use planner_report::config::{DomainChartConfig, ReportConfig, Variant};
use planner_report::data::loader::load_file;
use planner_report::report::{build_charts, run};

const DATA: &str = "\
domain,problem_number,MCP_time,MCP_length,HSP_time,HSP_length
blocks,2,1.5,10,2.0,12
blocks,1,0.9,8,1.1,9
logistics,2,4.0,33,3.1,28
logistics,1,3.0,30,2.5,25
depot,1,5.0,40,4.0,35
unknown_domain,1,9.9,99,9.9,99
";

const OUTPUTS: [&str; 6] = [
    "graphRuntimeBlocks.png",
    "graphNumberOfStepsBlocks.png",
    "graphRuntimeLogistics.png",
    "graphNumberOfStepsLogistics.png",
    "graphRuntimeGripper.png",
    "graphNumberOfStepsGripper.png",
];

fn config_in(dir: &Path) -> ReportConfig {
    let input = dir.join("data.csv");
    std::fs::write(&input, DATA).unwrap();
    ReportConfig {
        input,
        output_dir: dir.to_path_buf(),
        ..ReportConfig::default()
    }
}

#[test]
fn writes_six_charts_even_without_gripper_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let summary = run(&config).unwrap();

    assert_eq!(summary.records, 6);
    assert_eq!(summary.skipped, 0);
    let expected: Vec<PathBuf> = OUTPUTS.iter().map(|f| dir.path().join(f)).collect();
    assert_eq!(summary.charts, expected);
    for path in &expected {
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert_eq!(
        summary.domain_rows,
        vec![
            ("blocks".to_string(), 2),
            ("logistics".to_string(), 2),
            ("gripper".to_string(), 0),
        ]
    );
}

#[test]
fn charts_follow_domain_order_and_titles() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let table = load_file(&config.input).unwrap();

    let planned = build_charts(&table, &config).charts;
    let names: Vec<String> = planned
        .iter()
        .map(|p| p.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, OUTPUTS);

    assert_eq!(
        planned[0].chart.title,
        "Resolution time of MCP and HSP planners in blocksworld"
    );
    assert_eq!(planned[0].chart.problems, vec!["1", "2"]);
    assert_eq!(planned[0].chart.mcp, vec![0.9, 1.5]);
    assert_eq!(planned[1].chart.hsp, vec![9.0, 12.0]);
    assert!(planned[4].chart.is_empty());
    assert!(planned[5].chart.is_empty());
}

#[test]
fn unknown_domain_is_not_charted() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let table = load_file(&config.input).unwrap();

    for planned in build_charts(&table, &config).charts {
        assert!(!planned.chart.mcp.contains(&9.9));
        assert!(!planned.chart.mcp.contains(&99.0));
    }
}

#[test]
fn domain_counts_match_chart_lengths() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let table = load_file(&config.input).unwrap();

    let plan = build_charts(&table, &config);
    assert_eq!(
        plan.domain_rows,
        vec![
            ("blocks".to_string(), 2),
            ("logistics".to_string(), 2),
            ("gripper".to_string(), 0),
        ]
    );
    for (i, (_, rows)) in plan.domain_rows.iter().enumerate() {
        assert_eq!(plan.charts[2 * i].chart.len(), *rows);
        assert_eq!(plan.charts[2 * i + 1].chart.len(), *rows);
    }
}

#[test]
fn building_twice_gives_identical_charts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let table = load_file(&config.input).unwrap();

    assert_eq!(build_charts(&table, &config), build_charts(&table, &config));
}

#[test]
fn legacy_variant_uses_placeholder_labels_and_hsp_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(
        &input,
        "domain,problem_number,MCP_time,MCP_length,HSP_time,HSP_length\n\
         domain,1,0.9,8,3.0,9\n\
         domain,2,1.5,10,1.0,12\n\
         domain,3,0.5,7,2.0,6\n\
         blocks,4,1.0,1,1.0,1\n\
         cs_domain,1,3.0,30,2.5,25\n",
    )
    .unwrap();
    let config = ReportConfig {
        input,
        output_dir: dir.path().to_path_buf(),
        variant: Variant::Legacy,
        ..ReportConfig::default()
    };
    let table = load_file(&config.input).unwrap();

    let planned = build_charts(&table, &config).charts;
    let blocks_runtime = &planned[0].chart;
    assert_eq!(blocks_runtime.hsp, vec![1.0, 2.0, 3.0]);
    assert_eq!(blocks_runtime.problems, vec!["2", "3", "1"]);
    let blocks_steps = &planned[1].chart;
    assert_eq!(blocks_steps.hsp, vec![6.0, 9.0, 12.0]);
    assert_eq!(blocks_steps.problems, vec!["3", "1", "2"]);
    assert_eq!(planned[2].chart.len(), 1);
    assert!(planned[4].chart.is_empty());
}

#[test]
fn custom_domains_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.output_dir = dir.path().join("charts");
    config.domains = Some(vec![DomainChartConfig {
        label: "depot".to_string(),
        runtime_title: "Depot runtime".to_string(),
        runtime_file: "depot_time.png".to_string(),
        steps_title: "Depot steps".to_string(),
        steps_file: "depot_steps.png".to_string(),
    }]);

    let summary = run(&config).unwrap();
    assert_eq!(summary.charts.len(), 2);
    assert!(dir.path().join("charts/depot_time.png").is_file());
    assert!(dir.path().join("charts/depot_steps.png").is_file());
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        input: dir.path().join("data.csv"),
        output_dir: dir.path().to_path_buf(),
        ..ReportConfig::default()
    };
    assert!(run(&config).is_err());
}
