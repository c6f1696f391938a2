use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use planner_report::config::{load_report_config, ReportConfig, Variant};
use planner_report::report;

fn cli() -> Command {
    Command::new("planner-report")
        .version(clap::crate_version!())
        .about("Charts MCP vs HSP planner benchmark results per domain")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON report configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help(
                    "Benchmark table (.csv, .json or .parquet). \
                     Overrides the configuration file.",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Directory the PNG charts are written to. Overrides the configuration file.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .help("Report behaviour: 'sorted' (by problem number) or 'legacy' (by HSP value)")
                .value_parser(clap::value_parser!(Variant)),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .help("TrueType font used for chart text")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("print_config")
                .long("print-config")
                .help("Print the effective configuration as JSON and exit")
                .action(ArgAction::SetTrue),
        )
}

/// Defaults, then the config file, then command-line overrides.
fn resolve_config(matches: &ArgMatches) -> Result<ReportConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => load_report_config(path)?,
        None => ReportConfig::default(),
    };
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config.input = input.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = dir.clone();
    }
    if let Some(variant) = matches.get_one::<Variant>("variant") {
        config.variant = *variant;
    }
    if let Some(font) = matches.get_one::<PathBuf>("font") {
        config.font = Some(font.clone());
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(
            env_logger::Env::default()
                .filter_or("PLANNER_REPORT_LOG", "warn,planner_report=info"),
        )
        .init();

    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;

    if matches.get_flag("print_config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    log::info!(
        "Reading {} ({} variant), writing charts to {}",
        config.input.display(),
        config.variant,
        config.output_dir.display()
    );
    let summary = report::run(&config)?;
    log::info!(
        "Done: {} records, {} skipped, {} charts",
        summary.records,
        summary.skipped,
        summary.charts.len()
    );
    Ok(())
}
