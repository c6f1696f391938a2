use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Header names of the benchmark table, in the order the harness writes them.
pub const COL_DOMAIN: &str = "domain";
pub const COL_PROBLEM: &str = "problem_number";
pub const COL_MCP_TIME: &str = "MCP_time";
pub const COL_MCP_LENGTH: &str = "MCP_length";
pub const COL_HSP_TIME: &str = "HSP_time";
pub const COL_HSP_LENGTH: &str = "HSP_length";

pub const COLUMNS: [&str; 6] = [
    COL_DOMAIN,
    COL_PROBLEM,
    COL_MCP_TIME,
    COL_MCP_LENGTH,
    COL_HSP_TIME,
    COL_HSP_LENGTH,
];

// ---------------------------------------------------------------------------
// Planner / Metric – the two axes a chart is selected by
// ---------------------------------------------------------------------------

/// The two compared planners. Only used as column selectors and legend labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planner {
    Mcp,
    Hsp,
}

impl Planner {
    pub const ALL: [Planner; 2] = [Planner::Mcp, Planner::Hsp];

    pub fn label(self) -> &'static str {
        match self {
            Planner::Mcp => "MCP",
            Planner::Hsp => "HSP",
        }
    }
}

impl fmt::Display for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a chart measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Resolution time (`*_time` columns).
    Runtime,
    /// Plan length (`*_length` columns).
    Steps,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Runtime, Metric::Steps];

    pub fn x_label(self) -> &'static str {
        "Problem number"
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Metric::Runtime => "Resolution time",
            Metric::Steps => "Number of steps to resolve",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the benchmark table
// ---------------------------------------------------------------------------

/// One benchmark row. Missing numeric cells are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub domain: String,
    /// Kept verbatim; only interpreted as a number when sorting.
    pub problem_number: String,
    #[serde(rename = "MCP_time")]
    pub mcp_time: f64,
    #[serde(rename = "MCP_length")]
    pub mcp_length: f64,
    #[serde(rename = "HSP_time")]
    pub hsp_time: f64,
    #[serde(rename = "HSP_length")]
    pub hsp_length: f64,
}

impl Record {
    pub fn value(&self, planner: Planner, metric: Metric) -> f64 {
        match (planner, metric) {
            (Planner::Mcp, Metric::Runtime) => self.mcp_time,
            (Planner::Mcp, Metric::Steps) => self.mcp_length,
            (Planner::Hsp, Metric::Runtime) => self.hsp_time,
            (Planner::Hsp, Metric::Steps) => self.hsp_length,
        }
    }

    pub fn problem_key(&self) -> ProblemKey<'_> {
        ProblemKey::new(&self.problem_number)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>6}  MCP {:>10.4} s {:>6} steps  HSP {:>10.4} s {:>6} steps",
            self.domain,
            self.problem_number,
            self.mcp_time,
            self.mcp_length,
            self.hsp_time,
            self.hsp_length
        )
    }
}

/// Sort key for problem numbers: numeric values first (ascending), then any
/// non-numeric labels by text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProblemKey<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> ProblemKey<'a> {
    pub fn new(raw: &'a str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() => ProblemKey::Number(v),
            _ => ProblemKey::Text(raw),
        }
    }
}

impl Eq for ProblemKey<'_> {}

impl PartialOrd for ProblemKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProblemKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ProblemKey::Number(a), ProblemKey::Number(b)) => a.total_cmp(b),
            (ProblemKey::Number(_), ProblemKey::Text(_)) => Ordering::Less,
            (ProblemKey::Text(_), ProblemKey::Number(_)) => Ordering::Greater,
            (ProblemKey::Text(a), ProblemKey::Text(b)) => a.cmp(b),
        }
    }
}

// ---------------------------------------------------------------------------
// BenchmarkTable – the complete loaded input
// ---------------------------------------------------------------------------

/// All records of one input file, in file order.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    pub records: Vec<Record>,
    /// Input lines dropped as malformed while loading.
    pub skipped: usize,
}

impl BenchmarkTable {
    pub fn new(records: Vec<Record>, skipped: usize) -> Self {
        BenchmarkTable { records, skipped }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct domain labels present in the table.
    pub fn domains(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.domain.as_str()).collect()
    }

    /// First `n` records, for the load preview.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

// ---------------------------------------------------------------------------
// DomainSeries – parallel per-domain sequences fed to the charts
// ---------------------------------------------------------------------------

/// Five parallel sequences for one domain. Index `i` of every sequence comes
/// from the same source record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainSeries {
    pub problems: Vec<String>,
    pub times_mcp: Vec<f64>,
    pub steps_mcp: Vec<f64>,
    pub times_hsp: Vec<f64>,
    pub steps_hsp: Vec<f64>,
}

impl DomainSeries {
    pub fn push(&mut self, record: &Record) {
        self.problems.push(record.problem_number.clone());
        self.times_mcp.push(record.mcp_time);
        self.steps_mcp.push(record.mcp_length);
        self.times_hsp.push(record.hsp_time);
        self.steps_hsp.push(record.hsp_length);
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn values(&self, planner: Planner, metric: Metric) -> &[f64] {
        match (planner, metric) {
            (Planner::Mcp, Metric::Runtime) => &self.times_mcp,
            (Planner::Mcp, Metric::Steps) => &self.steps_mcp,
            (Planner::Hsp, Metric::Runtime) => &self.times_hsp,
            (Planner::Hsp, Metric::Steps) => &self.steps_hsp,
        }
    }
}
