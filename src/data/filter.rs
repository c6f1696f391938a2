use serde::{Deserialize, Serialize};

use super::model::{BenchmarkTable, DomainSeries, Record};

// ---------------------------------------------------------------------------
// Row order within a domain group
// ---------------------------------------------------------------------------

/// Order in which matching rows are appended to a [`DomainSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Original file order.
    FileOrder,
    /// Ascending problem number (stable).
    ProblemNumber,
}

/// Return indices of records whose domain equals `label` exactly.
///
/// Case-sensitive, no trimming.
pub fn matching_indices(table: &BenchmarkTable, label: &str) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(i, rec)| {
            log::trace!("Processing row {i} with domain: {}", rec.domain);
            rec.domain == label
        })
        .map(|(i, _)| i)
        .collect()
}

/// Append every record of domain `label` to `series`, in the given order.
///
/// A label with no matching records leaves `series` untouched.
pub fn accumulate_domain(
    table: &BenchmarkTable,
    series: &mut DomainSeries,
    label: &str,
    order: RowOrder,
) {
    let mut matching: Vec<&Record> = matching_indices(table, label)
        .into_iter()
        .map(|i| &table.records[i])
        .collect();

    if order == RowOrder::ProblemNumber {
        matching.sort_by(|a, b| a.problem_key().cmp(&b.problem_key()));
    }

    for rec in matching {
        series.push(rec);
        log::debug!("Data appended for {label}: problem {}", rec.problem_number);
    }
}

/// Build a fresh [`DomainSeries`] for `label`.
pub fn collect_domain(table: &BenchmarkTable, label: &str, order: RowOrder) -> DomainSeries {
    let mut series = DomainSeries::default();
    accumulate_domain(table, &mut series, label, order);
    series
}
