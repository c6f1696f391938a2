use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    BenchmarkTable, Record, COLUMNS, COL_DOMAIN, COL_HSP_LENGTH, COL_HSP_TIME, COL_MCP_LENGTH,
    COL_MCP_TIME, COL_PROBLEM,
};
use crate::error::ReportError;

/// Number of records shown in the load preview.
const PREVIEW_ROWS: usize = 5;

/// Cell texts read as a missing value, matching the usual dataframe defaults.
const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a benchmark table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the six benchmark columns (the harness output)
/// * `.json`    – `[{ "domain": "blocks", "problem_number": 1, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<BenchmarkTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(ReportError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log_preview(path, &table);
    Ok(table)
}

fn log_preview(path: &Path, table: &BenchmarkTable) {
    log::info!(
        "Data read from {}: {} records ({} skipped), domains {:?}",
        path.display(),
        table.len(),
        table.skipped,
        table.domains()
    );
    for rec in table.head(PREVIEW_ROWS) {
        log::info!("  {rec}");
    }
}

/// Parse a numeric cell. Empty cells and the [`MISSING_TOKENS`] are the
/// missing-value marker (`NaN`).
pub fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<f64, ReportError> {
    let s = raw.trim();
    if s.is_empty() || MISSING_TOKENS.contains(&s) {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| ReportError::InvalidNumber {
        row,
        column,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header positions of the six benchmark columns.
struct ColumnIndex {
    domain: usize,
    problem: usize,
    mcp_time: usize,
    mcp_length: usize,
    hsp_time: usize,
    hsp_length: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Result<Self, ReportError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            domain: find(COL_DOMAIN)?,
            problem: find(COL_PROBLEM)?,
            mcp_time: find(COL_MCP_TIME)?,
            mcp_length: find(COL_MCP_LENGTH)?,
            hsp_time: find(COL_HSP_TIME)?,
            hsp_length: find(COL_HSP_LENGTH)?,
        })
    }

    fn record(&self, row: usize, fields: &csv::StringRecord) -> Result<Record, ReportError> {
        let cell = |i: usize| fields.get(i).unwrap_or("");
        Ok(Record {
            domain: cell(self.domain).to_string(),
            problem_number: cell(self.problem).to_string(),
            mcp_time: parse_number(cell(self.mcp_time), row, COL_MCP_TIME)?,
            mcp_length: parse_number(cell(self.mcp_length), row, COL_MCP_LENGTH)?,
            hsp_time: parse_number(cell(self.hsp_time), row, COL_HSP_TIME)?,
            hsp_length: parse_number(cell(self.hsp_length), row, COL_HSP_LENGTH)?,
        })
    }
}

/// CSV layout: header row with (at least) the six benchmark columns.
///
/// Lines with more fields than the header, or that the reader cannot decode,
/// are skipped and counted. Short lines are kept; their absent cells are
/// missing values.
fn load_csv(path: &Path) -> Result<BenchmarkTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let index = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row_no, result) in reader.records().enumerate() {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) => {
                log::warn!("Skipping CSV row {row_no}: {e}");
                skipped += 1;
                continue;
            }
        };

        if fields.len() > headers.len() {
            let line = fields.position().map(|p| p.line()).unwrap_or(0);
            log::warn!(
                "Skipping line {line}: expected {} fields, saw {}",
                headers.len(),
                fields.len()
            );
            skipped += 1;
            continue;
        }
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }

        records.push(index.record(row_no, &fields)?);
    }

    Ok(BenchmarkTable::new(records, skipped))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "domain": "blocks",
///     "problem_number": 1,
///     "MCP_time": 0.9, "MCP_length": 8,
///     "HSP_time": 1.1, "HSP_length": 9
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<BenchmarkTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        records.push(Record {
            domain: json_text(obj.get(COL_DOMAIN)),
            problem_number: json_text(obj.get(COL_PROBLEM)),
            mcp_time: json_number(obj.get(COL_MCP_TIME), i, COL_MCP_TIME)?,
            mcp_length: json_number(obj.get(COL_MCP_LENGTH), i, COL_MCP_LENGTH)?,
            hsp_time: json_number(obj.get(COL_HSP_TIME), i, COL_HSP_TIME)?,
            hsp_length: json_number(obj.get(COL_HSP_LENGTH), i, COL_HSP_LENGTH)?,
        });
    }

    Ok(BenchmarkTable::new(records, 0))
}

fn json_text(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_number(
    val: Option<&JsonValue>,
    row: usize,
    column: &'static str,
) -> Result<f64, ReportError> {
    match val {
        None | Some(JsonValue::Null) => Ok(f64::NAN),
        Some(JsonValue::Number(n)) => Ok(n.as_f64().unwrap_or(f64::NAN)),
        Some(JsonValue::String(s)) => parse_number(s, row, column),
        Some(other) => Err(ReportError::InvalidNumber {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the benchmark table as flat columns.
///
/// `domain` and `problem_number` may be any type (rendered as text); the four
/// numeric columns may be integer, float or numeric-string. Nulls are missing
/// values.
fn load_parquet(path: &Path) -> Result<BenchmarkTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols: Vec<&ArrayRef> = Vec::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| ReportError::MissingColumn(name.to_string()))?;
            cols.push(batch.column(idx));
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let global_row = offset + row;
            records.push(Record {
                domain: cell_text(cols[0], row)?,
                problem_number: cell_text(cols[1], row)?,
                mcp_time: cell_f64(cols[2], row, global_row, COL_MCP_TIME)?,
                mcp_length: cell_f64(cols[3], row, global_row, COL_MCP_LENGTH)?,
                hsp_time: cell_f64(cols[4], row, global_row, COL_HSP_TIME)?,
                hsp_length: cell_f64(cols[5], row, global_row, COL_HSP_LENGTH)?,
            });
        }
    }

    Ok(BenchmarkTable::new(records, 0))
}

// -- Parquet / Arrow helpers --

fn cell_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    array_value_to_string(col, row).context("formatting parquet cell")
}

fn cell_f64(col: &ArrayRef, row: usize, global_row: usize, column: &'static str) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = array_value_to_string(col, row).context("formatting parquet cell")?;
            parse_number(&text, global_row, column)?
        }
        other => bail!("Column '{column}' has type {other:?}, expected a numeric type"),
    };
    Ok(value)
}
