use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use planner_report::data::model::{
    Record, COL_DOMAIN, COL_HSP_LENGTH, COL_HSP_TIME, COL_MCP_LENGTH, COL_MCP_TIME, COL_PROBLEM,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Per-domain shape of the synthetic results:
/// (name, problem count, base plan length, HSP seconds per step).
const DOMAINS: [(&str, u32, f64, f64); 4] = [
    ("blocks", 20, 6.0, 0.02),
    ("depot", 12, 10.0, 0.05),
    ("gripper", 20, 11.0, 0.01),
    ("logistics", 15, 20.0, 0.03),
];

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    let mut records = Vec::new();
    for (domain, count, base_len, secs_per_step) in DOMAINS {
        for problem in 1..=count {
            let p = problem as f64;
            // HSP plans are close to optimal; the random-walk planner pads them.
            let hsp_length = (base_len + p * 2.0 + rng.range(0.0, 3.0)).round();
            let mcp_length = (hsp_length * rng.range(1.0, 1.8)).round();
            let hsp_time = 0.3 + hsp_length * secs_per_step * rng.range(0.8, 1.5);
            let mcp_time = 0.2 + mcp_length * secs_per_step * rng.range(0.4, 2.5);

            records.push(Record {
                domain: domain.to_string(),
                problem_number: problem.to_string(),
                mcp_time,
                mcp_length,
                hsp_time,
                hsp_length,
            });
        }
    }
    records
}

fn write_csv(records: &[Record], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(records: &[Record], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_DOMAIN, DataType::Utf8, false),
        Field::new(COL_PROBLEM, DataType::Int64, false),
        Field::new(COL_MCP_TIME, DataType::Float64, true),
        Field::new(COL_MCP_LENGTH, DataType::Float64, true),
        Field::new(COL_HSP_TIME, DataType::Float64, true),
        Field::new(COL_HSP_LENGTH, DataType::Float64, true),
    ]));

    let problems: Vec<i64> = records
        .iter()
        .map(|r| r.problem_number.parse::<i64>())
        .collect::<Result<_, _>>()
        .context("problem numbers must be integers")?;

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                records.iter().map(|r| r.domain.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(problems)),
            Arc::new(Float64Array::from(records.iter().map(|r| r.mcp_time).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(records.iter().map(|r| r.mcp_length).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(records.iter().map(|r| r.hsp_time).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(records.iter().map(|r| r.hsp_length).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv(&records, "data.csv")?;
    write_parquet(&records, "data.parquet")?;

    println!(
        "Wrote {} benchmark rows across {} domains to data.csv and data.parquet",
        records.len(),
        DOMAINS.len()
    );
    Ok(())
}
