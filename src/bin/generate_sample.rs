use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Uniform amount in `[lo, hi)`, rounded to cents.
    fn amount(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 100.0).round() / 100.0
    }
}

struct Txn {
    date: String,
    description: &'static str,
    /// Positive = money in, negative = money out.
    amount: f64,
}

const INCOME: &[(&str, f64, f64)] = &[
    ("Sales Invoice", 8_000.0, 30_000.0),
    ("Client Payment", 2_000.0, 12_000.0),
];

const EXPENSES: &[(&str, f64, f64)] = &[
    ("Office Rent", 6_000.0, 9_000.0),
    ("Staff Salary", 10_000.0, 18_000.0),
    ("Utilities", 800.0, 1_800.0),
    ("Stationery", 100.0, 600.0),
];

fn generate(rng: &mut SimpleRng, months: u32) -> Vec<Txn> {
    let mut txns = Vec::new();
    for month in 1..=months {
        for (day, &(description, lo, hi)) in INCOME.iter().enumerate() {
            txns.push(Txn {
                date: format!("2025-{month:02}-{:02}", 5 + day),
                description,
                amount: rng.amount(lo, hi),
            });
        }
        for (day, &(description, lo, hi)) in EXPENSES.iter().enumerate() {
            txns.push(Txn {
                date: format!("2025-{month:02}-{:02}", 10 + day),
                description,
                amount: -rng.amount(lo, hi),
            });
        }
    }
    txns
}

fn write_csv(path: &Path, header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, txns: &[Txn]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
        Field::new("amount", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(txns.iter().map(|t| t.date.as_str()).collect::<Vec<_>>())),
            Arc::new(StringArray::from(txns.iter().map(|t| t.description).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(txns.iter().map(|t| t.amount).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data".to_string())
        .into();
    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let mut rng = SimpleRng::new(42);
    let txns = generate(&mut rng, 6);

    write_csv(
        &out_dir.join("signed_amount.csv"),
        &["date", "description", "amount"],
        txns.iter()
            .map(|t| vec![t.date.clone(), t.description.into(), format!("{:.2}", t.amount)]),
    )?;

    // Mixed alias spellings so the type normalizer has something to do.
    write_csv(
        &out_dir.join("amount_type.csv"),
        &["Date", "Description", "Amount", "Txn Type"],
        txns.iter().enumerate().map(|(i, t)| {
            let kind = match (t.amount >= 0.0, i % 2 == 0) {
                (true, true) => "Credit",
                (true, false) => "income",
                (false, true) => "DEBIT",
                (false, false) => "expense",
            };
            vec![
                t.date.clone(),
                t.description.into(),
                format!("{:.2}", t.amount.abs()),
                kind.into(),
            ]
        }),
    )?;

    write_csv(
        &out_dir.join("credit_debit.csv"),
        &["date", "description", "credit", "debit"],
        txns.iter().map(|t| {
            let (credit, debit) = if t.amount >= 0.0 { (t.amount, 0.0) } else { (0.0, -t.amount) };
            vec![
                t.date.clone(),
                t.description.into(),
                format!("{credit:.2}"),
                format!("{debit:.2}"),
            ]
        }),
    )?;

    write_csv(
        &out_dir.join("cash_in_out.csv"),
        &["Date", "Description", "Money In", "Money Out"],
        txns.iter().map(|t| {
            let cents = format!("{:.2}", t.amount.abs());
            let (inflow, outflow) = if t.amount >= 0.0 {
                (cents, String::new())
            } else {
                (String::new(), cents)
            };
            vec![t.date.clone(), t.description.into(), inflow, outflow]
        }),
    )?;

    // No type column and no negatives: analysis asks for clarification.
    write_csv(
        &out_dir.join("ambiguous.csv"),
        &["date", "description", "amount"],
        txns.iter()
            .map(|t| vec![t.date.clone(), t.description.into(), format!("{:.2}", t.amount.abs())]),
    )?;

    write_parquet(&out_dir.join("signed_amount.parquet"), &txns)?;

    println!("Wrote {} transactions in 6 files to {}", txns.len(), out_dir.display());
    Ok(())
}
