use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, RawTable, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a transaction export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one transaction per line
/// * `.json`    – `[{ "amount": 25000, "type": "credit", ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv_reader(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json_str(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per transaction.
/// Short rows are allowed; their missing cells read as blank.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut row = Row::new();
        for (col_idx, col_name) in headers.iter().enumerate() {
            let value = record.get(col_idx).unwrap_or("");
            // First occurrence wins for duplicate header names.
            row.entry(col_name.clone())
                .or_insert_with(|| guess_cell_type(value));
        }
        rows.push(row);
    }

    Ok(RawTable::with_columns(dedup(headers), rows))
}

fn dedup(columns: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(columns.len());
    for col in columns {
        if !out.contains(&col) {
            out.push(col);
        }
    }
    out
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.trim().is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "date": "2025-01-05", "description": "Sales Invoice", "amount": 25000 },
///   { "date": "2025-01-06", "description": "Office Rent", "amount": -8000 }
/// ]
/// ```
pub fn load_json_str(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        // Keys keep document order (`preserve_order`); columns follow first sight.
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        let row: Row = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable::with_columns(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one transaction per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut values = Row::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", field.name()))?;
                values.insert(field.name().clone(), value);
            }
            rows.push(values);
        }
    }

    Ok(RawTable::with_columns(columns, rows))
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => match any.downcast_ref::<StringArray>() {
            Some(s) => CellValue::String(s.value(row).to_string()),
            None => bail!("expected StringArray"),
        },
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => match any.downcast_ref::<Int32Array>() {
            Some(arr) => CellValue::Integer(arr.value(row) as i64),
            None => bail!("expected Int32Array"),
        },
        DataType::Int64 => match any.downcast_ref::<Int64Array>() {
            Some(arr) => CellValue::Integer(arr.value(row)),
            None => bail!("expected Int64Array"),
        },
        DataType::Float32 => match any.downcast_ref::<Float32Array>() {
            Some(arr) => CellValue::Float(arr.value(row) as f64),
            None => bail!("expected Float32Array"),
        },
        DataType::Float64 => match any.downcast_ref::<Float64Array>() {
            Some(arr) => CellValue::Float(arr.value(row)),
            None => bail!("expected Float64Array"),
        },
        DataType::Boolean => match any.downcast_ref::<BooleanArray>() {
            Some(arr) => CellValue::Bool(arr.value(row)),
            None => bail!("expected BooleanArray"),
        },
        // Dates, decimals and friends are kept as their display text.
        _ => CellValue::String(
            array_value_to_string(&**col, row).context("formatting arrow value")?,
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn csv_cells_are_typed() {
        let data = "date,description,amount,type\n\
                    2025-01-05,Sales Invoice,25000,credit\n\
                    2025-01-06,Office Rent,8000.50,\n";
        let table = load_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["date", "description", "amount", "type"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "amount"), &CellValue::Integer(25000));
        assert_eq!(table.cell(1, "amount"), &CellValue::Float(8000.5));
        assert_eq!(table.cell(0, "type"), &CellValue::from("credit"));
        assert!(table.cell(1, "type").is_null());
    }

    #[test]
    fn csv_short_rows_are_padded_with_blanks() {
        let data = "amount,type\n100\n";
        let table = load_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "amount"), &CellValue::Integer(100));
        assert!(table.cell(0, "type").is_null());
    }

    #[test]
    fn csv_header_only_is_an_empty_table() {
        let table = load_csv_reader("amount,type\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"description": "Sales Invoice", "amount": 25000},
            {"description": "Office Rent", "amount": -8000.5, "memo": null}
        ]"#;
        let table = load_json_str(text).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.columns.contains(&"memo".to_string()));
        assert_eq!(table.cell(1, "amount"), &CellValue::Float(-8000.5));
        assert!(table.cell(0, "memo").is_null());
    }

    #[test]
    fn json_columns_keep_document_order() {
        let text = r#"[
            {"Memo": "x", "Date": "2025-01-01", "Balance": 1},
            {"Date": "2025-01-02", "Amount": 5}
        ]"#;
        let table = load_json_str(text).unwrap();
        assert_eq!(table.columns, vec!["Memo", "Date", "Balance", "Amount"]);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(load_json_str(r#"{"amount": 1}"#).is_err());
        assert!(load_json_str(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn parquet_cells_are_typed() {
        use arrow::array::{ArrayRef, Date32Array};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("description", DataType::Utf8, true),
            Field::new("amount", DataType::Float64, false),
            Field::new("units", DataType::Int32, false),
            Field::new("cleared", DataType::Boolean, false),
            Field::new("posted", DataType::Date32, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec![Some("Sales Invoice"), None])),
            Arc::new(Float64Array::from(vec![25000.0, -8000.5])),
            Arc::new(Int32Array::from(vec![3, 1])),
            Arc::new(BooleanArray::from(vec![true, false])),
            Arc::new(Date32Array::from(vec![20093, 20094])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["description", "amount", "units", "cleared", "posted"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "description"), &CellValue::from("Sales Invoice"));
        assert!(table.cell(1, "description").is_null());
        assert_eq!(table.cell(1, "amount"), &CellValue::Float(-8000.5));
        assert_eq!(table.cell(0, "units"), &CellValue::Integer(3));
        assert_eq!(table.cell(1, "cleared"), &CellValue::Bool(false));
        assert_eq!(table.cell(0, "posted"), &CellValue::from("2025-01-05"));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.CSV");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Amount,Type").unwrap();
        writeln!(file, "10,credit").unwrap();
        drop(file);

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["Amount", "Type"]);

        let bad = dir.path().join("export.xlsx");
        std::fs::write(&bad, b"").unwrap();
        assert!(load_file(&bad).is_err());
    }
}
