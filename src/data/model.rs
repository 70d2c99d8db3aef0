use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what a spreadsheet export can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number, coercing anything unusable to `0.0`.
    ///
    /// Text is trimmed and parsed; blanks, unparsable text and non-finite
    /// values all become zero. Booleans count as `1.0` / `0.0`.
    pub fn to_number(&self) -> f64 {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            CellValue::Null => 0.0,
        };
        if v.is_finite() { v } else { 0.0 }
    }

    /// Trimmed, lower-cased text form used for keyword and alias matching.
    pub fn to_key(&self) -> String {
        self.to_string().trim().to_lowercase()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Integer(i as i64)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the uploaded export as-is
// ---------------------------------------------------------------------------

/// One row: source column name → value. Absent columns read as `Null`.
pub type Row = BTreeMap<String, CellValue>;

pub(crate) static NULL_CELL: CellValue = CellValue::Null;

/// An uploaded table with no guaranteed schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in first-seen order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawTable {
    /// Build a table from rows, collecting column names in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for col in row.keys() {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }
        RawTable { columns, rows }
    }

    /// Build a table with an explicit column order (e.g. a CSV header).
    pub fn with_columns(columns: Vec<String>, rows: Vec<Row>) -> Self {
        RawTable { columns, rows }
    }

    /// Convenience constructor used mostly by tests and the generator:
    /// `RawTable::from_records(&["amount", "type"], vec![vec![25000.into(), "credit".into()]])`.
    pub fn from_records(columns: &[&str], records: Vec<Vec<CellValue>>) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let rows = records
            .into_iter()
            .map(|record| columns.iter().cloned().zip(record).collect())
            .collect();
        RawTable { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by exact source column name.
    pub fn cell<'a>(&'a self, row: usize, column: &str) -> &'a CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Every value of one column coerced to a number.
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.get(column).map_or(0.0, CellValue::to_number))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ColumnNameIndex – case/spacing-insensitive column lookup
// ---------------------------------------------------------------------------

/// Normalize a column name: trim, lower-case, spaces → underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalized column names, each mapped back to its source column.
#[derive(Debug, Clone, Default)]
pub struct ColumnNameIndex {
    /// Normalized names in source column order (duplicates dropped).
    names: Vec<String>,
    source: BTreeMap<String, String>,
}

impl ColumnNameIndex {
    /// When two source columns normalize to the same name, the first wins.
    pub fn new(table: &RawTable) -> Self {
        let mut index = ColumnNameIndex::default();
        for col in &table.columns {
            let norm = normalize_column_name(col);
            if !index.source.contains_key(&norm) {
                index.names.push(norm.clone());
                index.source.insert(norm, col.clone());
            }
        }
        index
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.source.contains_key(normalized)
    }

    /// Source column name for a normalized name.
    pub fn source_column(&self, normalized: &str) -> Option<&str> {
        self.source.get(normalized).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
