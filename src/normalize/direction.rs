use crate::data::model::CellValue;

const CREDIT_ALIASES: &[&str] = &["credit", "cr", "income", "inflow", "receipt", "receipts"];
const DEBIT_ALIASES: &[&str] = &["debit", "dr", "expense", "outflow", "payment", "payments"];

/// Canonical direction of a transaction-type value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
    Unknown,
}

impl Direction {
    /// Classify an already trimmed, lower-cased type value.
    pub fn from_key(value: &str) -> Self {
        if CREDIT_ALIASES.contains(&value) {
            Direction::Credit
        } else if DEBIT_ALIASES.contains(&value) {
            Direction::Debit
        } else {
            Direction::Unknown
        }
    }

    /// Classify a raw cell; blanks and numbers end up `Unknown`.
    pub fn from_cell(cell: &CellValue) -> Self {
        Self::from_key(&cell.to_key())
    }
}
