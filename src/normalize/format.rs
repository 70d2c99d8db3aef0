use serde::Serialize;

use super::clarify::{Clarification, ClarificationKind};
use super::columns::ColumnRoles;
use super::direction::Direction;
use crate::data::model::{CellValue, ColumnNameIndex, NULL_CELL, RawTable, normalize_column_name};

// ---------------------------------------------------------------------------
// Source formats
// ---------------------------------------------------------------------------

/// Column shape that normalized a table. One per table, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceFormat {
    #[serde(rename = "amount+type")]
    AmountType,
    #[serde(rename = "credit+debit")]
    CreditDebit,
    #[serde(rename = "cash_in+cash_out")]
    CashInOut,
    #[serde(rename = "signed_amount")]
    SignedAmount,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmountType => write!(f, "amount+type"),
            Self::CreditDebit => write!(f, "credit+debit"),
            Self::CashInOut => write!(f, "cash_in+cash_out"),
            Self::SignedAmount => write!(f, "signed_amount"),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical dataset
// ---------------------------------------------------------------------------

/// The raw table plus per-row `cash_in` / `cash_out`, both always `>= 0`.
#[derive(Debug, Clone)]
pub struct CanonicalDataset<'a> {
    pub table: &'a RawTable,
    pub format: SourceFormat,
    pub cash_in: Vec<f64>,
    pub cash_out: Vec<f64>,
    index: ColumnNameIndex,
}

impl CanonicalDataset<'_> {
    pub fn len(&self) -> usize {
        self.cash_in.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cash_in.is_empty()
    }

    /// `cash_in - cash_out` per row.
    pub fn net_amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.cash_in.iter().zip(&self.cash_out).map(|(i, o)| i - o)
    }

    /// Cell of a column looked up by normalized name (`Null` when absent).
    pub fn cell(&self, row: usize, normalized: &str) -> &CellValue {
        match self.index.source_column(&normalize_column_name(normalized)) {
            Some(src) => self.table.cell(row, src),
            None => &NULL_CELL,
        }
    }
}

struct Flows {
    format: SourceFormat,
    cash_in: Vec<f64>,
    cash_out: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Strategy dispatch
// ---------------------------------------------------------------------------

/// Normalize a raw table into cash-in / cash-out columns.
///
/// Strategies are tried in a fixed order and the first applicable one wins:
/// amount+type, credit+debit, cash_in+cash_out, signed amount. A table that
/// cannot be normalized yields a [`Clarification`] instead.
pub fn normalize<'a>(
    table: &'a RawTable,
    roles: &ColumnRoles,
) -> Result<CanonicalDataset<'a>, Clarification> {
    let index = ColumnNameIndex::new(table);
    if table.is_empty() || index.is_empty() {
        log::warn!("rejecting empty table ({} rows, {} columns)", table.len(), index.names().len());
        return Err(Clarification::new(ClarificationKind::EmptyInput, Vec::new()));
    }

    let cols = roles.resolve_all(&index);
    let numeric = |name: &str| match index.source_column(name) {
        Some(src) => table.numeric_column(src),
        None => vec![0.0; table.len()],
    };

    let flows = if let (Some(amount), Some(kind)) = (cols.amount, cols.kind) {
        let directions: Vec<Direction> = match index.source_column(kind) {
            Some(src) => (0..table.len())
                .map(|row| Direction::from_cell(table.cell(row, src)))
                .collect(),
            None => vec![Direction::Unknown; table.len()],
        };
        amount_with_type(&numeric(amount), &directions)
            .ok_or_else(|| clarify(ClarificationKind::UnknownTypes, vec![amount, kind]))?
    } else if let (Some(credit), Some(debit)) = (cols.credit, cols.debit) {
        split_columns(SourceFormat::CreditDebit, numeric(credit), numeric(debit))
    } else if let (Some(inflow), Some(outflow)) = (cols.inflow, cols.outflow) {
        split_columns(SourceFormat::CashInOut, numeric(inflow), numeric(outflow))
    } else if let Some(amount) = cols.amount {
        signed_amount(&numeric(amount))
            .ok_or_else(|| clarify(ClarificationKind::UnsignedAmounts, vec![amount]))?
    } else {
        let observed: Vec<&str> = index.names().iter().map(String::as_str).collect();
        return Err(clarify(ClarificationKind::UnsupportedShape, observed));
    };

    log::info!("normalized {} rows as {}", table.len(), flows.format);
    Ok(CanonicalDataset {
        table,
        format: flows.format,
        cash_in: flows.cash_in,
        cash_out: flows.cash_out,
        index,
    })
}

fn clarify(kind: ClarificationKind, columns: Vec<&str>) -> Clarification {
    log::warn!("clarification needed ({kind:?}); columns: {columns:?}");
    Clarification::new(kind, columns.into_iter().map(str::to_string).collect())
}

/// Typed rows go by their direction; unknown types fall back to sign.
/// `None` when some type was unknown and nothing moved in either direction.
fn amount_with_type(amounts: &[f64], directions: &[Direction]) -> Option<Flows> {
    let mut cash_in = Vec::with_capacity(amounts.len());
    let mut cash_out = Vec::with_capacity(amounts.len());
    let mut saw_unknown = false;

    for (&amount, &direction) in amounts.iter().zip(directions) {
        let (inflow, outflow) = match direction {
            Direction::Credit => (amount, 0.0),
            Direction::Debit => (0.0, amount),
            Direction::Unknown => {
                saw_unknown = true;
                if amount > 0.0 {
                    (amount, 0.0)
                } else if amount < 0.0 {
                    (0.0, -amount)
                } else {
                    (0.0, 0.0)
                }
            }
        };
        cash_in.push(inflow.abs());
        cash_out.push(outflow.abs());
    }

    let all_zero = cash_in.iter().chain(&cash_out).all(|v| *v == 0.0);
    if saw_unknown && all_zero {
        log::debug!("type column carried no usable direction");
        return None;
    }

    Some(Flows {
        format: SourceFormat::AmountType,
        cash_in,
        cash_out,
    })
}

fn split_columns(format: SourceFormat, inflow: Vec<f64>, outflow: Vec<f64>) -> Flows {
    Flows {
        format,
        cash_in: inflow.into_iter().map(f64::abs).collect(),
        cash_out: outflow.into_iter().map(f64::abs).collect(),
    }
}

/// Needs both signs present; a one-signed column is ambiguous.
fn signed_amount(amounts: &[f64]) -> Option<Flows> {
    let has_positive = amounts.iter().any(|v| *v > 0.0);
    let has_negative = amounts.iter().any(|v| *v < 0.0);
    if !(has_positive && has_negative) {
        log::debug!(
            "one-signed amount column (positive: {has_positive}, negative: {has_negative})"
        );
        return None;
    }

    Some(Flows {
        format: SourceFormat::SignedAmount,
        cash_in: amounts.iter().map(|v| v.max(0.0)).collect(),
        cash_out: amounts.iter().map(|v| (-v).max(0.0)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], records: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::from_records(columns, records)
    }

    fn run(t: &RawTable) -> Result<CanonicalDataset<'_>, Clarification> {
        normalize(t, &ColumnRoles::default())
    }

    #[test]
    fn amount_and_type() {
        let t = table(
            &["Amount", "Type"],
            vec![
                vec![25000.into(), "credit".into()],
                vec![8000.into(), "Debit".into()],
                vec![1200.into(), "expense".into()],
            ],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.format, SourceFormat::AmountType);
        assert_eq!(ds.cash_in, vec![25000.0, 0.0, 0.0]);
        assert_eq!(ds.cash_out, vec![0.0, 8000.0, 1200.0]);
    }

    #[test]
    fn unknown_types_fall_back_to_sign() {
        let t = table(
            &["amount", "txn_type"],
            vec![
                vec![500.into(), "refund".into()],
                vec![(-300).into(), CellValue::Null],
                vec![0.into(), "?".into()],
                vec![(-40).into(), "credit".into()],
            ],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.cash_in, vec![500.0, 0.0, 0.0, 40.0]);
        assert_eq!(ds.cash_out, vec![0.0, 300.0, 0.0, 0.0]);
    }

    #[test]
    fn all_unknown_and_zero_needs_clarification() {
        let t = table(
            &["amount", "type"],
            vec![vec![0.into(), "misc".into()], vec!["n/a".into(), "other".into()]],
        );
        let c = run(&t).unwrap_err();
        assert!(c.message.contains("'type' column"));
        assert_eq!(c.sample_columns, vec!["amount", "type"]);
    }

    #[test]
    fn known_types_with_zero_amounts_are_accepted() {
        let t = table(&["amount", "type"], vec![vec![0.into(), "credit".into()]]);
        let ds = run(&t).unwrap();
        assert_eq!(ds.cash_in, vec![0.0]);
    }

    #[test]
    fn type_column_beats_credit_debit() {
        let t = table(
            &["amount", "type", "credit", "debit"],
            vec![vec![10.into(), "debit".into(), 99.into(), 0.into()]],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.format, SourceFormat::AmountType);
        assert_eq!(ds.cash_out, vec![10.0]);
    }

    #[test]
    fn credit_and_debit_are_absolute() {
        let t = table(
            &["Deposit", "Withdrawal"],
            vec![vec![100.into(), CellValue::Null], vec![CellValue::Null, (-40.5).into()]],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.format, SourceFormat::CreditDebit);
        assert_eq!(ds.cash_in, vec![100.0, 0.0]);
        assert_eq!(ds.cash_out, vec![0.0, 40.5]);
    }

    #[test]
    fn inflow_outflow_with_custom_roles() {
        let roles = ColumnRoles {
            credit: vec!["haben".into()],
            debit: vec!["soll".into()],
            ..ColumnRoles::default()
        };
        let t = table(&["cash_in", "cash_out"], vec![vec![5.into(), 3.into()]]);
        let ds = normalize(&t, &roles).unwrap();
        assert_eq!(ds.format, SourceFormat::CashInOut);
        assert_eq!((ds.cash_in[0], ds.cash_out[0]), (5.0, 3.0));
    }

    #[test]
    fn default_roles_read_cash_columns_as_credit_debit() {
        let t = table(&["Cash In", "Cash Out"], vec![vec![5.into(), 3.into()]]);
        assert_eq!(run(&t).unwrap().format, SourceFormat::CreditDebit);
    }

    #[test]
    fn signed_amounts_split_by_sign() {
        let t = table(
            &["net amount"],
            vec![vec![25000.into()], vec![(-8000).into()], vec!["x".into()]],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.format, SourceFormat::SignedAmount);
        assert_eq!(ds.cash_in, vec![25000.0, 0.0, 0.0]);
        assert_eq!(ds.cash_out, vec![0.0, 8000.0, 0.0]);
    }

    #[test]
    fn one_signed_amounts_need_clarification() {
        let t = table(&["amount"], vec![vec![100.into()], vec![200.into()]]);
        let c = run(&t).unwrap_err();
        assert!(c.message.starts_with("All amounts are non-negative"));
        assert_eq!(c.sample_columns, vec!["amount"]);

        let negatives = table(&["amount"], vec![vec![(-1).into()]]);
        assert!(run(&negatives).is_err());
    }

    #[test]
    fn unsupported_shape_lists_columns() {
        let t = table(
            &["Date", "Memo", "Credit"],
            vec![vec!["2025-01-01".into(), "x".into(), 1.into()]],
        );
        let c = run(&t).unwrap_err();
        assert_eq!(c.sample_columns, vec!["date", "memo", "credit"]);
        assert_eq!(c.expected_formats.len(), 3);
    }

    #[test]
    fn empty_tables_are_rejected_first() {
        let no_rows = table(&["amount", "type"], vec![]);
        let c = run(&no_rows).unwrap_err();
        assert!(c.sample_columns.is_empty());
        assert!(c.message.contains("any transaction rows"));

        let no_columns = RawTable::from_rows(vec![Default::default()]);
        assert!(run(&no_columns).is_err());
    }

    #[test]
    fn cell_lookup_is_by_normalized_name() {
        let t = table(
            &["Description", "amount"],
            vec![
                vec!["Rent".into(), (-5).into()],
                vec!["Sale".into(), 9.into()],
            ],
        );
        let ds = run(&t).unwrap();
        assert_eq!(ds.cell(0, "description"), &CellValue::from("Rent"));
        assert!(ds.cell(0, "memo").is_null());
        assert_eq!(ds.net_amounts().collect::<Vec<_>>(), vec![-5.0, 9.0]);
    }
}
