use std::collections::BTreeMap;

use serde::Serialize;

/// Structured, non-fatal rejection asking the caller to resupply data.
///
/// Serializes with `"status": "clarification_needed"` so API consumers can
/// tell it apart from an analysis record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename = "clarification_needed")]
pub struct Clarification {
    pub message: String,
    pub clarifications: Vec<String>,
    pub expected_formats: Vec<BTreeMap<String, String>>,
    pub sample_columns: Vec<String>,
}

/// Why a table could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClarificationKind {
    /// No rows or no columns.
    EmptyInput,
    /// A type column exists but no row's direction could be determined.
    UnknownTypes,
    /// A lone amount column whose values all share one sign.
    UnsignedAmounts,
    /// No recognized column combination.
    UnsupportedShape,
}

fn shape(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The accepted input shapes, echoed back in every clarification.
pub fn expected_formats() -> Vec<BTreeMap<String, String>> {
    vec![
        shape(&[("amount", "amount"), ("type", "type (credit/debit or income/expense)")]),
        shape(&[("credit", "credit"), ("debit", "debit")]),
        shape(&[("amount", "amount (negative for expenses, positive for income)")]),
    ]
}

impl Clarification {
    pub fn new(kind: ClarificationKind, sample_columns: Vec<String>) -> Self {
        let (message, hint) = match kind {
            ClarificationKind::EmptyInput => (
                "We could not read any transaction rows from the uploaded file.",
                "Please upload a CSV with at least one transaction row.",
            ),
            ClarificationKind::UnknownTypes => (
                "We could not infer transaction direction from the 'type' column.",
                "Please use values like Credit/Debit or Income/Expense in the type column.",
            ),
            ClarificationKind::UnsignedAmounts => (
                "All amounts are non-negative and no transaction type was provided.",
                concat!(
                    "Please add a type column (Credit/Debit or Income/Expense), ",
                    "or provide separate credit/debit columns."
                ),
            ),
            ClarificationKind::UnsupportedShape => (
                "We could not detect a supported transaction format in your CSV.",
                "Use either amount+type, credit+debit, or a signed amount column.",
            ),
        };
        Clarification {
            message: message.to_string(),
            clarifications: vec![hint.to_string()],
            expected_formats: expected_formats(),
            sample_columns,
        }
    }
}
