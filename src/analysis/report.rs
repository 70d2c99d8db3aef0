use serde::Serialize;

use super::classify::ProductRecommendation;
use super::metrics::round2;
use super::score::Creditworthiness;
use crate::normalize::{CanonicalDataset, Clarification, SourceFormat};

/// Direction of a derived transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Credit,
    Debit,
}

/// One normalized transaction as echoed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub description: String,
    /// `cash_in - cash_out`, rounded to cents.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Derive the signed transaction view of a normalized table.
pub fn transaction_rows(dataset: &CanonicalDataset<'_>) -> Vec<TransactionRow> {
    dataset
        .net_amounts()
        .enumerate()
        .map(|(row, amount)| TransactionRow {
            description: dataset.cell(row, "description").to_string(),
            amount: round2(amount),
            kind: if amount >= 0.0 {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            },
        })
        .collect()
}

/// Successful analysis record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub source_format: SourceFormat,
    pub revenue: f64,
    pub expenses: f64,
    pub profit_margin: f64,
    pub cash_flow: f64,
    pub health_score: u32,
    pub creditworthiness: Creditworthiness,
    pub risks: Vec<String>,
    pub transactions: Vec<TransactionRow>,
    pub recommended_products: Vec<ProductRecommendation>,
}

/// Either an analysis or a request to resupply the data. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Analysis(AnalysisResult),
    Clarification(Clarification),
}

impl AnalysisOutcome {
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Analysis(result) => Some(result),
            AnalysisOutcome::Clarification(_) => None,
        }
    }

    pub fn clarification(&self) -> Option<&Clarification> {
        match self {
            AnalysisOutcome::Analysis(_) => None,
            AnalysisOutcome::Clarification(c) => Some(c),
        }
    }

    pub fn needs_clarification(&self) -> bool {
        matches!(self, AnalysisOutcome::Clarification(_))
    }
}

impl From<Clarification> for AnalysisOutcome {
    fn from(c: Clarification) -> Self {
        AnalysisOutcome::Clarification(c)
    }
}
