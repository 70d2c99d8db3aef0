//! Financial health assessment of a normalized table.
//!
//! Pipeline: [`normalize`](crate::normalize::normalize) → [`metrics`] →
//! [`score`] → [`classify`] → [`report`]. Pure and synchronous; the same
//! table and config always produce the same outcome.

pub mod classify;
pub mod metrics;
pub mod report;
pub mod score;

use crate::config::AnalysisConfig;
use crate::data::model::RawTable;
use crate::normalize::{ColumnRoles, normalize};

pub use classify::ProductRecommendation;
pub use metrics::Metrics;
pub use report::{AnalysisOutcome, AnalysisResult, TransactionRow, TransactionType};
pub use score::Creditworthiness;

/// Analyze a table with the default column roles.
pub fn analyze(table: &RawTable, config: &AnalysisConfig) -> AnalysisOutcome {
    analyze_with(table, config, &ColumnRoles::default())
}

/// Analyze a table. Malformed input yields a clarification, never a panic.
pub fn analyze_with(
    table: &RawTable,
    config: &AnalysisConfig,
    roles: &ColumnRoles,
) -> AnalysisOutcome {
    let dataset = match normalize(table, roles) {
        Ok(dataset) => dataset,
        Err(clarification) => return clarification.into(),
    };

    let metrics = Metrics::compute(&dataset);
    let health_score = score::health_score(&metrics, config);
    let creditworthiness = Creditworthiness::from_score(health_score);
    log::debug!("metrics {metrics:?}, score {health_score} ({creditworthiness})");

    AnalysisOutcome::Analysis(AnalysisResult {
        source_format: dataset.format,
        revenue: metrics::round2(metrics.revenue),
        expenses: metrics::round2(metrics.expenses),
        profit_margin: metrics::round2(metrics.profit_margin),
        cash_flow: metrics::round2(metrics.cash_flow),
        health_score,
        creditworthiness,
        risks: classify::identify_risks(&metrics, config),
        transactions: report::transaction_rows(&dataset),
        recommended_products: classify::recommend_products(&metrics, creditworthiness),
    })
}
