use serde::Serialize;

use super::metrics::Metrics;
use crate::config::AnalysisConfig;

/// Additive 0..=`health_score_max` score from margin tier, cash-flow sign
/// and revenue presence.
pub fn health_score(metrics: &Metrics, config: &AnalysisConfig) -> u32 {
    let margin_points = if metrics.profit_margin > config.profit_margin_high {
        40
    } else if metrics.profit_margin > config.profit_margin_medium {
        25
    } else {
        10
    };
    let cash_flow_points = if metrics.cash_flow > 0.0 { 40 } else { 15 };
    let revenue_points = if metrics.revenue > 0.0 { 20 } else { 0 };

    let score: u32 = margin_points + cash_flow_points + revenue_points;
    // `as` saturates, so a negative ceiling clamps to zero.
    let ceiling = config.health_score_max as u32;
    score.min(ceiling)
}

/// Coarse lending tier derived from the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Creditworthiness {
    Low,
    Medium,
    High,
}

impl Creditworthiness {
    pub fn from_score(score: u32) -> Self {
        if score >= 75 {
            Creditworthiness::High
        } else if score >= 50 {
            Creditworthiness::Medium
        } else {
            Creditworthiness::Low
        }
    }
}

impl std::fmt::Display for Creditworthiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}
