use serde::Serialize;

use crate::analysis::metrics::round2;
use crate::error::ServiceError;

pub const DEFAULT_GROWTH_RATE: f64 = 0.05;

/// Single linear projection from the average amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub next_month: f64,
    pub three_months: f64,
}

/// Non-finite amounts are skipped; an empty remainder is an error.
pub fn forecast_financials(amounts: &[f64], growth_rate: f64) -> Result<Forecast, ServiceError> {
    let valid: Vec<f64> = amounts.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        return Err(ServiceError::NoAmounts);
    }
    let monthly_avg = valid.iter().sum::<f64>() / valid.len() as f64;
    log::debug!("forecasting from {} amounts, average {monthly_avg}", valid.len());

    Ok(Forecast {
        next_month: round2(monthly_avg * (1.0 + growth_rate)),
        three_months: round2(monthly_avg * 3.0),
    })
}
