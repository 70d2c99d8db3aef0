use crate::normalize::CanonicalDataset;

/// Headline figures, kept at full precision until the result is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub revenue: f64,
    pub expenses: f64,
    /// Percent of revenue; `0.0` when there is no revenue.
    pub profit_margin: f64,
    /// Net of inflows and outflows (equal to profit).
    pub cash_flow: f64,
}

impl Metrics {
    pub fn from_flows(cash_in: &[f64], cash_out: &[f64]) -> Self {
        let revenue: f64 = cash_in.iter().sum();
        let expenses: f64 = cash_out.iter().sum();
        let profit = revenue - expenses;
        let profit_margin = if revenue > 0.0 {
            profit / revenue * 100.0
        } else {
            0.0
        };
        Metrics {
            revenue,
            expenses,
            profit_margin,
            cash_flow: profit,
        }
    }

    pub fn compute(dataset: &CanonicalDataset<'_>) -> Self {
        Self::from_flows(&dataset.cash_in, &dataset.cash_out)
    }
}

/// Round to cents, ties to even. Only applied when building output records.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
