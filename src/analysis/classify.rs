use serde::Serialize;

use super::metrics::Metrics;
use super::score::Creditworthiness;
use crate::config::AnalysisConfig;

pub const NO_MAJOR_RISKS: &str = "No major financial risks detected";

/// Margin (%) below which a working-capital loan is suggested.
const WORKING_CAPITAL_MARGIN: f64 = 10.0;

/// Risk labels in fixed order. Never empty.
pub fn identify_risks(metrics: &Metrics, config: &AnalysisConfig) -> Vec<String> {
    let mut risks = Vec::new();

    if metrics.profit_margin < config.profit_margin_low_risk {
        risks.push("Low profit margin".to_string());
    }
    if metrics.cash_flow < 0.0 {
        risks.push("Negative cash flow".to_string());
    }
    if metrics.expenses > metrics.revenue * config.expense_ratio_risk {
        risks.push("High operating expenses".to_string());
    }

    if risks.is_empty() {
        risks.push(NO_MAJOR_RISKS.to_string());
    }
    risks
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecommendation {
    pub product: String,
    pub provider: String,
    pub reason: String,
}

impl ProductRecommendation {
    fn new(product: &str, provider: &str, reason: &str) -> Self {
        Self {
            product: product.into(),
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Financing products in fixed order; falls back to a deposit product.
pub fn recommend_products(
    metrics: &Metrics,
    creditworthiness: Creditworthiness,
) -> Vec<ProductRecommendation> {
    let mut products = Vec::new();

    if metrics.cash_flow < 0.0 {
        products.push(ProductRecommendation::new(
            "Invoice Financing",
            "NBFC",
            "Helps manage short-term cash flow gaps caused by delayed receivables.",
        ));
    }
    if metrics.profit_margin < WORKING_CAPITAL_MARGIN {
        products.push(ProductRecommendation::new(
            "Working Capital Loan",
            "Bank",
            "Supports daily operational expenses and stabilizes business cash flow.",
        ));
    }
    if creditworthiness == Creditworthiness::High {
        products.push(ProductRecommendation::new(
            "Business Overdraft",
            "Bank",
            "Provides flexible credit access for short-term liquidity needs.",
        ));
    }

    if products.is_empty() {
        products.push(ProductRecommendation::new(
            "Savings / Term Deposit",
            "Bank",
            "Suitable for financially stable businesses with surplus cash.",
        ));
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(revenue: f64, expenses: f64) -> Metrics {
        Metrics::from_flows(&[revenue], &[expenses])
    }

    fn names(products: &[ProductRecommendation]) -> Vec<&str> {
        products.iter().map(|p| p.product.as_str()).collect()
    }

    #[test]
    fn healthy_metrics_only_get_the_sentinel() {
        let risks = identify_risks(&metrics(25000.0, 9200.0), &AnalysisConfig::default());
        assert_eq!(risks, vec![NO_MAJOR_RISKS]);
    }

    #[test]
    fn every_risk_in_order() {
        let risks = identify_risks(&metrics(100.0, 200.0), &AnalysisConfig::default());
        assert_eq!(
            risks,
            vec!["Low profit margin", "Negative cash flow", "High operating expenses"]
        );
    }

    #[test]
    fn expense_ratio_is_strict() {
        let cfg = AnalysisConfig::default();
        // 90% expenses: 10% margin, flagged only for the expense ratio
        assert_eq!(identify_risks(&metrics(100.0, 90.0), &cfg), vec!["High operating expenses"]);
        let loose = AnalysisConfig {
            expense_ratio_risk: 0.9,
            ..cfg
        };
        assert_eq!(identify_risks(&metrics(100.0, 90.0), &loose), vec![NO_MAJOR_RISKS]);
    }

    #[test]
    fn struggling_business_gets_financing() {
        let products = recommend_products(&metrics(100.0, 200.0), Creditworthiness::Low);
        assert_eq!(names(&products), vec!["Invoice Financing", "Working Capital Loan"]);
        assert_eq!(products[0].provider, "NBFC");
    }

    #[test]
    fn high_creditworthiness_gets_overdraft() {
        let products = recommend_products(&metrics(25000.0, 9200.0), Creditworthiness::High);
        assert_eq!(names(&products), vec!["Business Overdraft"]);
    }

    #[test]
    fn fallback_is_a_deposit() {
        let products = recommend_products(&metrics(100.0, 80.0), Creditworthiness::Medium);
        assert_eq!(names(&products), vec!["Savings / Term Deposit"]);
    }
}
