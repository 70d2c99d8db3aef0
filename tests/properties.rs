use proptest::prelude::*;

use ledger_lens::analysis::classify::{NO_MAJOR_RISKS, identify_risks};
use ledger_lens::analysis::score::{Creditworthiness, health_score};
use ledger_lens::analysis::Metrics;
use ledger_lens::normalize::normalize;
use ledger_lens::{AnalysisConfig, CellValue, ColumnRoles, RawTable, SourceFormat};

fn money() -> impl Strategy<Value = f64> {
    (0i64..10_000_000).prop_map(|cents| cents as f64 / 100.0)
}

proptest! {
    #[test]
    fn score_stays_in_range(revenue in money(), expenses in money()) {
        let m = Metrics::from_flows(&[revenue], &[expenses]);
        let score = health_score(&m, &AnalysisConfig::default());
        prop_assert!(score <= 100);
        if m.profit_margin > 15.0 && m.cash_flow > 0.0 && m.revenue > 0.0 {
            prop_assert_eq!(score, 100);
        }
    }

    #[test]
    fn creditworthiness_is_monotonic(a in 0u32..=100, b in 0u32..=100) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Creditworthiness::from_score(lo) <= Creditworthiness::from_score(hi));
    }

    #[test]
    fn risks_are_never_empty(revenue in money(), expenses in money()) {
        let m = Metrics::from_flows(&[revenue], &[expenses]);
        let risks = identify_risks(&m, &AnalysisConfig::default());
        prop_assert!(!risks.is_empty());
        if risks.iter().any(|r| r == NO_MAJOR_RISKS) {
            prop_assert_eq!(risks.len(), 1);
        }
    }

    #[test]
    fn typed_rows_split_disjointly(
        rows in prop::collection::vec((0i64..1_000_000, any::<bool>()), 1..40)
    ) {
        let records = rows
            .iter()
            .map(|&(amount, credit)| {
                let kind = if credit { "Credit" } else { "Debit" };
                vec![CellValue::Integer(amount), CellValue::from(kind)]
            })
            .collect();
        let table = RawTable::from_records(&["amount", "type"], records);
        let ds = normalize(&table, &ColumnRoles::default()).unwrap();

        prop_assert_eq!(ds.format, SourceFormat::AmountType);
        for (i, &(amount, credit)) in rows.iter().enumerate() {
            let (cash_in, cash_out) = (ds.cash_in[i], ds.cash_out[i]);
            prop_assert!(cash_in >= 0.0 && cash_out >= 0.0);
            prop_assert!(cash_in == 0.0 || cash_out == 0.0);
            let signed = if credit { amount as f64 } else { -(amount as f64) };
            prop_assert_eq!(cash_in - cash_out, signed);
        }
    }
}
