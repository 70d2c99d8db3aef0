use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingCapitalStatus {
    Strained,
    Healthy,
}

impl std::fmt::Display for WorkingCapitalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strained => write!(
                f,
                "Improve collections or consider short-term working capital loan"
            ),
            Self::Healthy => write!(f, "Working capital position is healthy"),
        }
    }
}

pub fn working_capital_analysis(cash_flow: f64) -> WorkingCapitalStatus {
    if cash_flow < 0.0 {
        WorkingCapitalStatus::Strained
    } else {
        WorkingCapitalStatus::Healthy
    }
}
