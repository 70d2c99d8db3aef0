use serde::Deserialize;

use crate::data::model::{ColumnNameIndex, normalize_column_name};

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// Canonical meaning a loosely-named column can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Amount,
    Type,
    Credit,
    Debit,
    Inflow,
    Outflow,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount => write!(f, "amount"),
            Self::Type => write!(f, "type"),
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
            Self::Inflow => write!(f, "inflow"),
            Self::Outflow => write!(f, "outflow"),
        }
    }
}

/// Ranked candidate column names per role (normalized form).
///
/// Overridable from the `[columns]` table of an analysis config; any list
/// left out keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnRoles {
    pub amount: Vec<String>,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub credit: Vec<String>,
    pub debit: Vec<String>,
    pub inflow: Vec<String>,
    pub outflow: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            amount: names(&["amount", "amt", "value", "net_amount", "transaction_amount"]),
            kind: names(&[
                "type",
                "txn_type",
                "transaction_type",
                "dr_cr",
                "credit_debit",
                "income_expense",
            ]),
            credit: names(&[
                "credit", "cr", "deposit", "inflow", "cash_in", "money_in", "receipts",
            ]),
            debit: names(&[
                "debit",
                "dr",
                "withdrawal",
                "outflow",
                "cash_out",
                "money_out",
                "payments",
            ]),
            inflow: names(&["cash_in", "inflow", "money_in", "receipts"]),
            outflow: names(&["cash_out", "outflow", "money_out", "payments"]),
        }
    }
}

impl ColumnRoles {
    pub fn candidates(&self, role: Role) -> &[String] {
        match role {
            Role::Amount => &self.amount,
            Role::Type => &self.kind,
            Role::Credit => &self.credit,
            Role::Debit => &self.debit,
            Role::Inflow => &self.inflow,
            Role::Outflow => &self.outflow,
        }
    }

    /// Resolve every role against one table's columns.
    pub fn resolve_all<'a>(&self, index: &'a ColumnNameIndex) -> ResolvedColumns<'a> {
        let resolved = ResolvedColumns {
            amount: pick_column(index, self.candidates(Role::Amount)),
            kind: pick_column(index, self.candidates(Role::Type)),
            credit: pick_column(index, self.candidates(Role::Credit)),
            debit: pick_column(index, self.candidates(Role::Debit)),
            inflow: pick_column(index, self.candidates(Role::Inflow)),
            outflow: pick_column(index, self.candidates(Role::Outflow)),
        };
        log::debug!("resolved columns: {resolved:?}");
        resolved
    }
}

/// Normalized column name picked for each role, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns<'a> {
    pub amount: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub credit: Option<&'a str>,
    pub debit: Option<&'a str>,
    pub inflow: Option<&'a str>,
    pub outflow: Option<&'a str>,
}

/// First candidate present in the index. Candidates are normalized the same
/// way as column names, then matched exactly.
pub fn pick_column<'a, S: AsRef<str>>(
    index: &'a ColumnNameIndex,
    candidates: &[S],
) -> Option<&'a str> {
    candidates.iter().find_map(|name| {
        let wanted = normalize_column_name(name.as_ref());
        index
            .names()
            .iter()
            .find(|col| **col == wanted)
            .map(String::as_str)
    })
}
