use serde::Serialize;

use crate::data::model::{ColumnNameIndex, RawTable};
use crate::error::ServiceError;

/// Fixed keyword buckets for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Rent,
    Salary,
    Revenue,
    #[serde(rename = "Other Expense")]
    OtherExpense,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rent => write!(f, "Rent"),
            Self::Salary => write!(f, "Salary"),
            Self::Revenue => write!(f, "Revenue"),
            Self::OtherExpense => write!(f, "Other Expense"),
        }
    }
}

impl Category {
    /// Keywords first, then the sign of the amount.
    pub fn classify(description: &str, amount: f64) -> Self {
        let desc = description.to_lowercase();
        if desc.contains("rent") {
            Category::Rent
        } else if desc.contains("salary") {
            Category::Salary
        } else if amount > 0.0 {
            Category::Revenue
        } else {
            Category::OtherExpense
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedTransaction {
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

/// Bucket every row of a table with `description` and `amount` columns.
pub fn categorize_transactions(
    table: &RawTable,
) -> Result<Vec<CategorizedTransaction>, ServiceError> {
    let index = ColumnNameIndex::new(table);
    let (Some(desc_col), Some(amount_col)) = (
        index.source_column("description"),
        index.source_column("amount"),
    ) else {
        return Err(ServiceError::MissingColumns(vec!["description", "amount"]));
    };

    let categorized = (0..table.len())
        .map(|row| {
            let description = table.cell(row, desc_col).to_string();
            let amount = table.cell(row, amount_col).to_number();
            CategorizedTransaction {
                category: Category::classify(&description, amount),
                description,
                amount,
            }
        })
        .collect();
    Ok(categorized)
}
