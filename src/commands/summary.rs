//! The dashboard: totals, the expense breakdown and the latest transactions.

use crate::commands::{money, open, transaction_line, Out};
use crate::model::Transaction;
use crate::store::{CategoryShare, Totals};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// Structured output of `finance summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub totals: Totals,
    pub categories: Vec<CategoryShare>,
    pub recent: Vec<Transaction>,
}

/// Shows the balance, total income and total expenses, how expenses split across the expense
/// categories, and the `recent_count` most recent transactions.
pub async fn summary(config: Config) -> Result<Out<Summary>> {
    let app = open(&config).await;
    let store = app.store();
    let summary = Summary {
        totals: store.totals(),
        categories: store.category_breakdown(),
        recent: store.recent(config.recent_count()).to_vec(),
    };

    let mut message = String::new();
    writeln!(message, "Balance:   {}", money(&config, summary.totals.balance()))?;
    writeln!(message, "Income:    {}", money(&config, summary.totals.total_income()))?;
    writeln!(message, "Expenses:  {}", money(&config, summary.totals.total_expenses()))?;
    writeln!(message)?;
    writeln!(message, "Expenses by category:")?;
    for share in &summary.categories {
        writeln!(
            message,
            "  {:<14} {:>16} {:>6.1}%",
            share.category,
            money(&config, share.total),
            share.percentage
        )?;
    }
    writeln!(message)?;
    if summary.recent.is_empty() {
        write!(message, "No transactions yet.")?;
    } else {
        write!(message, "Recent transactions:")?;
        for transaction in &summary.recent {
            write!(message, "\n  {}", transaction_line(&config, transaction))?;
        }
    }

    Ok(Out::new(message, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, EXPENSE_CATEGORIES};
    use crate::persistence::GOALS;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_summary_of_sample_data() {
        let env = TestEnv::new().await;
        let out = summary(env.config()).await.unwrap();
        let summary = out.structure().unwrap();

        assert_eq!(summary.totals.total_income(), Amount::from(4300));
        assert_eq!(summary.totals.total_expenses(), Amount::from(1550));
        assert_eq!(summary.totals.balance(), Amount::from(2750));
        assert_eq!(summary.categories.len(), EXPENSE_CATEGORIES.len());
        assert_eq!(summary.recent.len(), 5);
        assert!(out.message().contains("Balance:   Kz 2750.00"));
        assert!(out.message().contains("Recent transactions:"));
    }

    #[tokio::test]
    async fn test_summary_breakdown() {
        let env = TestEnv::new().await;
        let out = summary(env.config()).await.unwrap();
        let moradia = out
            .structure()
            .unwrap()
            .categories
            .iter()
            .find(|share| share.category == "Moradia")
            .unwrap()
            .clone();
        assert_eq!(moradia.total, Amount::from(1200));
        assert_eq!(moradia.percentage.round_dp(1), Decimal::new(774, 1));
    }

    #[tokio::test]
    async fn test_summary_leaves_unreadable_file_alone() {
        let env = TestEnv::new().await;
        let path = env.config().data_dir().join("transactions.json");
        let latin1 = b"[{\"id\":1,\"type\":\"income\",\"category\":\"Sal\xe1rio\"}]".to_vec();
        tokio::fs::write(&path, &latin1).await.unwrap();

        let out = summary(env.config()).await.unwrap();
        assert!(out.structure().unwrap().recent.is_empty());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), latin1);
        assert!(env.read_collection(GOALS).await.is_some());
    }

    #[tokio::test]
    async fn test_summary_with_empty_collections() {
        let env = TestEnv::new().await;
        env.write_collections("[]", "[]").await;
        let out = summary(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.totals.balance(), Amount::ZERO);
        assert!(summary.recent.is_empty());
        assert!(summary
            .categories
            .iter()
            .all(|share| share.percentage.is_zero()));
        assert!(out.message().contains("No transactions yet."));
    }
}
