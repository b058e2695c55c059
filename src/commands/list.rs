//! Read-only listings of transactions, goals and categories.

use crate::args::CategoriesArgs;
use crate::commands::{money, open, transaction_line, Out};
use crate::model::{Goal, ProgressTier, Transaction, TransactionType};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Lists every transaction, most recent first.
pub async fn transactions(config: Config) -> Result<Out<Vec<Transaction>>> {
    let app = open(&config).await;
    let transactions = app.store().transactions().to_vec();
    if transactions.is_empty() {
        return Ok(Out::new("No transactions yet.", transactions));
    }
    let lines: Vec<String> = transactions
        .iter()
        .map(|t| transaction_line(&config, t))
        .collect();
    let message = format!("{} transactions:\n{}", transactions.len(), lines.join("\n"));
    Ok(Out::new(message, transactions))
}

/// A goal together with the progress figures derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: Decimal,
    pub tier: ProgressTier,
}

impl From<&Goal> for GoalView {
    fn from(goal: &Goal) -> Self {
        Self {
            goal: goal.clone(),
            progress: goal.progress(),
            tier: goal.tier(),
        }
    }
}

/// Lists every goal, most recent first, with how far along it is.
pub async fn goals(config: Config) -> Result<Out<Vec<GoalView>>> {
    let app = open(&config).await;
    let views: Vec<GoalView> = app.store().goals().iter().map(GoalView::from).collect();
    if views.is_empty() {
        return Ok(Out::new("No goals yet.", views));
    }

    let mut lines = Vec::with_capacity(views.len());
    for view in &views {
        let goal = &view.goal;
        let deadline = match goal.deadline() {
            Some(date) => format!(" by {date}"),
            None => String::new(),
        };
        lines.push(format!(
            "{}: {} of {} ({:.1}%, {}){deadline}",
            goal.title(),
            money(&config, goal.current_amount()),
            money(&config, goal.target_amount()),
            view.progress,
            view.tier,
        ));
    }
    let message = format!("{} goals:\n{}", views.len(), lines.join("\n"));
    Ok(Out::new(message, views))
}

/// The fixed categories offered for one transaction type.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryList {
    pub r#type: TransactionType,
    pub categories: Vec<String>,
}

/// Lists the categories a transaction of each type may use.
pub fn categories(args: CategoriesArgs) -> Out<Vec<CategoryList>> {
    let types = match args.r#type {
        Some(t) => vec![t],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    let lists: Vec<CategoryList> = types
        .into_iter()
        .map(|t| CategoryList {
            r#type: t,
            categories: t.categories().iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    let message = lists
        .iter()
        .map(|list| format!("{}: {}", list.r#type, list.categories.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    Out::new(message, lists)
}
