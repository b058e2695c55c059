//! Add command handlers.

use crate::args::{AddGoalArgs, AddTransactionArgs};
use crate::commands::{money, open, Out};
use crate::model::{Goal, Transaction};
use crate::{Config, Insert, Result};
use anyhow::bail;
use chrono::Local;

/// Records a new transaction and saves the transaction collection.
///
/// The category must be one of the categories offered for the transaction's type, and the date
/// defaults to today. The new transaction is placed at the front of the list.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message describing the new transaction and the resulting balance.
/// - The new transaction.
///
/// # Errors
///
/// - Returns an error if the category is not offered for the type.
/// - Returns an error if the amount is missing, zero, negative or not a number.
/// - Returns an error if the collection cannot be saved.
pub async fn add_transaction(config: Config, args: AddTransactionArgs) -> Result<Out<Transaction>> {
    if !args.category.trim().is_empty() && !args.r#type.offers(&args.category) {
        bail!(
            "'{}' is not a valid {} category, choose one of: {}",
            args.category,
            args.r#type,
            args.r#type.categories().join(", ")
        );
    }

    let mut app = open(&config).await;
    let draft = args.into_draft(Local::now().date_naive());
    let transaction = match app.add_transaction(draft).await? {
        Insert::Added(transaction) => transaction,
        Insert::Rejected(rejection) => bail!("Cannot add the transaction: {rejection}"),
    };

    let message = format!(
        "Added {} transaction {} ({} {}), the balance is now {}",
        transaction.r#type(),
        transaction.id(),
        transaction.r#type().sign(),
        money(&config, transaction.amount()),
        money(&config, app.store().balance()),
    );
    Ok(Out::new(message, transaction))
}

/// Creates a new savings goal and saves the goal collection.
///
/// A current amount that is blank, not a number or negative is recorded as zero.
///
/// # Errors
///
/// - Returns an error if the title is blank.
/// - Returns an error if the target is missing, zero, negative or not a number.
/// - Returns an error if the collection cannot be saved.
pub async fn add_goal(config: Config, args: AddGoalArgs) -> Result<Out<Goal>> {
    let mut app = open(&config).await;
    let goal = match app.add_goal(args.into_draft()).await? {
        Insert::Added(goal) => goal,
        Insert::Rejected(rejection) => bail!("Cannot add the goal: {rejection}"),
    };

    let message = format!(
        "Added goal {} '{}' with a target of {}",
        goal.id(),
        goal.title(),
        money(&config, goal.target_amount()),
    );
    Ok(Out::new(message, goal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::persistence::TRANSACTIONS;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    fn cinema() -> AddTransactionArgs {
        AddTransactionArgs {
            r#type: TransactionType::Expense,
            category: "Lazer".to_string(),
            amount: "100".to_string(),
            description: Some("Cinema".to_string()),
            date: NaiveDate::from_ymd_opt(2023, 10, 20),
        }
    }

    fn car() -> AddGoalArgs {
        AddGoalArgs {
            title: "Carro".to_string(),
            target: "9000".to_string(),
            current: None,
            deadline: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_add_transaction() {
        let env = TestEnv::new().await;
        let out = add_transaction(env.config(), cinema()).await.unwrap();
        let transaction = out.structure().unwrap();
        assert_eq!(transaction.id(), 6);
        assert_eq!(transaction.amount(), Amount::from(100));
        assert!(out.message().contains("the balance is now Kz 2650.00"));

        let listed = crate::commands::transactions(env.config()).await.unwrap();
        let listed = listed.structure().unwrap();
        assert_eq!(listed.len(), 6);
        assert_eq!(listed[0].description(), "Cinema");

        let stored = env.read_collection(TRANSACTIONS).await.unwrap();
        assert!(stored.starts_with(r#"[{"id":6,"type":"expense","category":"Lazer""#));
    }

    #[tokio::test]
    async fn test_add_transaction_defaults_date_to_today() {
        let env = TestEnv::new().await;
        let args = AddTransactionArgs {
            date: None,
            ..cinema()
        };
        let before = Local::now().date_naive();
        let out = add_transaction(env.config(), args).await.unwrap();
        let after = Local::now().date_naive();
        let date = out.structure().unwrap().date();
        assert!(date == before || date == after);
    }

    #[tokio::test]
    async fn test_add_transaction_wrong_category() {
        let env = TestEnv::new().await;
        let args = AddTransactionArgs {
            category: "Salário".to_string(),
            ..cinema()
        };
        let err = add_transaction(env.config(), args).await.unwrap_err();
        assert!(err.to_string().contains("not a valid expense category"));
    }

    #[tokio::test]
    async fn test_add_transaction_rejected_amounts() {
        let env = TestEnv::new().await;
        for amount in ["0", "", "abc", "-5"] {
            let args = AddTransactionArgs {
                amount: amount.to_string(),
                ..cinema()
            };
            let result = add_transaction(env.config(), args).await;
            assert!(result.is_err(), "amount '{amount}' should be rejected");
        }
        let listed = crate::commands::transactions(env.config()).await.unwrap();
        assert_eq!(listed.structure().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_add_transaction_blank_category() {
        let env = TestEnv::new().await;
        let args = AddTransactionArgs {
            category: "  ".to_string(),
            ..cinema()
        };
        let err = add_transaction(env.config(), args).await.unwrap_err();
        assert!(err.to_string().contains("a category is required"));
    }

    #[tokio::test]
    async fn test_add_goal() {
        let env = TestEnv::new().await;
        let out = add_goal(env.config(), car()).await.unwrap();
        let goal = out.structure().unwrap();
        assert_eq!(goal.id(), 3);
        assert_eq!(goal.current_amount(), Amount::ZERO);
        assert_eq!(
            out.message(),
            "Added goal 3 'Carro' with a target of Kz 9000.00"
        );

        let listed = crate::commands::goals(env.config()).await.unwrap();
        assert_eq!(listed.structure().unwrap()[0].goal.title(), "Carro");
    }

    #[tokio::test]
    async fn test_add_goal_rejected() {
        let env = TestEnv::new().await;
        let args = AddGoalArgs {
            title: String::new(),
            ..car()
        };
        let err = add_goal(env.config(), args).await.unwrap_err();
        assert!(err.to_string().contains("a title is required"));

        let args = AddGoalArgs {
            target: "0".to_string(),
            ..car()
        };
        assert!(add_goal(env.config(), args).await.is_err());
    }

    #[tokio::test]
    async fn test_added_records_survive_restart() {
        let env = TestEnv::new().await;
        add_transaction(env.config(), cinema()).await.unwrap();
        add_goal(env.config(), car()).await.unwrap();

        let out = crate::commands::summary(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.totals.total_expenses(), Amount::from(1650));
        assert_eq!(summary.totals.balance(), Amount::from(2650));
        assert_eq!(summary.recent[0].description(), "Cinema");
    }
}
