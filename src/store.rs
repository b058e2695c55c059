//! The in-memory state of the tracker: transactions, goals and the totals derived from them.
//!
//! The `Store` is the single source of truth while the program runs. It knows nothing about
//! persistence; the `App` controller flushes it after every successful mutation.

use crate::model::{
    Amount, Goal, GoalDraft, Rejection, Transaction, TransactionDraft, EXPENSE_CATEGORIES,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace};

/// Aggregates derived from the transaction sequence. These are never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    total_income: Amount,
    total_expenses: Amount,
    balance: Amount,
}

impl Totals {
    /// Sums income and expenses over `transactions`.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let total_income: Amount = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(Transaction::amount)
            .sum();
        let total_expenses: Amount = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(Transaction::amount)
            .sum();
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }
}

/// One line of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    /// Percent of all expenses, zero when there are no expenses.
    pub percentage: Decimal,
}

/// Holds the ordered transaction and goal sequences, most recent first.
#[derive(Debug, Clone)]
pub struct Store {
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
    totals: Totals,
    next_transaction_id: u64,
    next_goal_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            goals: Vec::new(),
            totals: Totals::default(),
            next_transaction_id: 1,
            next_goal_id: 1,
        }
    }
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both collections wholesale and recomputes the totals. Id allocation resumes above
    /// the largest id already present so new records never collide with loaded ones.
    pub fn hydrate(&mut self, transactions: Vec<Transaction>, goals: Vec<Goal>) {
        self.next_transaction_id = next_id(transactions.iter().map(Transaction::id));
        self.next_goal_id = next_id(goals.iter().map(Goal::id));
        self.transactions = transactions;
        self.goals = goals;
        self.recompute();
        debug!(
            "Hydrated {} transactions and {} goals",
            self.transactions.len(),
            self.goals.len()
        );
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The first `count` transactions, i.e. the most recently added.
    pub fn recent(&self, count: usize) -> &[Transaction] {
        &self.transactions[..count.min(self.transactions.len())]
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn total_income(&self) -> Amount {
        self.totals.total_income()
    }

    pub fn total_expenses(&self) -> Amount {
        self.totals.total_expenses()
    }

    pub fn balance(&self) -> Amount {
        self.totals.balance()
    }

    /// Validates `draft`, assigns it a fresh id and puts it at the front of the sequence. Nothing
    /// changes when the draft is rejected.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction, Rejection> {
        let transaction = draft.accept(self.next_transaction_id)?;
        trace!("Accepted transaction {transaction:?}");
        self.next_transaction_id = transaction.id().saturating_add(1);
        self.transactions.insert(0, transaction);
        self.recompute();
        Ok(&self.transactions[0])
    }

    /// Validates `draft`, assigns it a fresh id and puts it at the front of the sequence. Nothing
    /// changes when the draft is rejected.
    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<&Goal, Rejection> {
        let goal = draft.accept(self.next_goal_id)?;
        trace!("Accepted goal {goal:?}");
        self.next_goal_id = goal.id().saturating_add(1);
        self.goals.insert(0, goal);
        Ok(&self.goals[0])
    }

    /// Sum of expense amounts recorded under `category`.
    pub fn category_total(&self, category: &str) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && t.category() == category)
            .map(Transaction::amount)
            .sum()
    }

    /// The share of all expenses recorded under `category`, in percent.
    pub fn category_percentage(&self, category: &str) -> Decimal {
        self.category_total(category)
            .percent_of(self.totals.total_expenses())
    }

    /// Total and share for every expense category, in the order the categories are offered.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        EXPENSE_CATEGORIES
            .iter()
            .map(|&category| CategoryShare {
                category: category.to_string(),
                total: self.category_total(category),
                percentage: self.category_percentage(category),
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.totals = Totals::compute(&self.transactions);
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::persistence::{sample_goals, sample_transactions};
    use chrono::NaiveDate;

    fn sample_store() -> Store {
        let mut store = Store::new();
        store.hydrate(sample_transactions(), sample_goals());
        store
    }

    fn cinema() -> TransactionDraft {
        TransactionDraft {
            r#type: TransactionType::Expense,
            category: "Lazer".to_string(),
            amount: "100".to_string(),
            description: "Cinema".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
        }
    }

    #[test]
    fn test_sample_totals() {
        let store = sample_store();
        assert_eq!(store.total_income(), Amount::from(4300));
        assert_eq!(store.total_expenses(), Amount::from(1550));
        assert_eq!(store.balance(), Amount::from(2750));
    }

    #[test]
    fn test_add_expense_to_sample() {
        let mut store = sample_store();
        let added = store.add_transaction(cinema()).unwrap().clone();
        assert_eq!(store.total_expenses(), Amount::from(1650));
        assert_eq!(store.balance(), Amount::from(2650));
        assert_eq!(store.total_income(), Amount::from(4300));
        assert_eq!(store.transactions().len(), 6);
        assert_eq!(store.transactions()[0], added);
        assert_eq!(added.description(), "Cinema");
    }

    #[test]
    fn test_add_income_updates_totals() {
        let mut store = sample_store();
        let draft = TransactionDraft {
            r#type: TransactionType::Income,
            category: "Presente".to_string(),
            amount: "250.75".to_string(),
            ..cinema()
        };
        store.add_transaction(draft).unwrap();
        assert_eq!(
            store.total_income(),
            Amount::from(4300) + Amount::coerce("250.75").unwrap()
        );
        assert_eq!(store.total_expenses(), Amount::from(1550));
    }

    #[test]
    fn test_rejected_transaction_changes_nothing() {
        let mut store = sample_store();
        let before = store.transactions().to_vec();
        let totals = store.totals();

        let no_category = TransactionDraft {
            category: String::new(),
            ..cinema()
        };
        assert_eq!(
            store.add_transaction(no_category).unwrap_err(),
            Rejection::MissingCategory
        );
        let no_amount = TransactionDraft {
            amount: String::new(),
            ..cinema()
        };
        assert!(store.add_transaction(no_amount).is_err());
        let zero_amount = TransactionDraft {
            amount: "0".to_string(),
            ..cinema()
        };
        assert!(store.add_transaction(zero_amount).is_err());

        assert_eq!(store.transactions(), before.as_slice());
        assert_eq!(store.totals(), totals);
    }

    #[test]
    fn test_huge_amount_is_rejected() {
        let mut store = sample_store();
        let draft = TransactionDraft {
            r#type: TransactionType::Income,
            category: "Outros".to_string(),
            amount: "79228162514264337593543950335".to_string(),
            ..cinema()
        };
        assert_eq!(
            store.add_transaction(draft).unwrap_err(),
            Rejection::AmountTooLarge
        );
        assert_eq!(store.transactions().len(), 5);
        assert_eq!(store.balance(), Amount::from(2750));
    }

    #[test]
    fn test_hydrate_with_huge_stored_amounts_saturates() {
        let huge = Amount::new(Decimal::MAX);
        let date = NaiveDate::from_ymd_opt(2023, 10, 20).unwrap();
        let transactions = vec![
            Transaction::new(1, TransactionType::Income, "Outros", huge, "", date),
            Transaction::new(2, TransactionType::Income, "Outros", huge, "", date),
            Transaction::new(3, TransactionType::Expense, "Outros", huge, "", date),
            Transaction::new(4, TransactionType::Expense, "Outros", huge, "", date),
        ];
        let mut store = Store::new();
        store.hydrate(transactions, Vec::new());
        assert_eq!(store.total_income(), huge);
        assert_eq!(store.total_expenses(), huge);
        assert_eq!(store.balance(), Amount::ZERO);
        assert_eq!(store.category_total("Outros"), huge);
        assert_eq!(store.category_percentage("Outros"), Decimal::ZERO);
    }

    #[test]
    fn test_ids_do_not_collide() {
        let mut store = sample_store();
        let a = store.add_transaction(cinema()).unwrap().id();
        let b = store.add_transaction(cinema()).unwrap().id();
        assert_ne!(a, b);
        assert_eq!(a, 6);
        assert_eq!(b, 7);
    }

    #[test]
    fn test_rejection_does_not_consume_id() {
        let mut store = Store::new();
        let _ = store.add_transaction(TransactionDraft {
            category: String::new(),
            ..cinema()
        });
        assert_eq!(store.add_transaction(cinema()).unwrap().id(), 1);
    }

    #[test]
    fn test_hydrate_resumes_ids_above_loaded() {
        let mut store = Store::new();
        let loaded = vec![Transaction::new(
            1697800000000,
            TransactionType::Income,
            "Salário",
            Amount::from(10),
            "",
            NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
        )];
        store.hydrate(loaded, Vec::new());
        assert_eq!(store.add_transaction(cinema()).unwrap().id(), 1697800000001);
    }

    #[test]
    fn test_hydrate_replaces_and_recomputes() {
        let mut store = sample_store();
        store.hydrate(Vec::new(), Vec::new());
        assert!(store.transactions().is_empty());
        assert!(store.goals().is_empty());
        assert_eq!(store.totals(), Totals::default());
    }

    #[test]
    fn test_add_goal() {
        let mut store = sample_store();
        let draft = GoalDraft {
            title: "Carro".to_string(),
            target_amount: "10000".to_string(),
            current_amount: String::new(),
            deadline: None,
            description: String::new(),
        };
        let goal = store.add_goal(draft).unwrap().clone();
        assert_eq!(goal.id(), 3);
        assert!(goal.current_amount().is_zero());
        assert_eq!(store.goals().len(), 3);
        assert_eq!(store.goals()[0], goal);
        // goals do not touch the transaction totals
        assert_eq!(store.balance(), Amount::from(2750));
    }

    #[test]
    fn test_rejected_goal_changes_nothing() {
        let mut store = sample_store();
        let draft = GoalDraft {
            title: "Carro".to_string(),
            ..GoalDraft::default()
        };
        assert_eq!(store.add_goal(draft).unwrap_err(), Rejection::MissingTarget);
        assert_eq!(store.goals().len(), 2);
    }

    #[test]
    fn test_category_total() {
        let store = sample_store();
        assert_eq!(store.category_total("Moradia"), Amount::from(1200));
        assert_eq!(store.category_total("Lazer"), Amount::ZERO);
        // income categories never count
        assert_eq!(store.category_total("Salário"), Amount::ZERO);
    }

    #[test]
    fn test_category_total_empty() {
        let store = Store::new();
        assert_eq!(store.category_total("Alimentação"), Amount::ZERO);
        assert_eq!(store.category_percentage("Alimentação"), Decimal::ZERO);
    }

    #[test]
    fn test_category_breakdown() {
        let store = sample_store();
        let breakdown = store.category_breakdown();
        assert_eq!(breakdown.len(), EXPENSE_CATEGORIES.len());
        assert_eq!(breakdown[0].category, "Alimentação");
        assert_eq!(breakdown[0].total, Amount::from(150));
        let sum: Decimal = breakdown.iter().map(|share| share.percentage).sum();
        assert_eq!(sum.round_dp(6), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_recent() {
        let store = sample_store();
        assert_eq!(store.recent(3).len(), 3);
        assert_eq!(store.recent(50).len(), 5);
        assert_eq!(store.recent(1)[0].id(), 1);
    }

    #[test]
    fn test_balance_identity() {
        let mut store = Store::new();
        for (ty, amount) in [
            (TransactionType::Income, "10.10"),
            (TransactionType::Expense, "3.05"),
            (TransactionType::Expense, "20"),
            (TransactionType::Income, "0.01"),
        ] {
            store
                .add_transaction(TransactionDraft {
                    r#type: ty,
                    category: "Outros".to_string(),
                    amount: amount.to_string(),
                    ..cinema()
                })
                .unwrap();
            let totals = store.totals();
            assert_eq!(
                totals.balance(),
                totals.total_income() - totals.total_expenses()
            );
            assert!(!totals.total_income().is_negative());
            assert!(!totals.total_expenses().is_negative());
        }
        assert_eq!(store.balance(), Amount::coerce("-12.94").unwrap());
    }
}
