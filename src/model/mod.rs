//! Types that represent the core data model, such as `Transaction` and `Goal`.
mod amount;
mod goal;
mod transaction;

pub use amount::{Amount, AmountError};
pub use goal::{Goal, GoalDraft, ProgressTier};
pub use transaction::{
    Transaction, TransactionDraft, TransactionType, EXPENSE_CATEGORIES, INCOME_CATEGORIES,
};

use std::fmt::{Display, Formatter};

/// The reason a draft was not turned into a record. A rejected insert changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// A transaction needs a category.
    MissingCategory,
    /// A transaction needs a non-zero numeric amount.
    MissingAmount,
    /// Amounts are never negative.
    NegativeAmount,
    /// A goal needs a title.
    MissingTitle,
    /// A goal needs a non-zero numeric target amount.
    MissingTarget,
    /// Amounts above `Amount::MAX` are refused.
    AmountTooLarge,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rejection::MissingCategory => "a category is required",
            Rejection::MissingAmount => "a non-zero amount is required",
            Rejection::NegativeAmount => "amounts cannot be negative",
            Rejection::MissingTitle => "a title is required",
            Rejection::MissingTarget => "a non-zero target amount is required",
            Rejection::AmountTooLarge => "amounts cannot exceed one quadrillion",
        };
        f.write_str(s)
    }
}

impl std::error::Error for Rejection {}
