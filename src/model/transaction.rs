use crate::model::{Amount, Rejection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categories offered for income transactions.
pub const INCOME_CATEGORIES: &[&str] = &["Salário", "Freelance", "Investimentos", "Presente", "Outros"];

/// Categories offered for expense transactions.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Transporte",
    "Moradia",
    "Saúde",
    "Lazer",
    "Educação",
    "Outros",
];

/// Whether money came in or went out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// The fixed list of categories a user may pick from for this type.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Returns true if `category` is one of the offered categories for this type.
    pub fn offers(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    /// The sign shown in front of an amount of this type.
    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }
}

/// A single recorded income or expense event, as held in memory and as stored under the
/// `transactions` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) id: u64,
    #[serde(rename = "type")]
    pub(crate) r#type: TransactionType,
    pub(crate) category: String,
    pub(crate) amount: Amount,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

impl Transaction {
    pub fn new(
        id: u64,
        r#type: TransactionType,
        category: impl Into<String>,
        amount: Amount,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            r#type,
            category: category.into(),
            amount,
            description: description.into(),
            date,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }
}

/// A proposed transaction exactly as the user entered it. The amount is still raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub r#type: TransactionType,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Validates the draft and coerces its amount. This does not assign an id.
    pub(crate) fn accept(self, id: u64) -> Result<Transaction, Rejection> {
        if self.category.trim().is_empty() {
            return Err(Rejection::MissingCategory);
        }
        let amount = match Amount::coerce(&self.amount) {
            Some(amount) if !amount.is_zero() => amount,
            _ => return Err(Rejection::MissingAmount),
        };
        if amount.is_negative() {
            return Err(Rejection::NegativeAmount);
        }
        if !amount.is_within_limit() {
            return Err(Rejection::AmountTooLarge);
        }
        Ok(Transaction {
            id,
            r#type: self.r#type,
            category: self.category,
            amount,
            description: self.description,
            date: self.date,
        })
    }
}
