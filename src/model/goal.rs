use crate::model::{Amount, Rejection};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// A savings target with a current progress amount, as held in memory and as stored under the
/// `goals` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) target_amount: Amount,
    #[serde(default)]
    pub(crate) current_amount: Amount,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_date"
    )]
    pub(crate) deadline: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) description: String,
}

impl Goal {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        target_amount: Amount,
        current_amount: Amount,
        deadline: Option<NaiveDate>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            target_amount,
            current_amount,
            deadline,
            description: description.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target_amount(&self) -> Amount {
        self.target_amount
    }

    pub fn current_amount(&self) -> Amount {
        self.current_amount
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// How far along the goal is, in percent. A goal with a zero target reports zero.
    pub fn progress(&self) -> Decimal {
        self.current_amount.percent_of(self.target_amount)
    }

    /// Buckets `progress` for display.
    pub fn tier(&self) -> ProgressTier {
        ProgressTier::from_percent(self.progress())
    }
}

/// A coarse description of how close a goal is to being reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    /// Below 50%.
    Started,
    /// At least 50%.
    Halfway,
    /// At least 80%.
    NearlyThere,
}

serde_plain::derive_display_from_serialize!(ProgressTier);

impl ProgressTier {
    pub fn from_percent(percent: Decimal) -> Self {
        if percent >= Decimal::from(80) {
            ProgressTier::NearlyThere
        } else if percent >= Decimal::from(50) {
            ProgressTier::Halfway
        } else {
            ProgressTier::Started
        }
    }
}

/// A proposed goal exactly as the user entered it. Amounts are still raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDate>,
    pub description: String,
}

impl GoalDraft {
    /// Validates the draft and coerces its amounts. A current amount that is blank, non-numeric,
    /// negative or above `Amount::MAX` becomes zero.
    pub(crate) fn accept(self, id: u64) -> Result<Goal, Rejection> {
        if self.title.trim().is_empty() {
            return Err(Rejection::MissingTitle);
        }
        let target_amount = match Amount::coerce(&self.target_amount) {
            Some(amount) if !amount.is_zero() => amount,
            _ => return Err(Rejection::MissingTarget),
        };
        if target_amount.is_negative() {
            return Err(Rejection::NegativeAmount);
        }
        if !target_amount.is_within_limit() {
            return Err(Rejection::AmountTooLarge);
        }
        let current_amount = Amount::coerce(&self.current_amount)
            .filter(|amount| !amount.is_negative() && amount.is_within_limit())
            .unwrap_or(Amount::ZERO);
        Ok(Goal {
            id,
            title: self.title,
            target_amount,
            current_amount,
            deadline: self.deadline,
            description: self.description,
        })
    }
}

/// Reads a deadline that may be missing, `null` or an empty string.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::from_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
