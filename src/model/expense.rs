use crate::error::{Field, ValidationError};
use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifies one expense. Ids are millisecond creation timestamps, bumped forward when needed so
/// that they stay unique and increasing within a store.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A single recorded expense. Once created it is never edited, only deleted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: RecordId,
    description: String,
    amount: Amount,
    category: String,
    /// An ISO `YYYY-MM-DD` date.
    date: String,
}

impl Expense {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    #[cfg(test)]
    pub(crate) fn for_test(id: i64, amount: &str, category: &str, date: &str) -> Self {
        Self {
            id: RecordId::new(id),
            description: format!("expense {id}"),
            amount: Amount::from_str(amount).unwrap(),
            category: category.to_string(),
            date: date.to_string(),
        }
    }
}

/// The raw values of the expense form, exactly as the user entered them.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }

    /// Checks that every field is present and that the amount parses to a positive number no
    /// greater than `Amount::LIMIT`, then builds the `Expense` with the given `id`. The
    /// description is stored trimmed.
    pub(crate) fn into_expense(self, id: RecordId) -> Result<Expense, ValidationError> {
        let description = self.description.trim().to_string();
        let amount = Amount::from_str(&self.amount)
            .ok()
            .filter(Amount::is_valid_expense);

        let mut invalid = Vec::new();
        if description.is_empty() {
            invalid.push(Field::Description);
        }
        if amount.is_none() {
            invalid.push(Field::Amount);
        }
        if self.category.is_empty() {
            invalid.push(Field::Category);
        }
        if self.date.is_empty() {
            invalid.push(Field::Date);
        }

        match amount {
            Some(amount) if invalid.is_empty() => Ok(Expense {
                id,
                description,
                amount,
                category: self.category,
                date: self.date,
            }),
            _ => Err(ValidationError::new(invalid)),
        }
    }
}

impl From<&Expense> for NewExpense {
    fn from(expense: &Expense) -> Self {
        NewExpense {
            description: expense.description.clone(),
            amount: expense.amount.value().to_string(),
            category: expense.category.clone(),
            date: expense.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let draft = NewExpense::new("  Lunch ", "12.50", "Food", "2024-03-15");
        let expense = draft.into_expense(RecordId::new(7)).unwrap();
        assert_eq!(expense.id(), RecordId::new(7));
        assert_eq!(expense.description(), "Lunch");
        assert_eq!(expense.amount().to_string(), "12.50");
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.date(), "2024-03-15");
    }

    #[test]
    fn test_blank_description() {
        let err = NewExpense::new("   ", "1", "Food", "2024-03-15")
            .into_expense(RecordId::new(1))
            .unwrap_err();
        assert_eq!(err.fields(), &[Field::Description]);
    }

    #[test]
    fn test_amount_must_be_positive_number() {
        for bad in [
            "0",
            "-5",
            "",
            "twelve",
            "1,000,000,000,000,000.01",
            "79228162514264337593543950335",
        ] {
            let err = NewExpense::new("Lunch", bad, "Food", "2024-03-15")
                .into_expense(RecordId::new(1))
                .unwrap_err();
            assert_eq!(err.fields(), &[Field::Amount], "amount {bad:?}");
        }
    }

    #[test]
    fn test_all_fields_missing() {
        let err = NewExpense::default()
            .into_expense(RecordId::new(1))
            .unwrap_err();
        assert_eq!(
            err.fields(),
            &[Field::Description, Field::Amount, Field::Category, Field::Date]
        );
    }

    #[test]
    fn test_persisted_shape() {
        let expense = Expense::for_test(1704412800000, "100", "Food", "2024-01-05");
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1704412800000i64,
                "description": "expense 1704412800000",
                "amount": 100.0,
                "category": "Food",
                "date": "2024-01-05",
            })
        );
    }

    #[test]
    fn test_record_id_from_str() {
        assert_eq!(RecordId::from_str(" 42 ").unwrap(), RecordId::new(42));
        assert!(RecordId::from_str("x").is_err());
    }
}
