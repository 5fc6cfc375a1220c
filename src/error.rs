use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The fields of an expense submission that can fail validation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
}

serde_plain::derive_display_from_serialize!(Field);

/// Returned when an expense submission is missing a required field or has a non-positive amount.
/// This is the only recoverable error; when it occurs nothing has been stored, saved or redrawn.
///
/// Callers holding an `anyhow::Error` can recover it with `err.downcast_ref::<ValidationError>()`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationError {
    fields: Vec<Field>,
}

impl ValidationError {
    pub(crate) fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The invalid fields, in form order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let problems = self
            .fields
            .iter()
            .map(|field| match field {
                Field::Amount => "amount must be a positive number".to_string(),
                other => format!("{other} is empty"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Please enter a valid description, amount, category, and date ({problems})"
        )
    }
}

impl std::error::Error for ValidationError {}

#[test]
fn test_validation_error_message() {
    let e = ValidationError::new(vec![Field::Description, Field::Amount]);
    assert_eq!(
        e.to_string(),
        "Please enter a valid description, amount, category, and date \
        (description is empty, amount must be a positive number)"
    );
}

#[test]
fn test_validation_error_downcast() {
    let e: Error = ValidationError::new(vec![Field::Date]).into();
    let v = e.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(v.fields(), &[Field::Date]);
}
