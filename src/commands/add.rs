use crate::args::AddArgs;
use crate::commands::{open, Out};
use crate::model::{Expense, NewExpense};
use crate::{Config, Result};
use chrono::Local;

/// Records a new expense. The date defaults to today in local time.
///
/// # Errors
/// - Returns a `ValidationError` if the description is blank or the amount is not a positive
///   number. Nothing is saved in that case.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let date = args.date().unwrap_or_else(|| Local::now().date_naive());
    let draft = NewExpense::new(
        args.description(),
        args.amount(),
        args.category(),
        date.format("%Y-%m-%d").to_string(),
    );

    let mut app = open(&config)?;
    let expense = app.submit(draft)?;
    let currency = config.currency();
    let message = format!(
        "Added expense {}: {} {currency} {} ({}) on {}. Total is now {currency} {}",
        expense.id(),
        expense.description(),
        expense.amount(),
        expense.category(),
        expense.date(),
        app.screen().total()
    );
    Ok(Out::new(message, expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationError};
    use crate::test::TestEnv;

    #[test]
    fn test_add() {
        let env = TestEnv::new();
        let first = env.add("  Groceries ", "1,250.5", "Food", "2024-01-05");
        assert_eq!(first.description(), "Groceries");
        assert_eq!(first.amount().to_string(), "1,250.50");
        assert_eq!(first.date(), "2024-01-05");

        let second = env.add("Bus", "30", "Travel", "2024-01-06");
        assert!(second.id() > first.id());

        let saved = env.saved();
        assert_eq!(saved.expenses, vec![first, second]);
    }

    #[test]
    fn test_add_message_has_total() {
        let env = TestEnv::new();
        env.add("Groceries", "100", "Food", "2024-01-05");
        let out = add(env.config(), AddArgs::new("Taxi", "50", "Travel", None)).unwrap();
        assert!(out.message().ends_with("Total is now PKR 150.00"));
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(out.structure().unwrap().date(), today);
    }

    #[test]
    fn test_add_invalid() {
        let env = TestEnv::new();
        env.add("Groceries", "100", "Food", "2024-01-05");
        let err = add(env.config(), AddArgs::new(" ", "abc", "Food", None)).unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Description, Field::Amount]);
        assert!(err.to_string().starts_with("Please enter a valid"));
        assert_eq!(env.saved().expenses.len(), 1);
    }

    #[test]
    fn test_add_zero_is_invalid() {
        let env = TestEnv::new();
        assert!(add(env.config(), AddArgs::new("Free", "0", "Food", None)).is_err());
        assert!(env.saved().expenses.is_empty());
    }
}
