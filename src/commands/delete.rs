use crate::args::DeleteArgs;
use crate::commands::{open, Out};
use crate::model::Expense;
use crate::{Config, Result};

/// Deletes the expense with the given id. An unknown id is reported but is not an error.
pub fn delete(config: Config, args: DeleteArgs) -> Result<Out<Expense>> {
    let mut app = open(&config)?;
    let id = args.id();
    let out = match app.delete(id)? {
        Some(expense) => Out::new(
            format!(
                "Deleted expense {id}. Total is now {} {}",
                config.currency(),
                app.screen().total()
            ),
            expense,
        ),
        None => Out::new_message(format!("There is no expense with ID {id}")),
    };
    Ok(out)
}
