//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod expense;
mod granularity;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, NewExpense, RecordId};
pub use granularity::Granularity;
