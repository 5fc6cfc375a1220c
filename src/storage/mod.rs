//! Durable storage of the expense list and the display name.
//!
//! Storage is wholesale: `load` returns everything and `save` overwrites everything.

mod json;
mod memory;

pub use json::JsonStorage;
pub use memory::MemoryStorage;

use crate::model::Expense;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Everything that is persisted between sessions. Both fields are absent on first run.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Saved {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub username: String,
}

/// Loads and saves the session data.
pub trait Storage {
    fn load(&mut self) -> Result<Saved>;
    fn save(&mut self, expenses: &[Expense], username: &str) -> Result<()>;
}
