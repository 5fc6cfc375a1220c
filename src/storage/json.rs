//! Implements `Storage` with a single JSON file.

use crate::model::Expense;
use crate::storage::{Saved, Storage};
use crate::{fs, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores the session in one JSON file with the keys `expenses` and `username`, which is the
/// same shape the browser version keeps in local storage.
///
/// ```json
/// {
///   "expenses": [
///     { "id": 1704412800000, "description": "Groceries", "amount": 100.0, "category": "Food", "date": "2024-01-05" }
///   ],
///   "username": "Ayesha"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

#[derive(Serialize)]
struct SavedRef<'a> {
    expenses: &'a [Expense],
    username: &'a str,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&mut self) -> Result<Saved> {
        let content = match fs::read_optional(&self.path)? {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                debug!("No saved expenses at {}", self.path.display());
                return Ok(Saved::default());
            }
        };
        let saved: Saved = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse expenses file at {}", self.path.display()))?;
        debug!(
            "Loaded {} expenses from {}",
            saved.expenses.len(),
            self.path.display()
        );
        Ok(saved)
    }

    fn save(&mut self, expenses: &[Expense], username: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(&SavedRef {
            expenses,
            username,
        })
        .context("Unable to serialize expenses")?;
        fs::write(&self.path, data).context("Unable to write expenses file")?;
        debug!(
            "Saved {} expenses to {}",
            expenses.len(),
            self.path.display()
        );
        Ok(())
    }
}
