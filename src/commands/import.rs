use crate::args::ImportArgs;
use crate::commands::{open, plural, Out};
use crate::error::ValidationError;
use crate::model::{Expense, NewExpense};
use crate::{fs, Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// The outcome of an import.
#[derive(Debug, Clone, Serialize)]
pub struct Imported {
    pub added: Vec<Expense>,
    pub skipped: usize,
}

/// Either a bare array of expenses, or a whole saved file with an `expenses` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    List(Vec<Entry>),
    Saved { expenses: Vec<Entry> },
}

/// One expense as found in an import file. Amounts may be numbers or strings. Ids are ignored.
#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    description: String,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: String,
}

impl From<Entry> for NewExpense {
    fn from(entry: Entry) -> Self {
        let amount = match entry.amount {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            _ => String::new(),
        };
        NewExpense::new(entry.description, amount, entry.category, entry.date)
    }
}

/// Adds every valid expense in the file, in file order, with newly assigned ids. Invalid entries
/// are skipped with a warning.
pub fn import(config: Config, args: ImportArgs) -> Result<Out<Imported>> {
    let path = args.file();
    let content = fs::read_to_string(path)?;
    let file: ImportFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse import file at {}", path.display()))?;
    let entries = match file {
        ImportFile::List(entries) | ImportFile::Saved { expenses: entries } => entries,
    };

    let mut app = open(&config)?;
    let mut imported = Imported {
        added: Vec::new(),
        skipped: 0,
    };
    for (ix, entry) in entries.into_iter().enumerate() {
        match app.submit(NewExpense::from(entry)) {
            Ok(expense) => imported.added.push(expense),
            Err(e) if e.is::<ValidationError>() => {
                warn!("Skipping entry {ix} of {}: {e}", path.display());
                imported.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let count = imported.added.len();
    let mut message = format!("Imported {count} expense{}", plural(count));
    if imported.skipped > 0 {
        message.push_str(&format!(", skipped {} invalid", imported.skipped));
    }
    Ok(Out::new(message, imported))
}
