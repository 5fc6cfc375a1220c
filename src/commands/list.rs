use crate::args::{ListArgs, OutputFormat};
use crate::commands::{open, plural, render_table, Out};
use crate::model::Expense;
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The expenses in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing {
    /// A JSON array of expenses.
    Json(serde_json::Value),
    /// A markdown table followed by the total.
    Table(String),
    /// CSV with a header row.
    Csv(String),
}

impl Debug for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Listing::Json(v) => write!(f, "Listing::Json({:?})", v),
            Listing::Table(s) => write!(f, "Listing::Table({} chars)", s.len()),
            Listing::Csv(s) => write!(f, "Listing::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Listing::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Listing::Table(s) => write!(f, "{}", s),
            Listing::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// Lists every expense in insertion order.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    let app = open(&config)?;
    let records = app.records();
    let listing = match args.format() {
        OutputFormat::Table => Listing::Table(render_table(app.screen(), config.currency())),
        OutputFormat::Json => Listing::Json(
            serde_json::to_value(records).context("Unable to serialize expenses")?,
        ),
        OutputFormat::Csv => Listing::Csv(to_csv(records)?),
    };
    let count = records.len();
    let message = format!(
        "{count} expense{}, total {} {}",
        plural(count),
        config.currency(),
        app.screen().total()
    );
    Ok(Out::new(message, listing))
}

fn to_csv(records: &[Expense]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer
            .serialize(record)
            .context("Unable to write expense as CSV")?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| anyhow!("Unable to finish writing CSV: {}", e.error()))?;
    String::from_utf8(data).context("CSV output was not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_list_table() {
        let env = TestEnv::new();
        let food = env.add("Groceries | weekly", "1234.5", "Food", "2024-01-05");
        env.add("Bus", "30", "Travel", "2024-02-01");

        let out = list(env.config(), ListArgs::new(OutputFormat::Table)).unwrap();
        assert_eq!(out.message(), "2 expenses, total PKR 1,264.50");
        let table = out.structure().unwrap().to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "| ID | Description | Amount (PKR) | Category | Date |"
        );
        assert_eq!(
            lines[2],
            format!(
                "| {} | Groceries \\| weekly | 1,234.50 | Food | 2024-01-05 |",
                food.id()
            )
        );
        assert!(lines[3].contains("| Bus | 30.00 | Travel |"));
        assert_eq!(*lines.last().unwrap(), "Total: PKR 1,264.50");
    }

    #[test]
    fn test_list_empty() {
        let env = TestEnv::new();
        let out = list(env.config(), ListArgs::new(OutputFormat::Table)).unwrap();
        assert_eq!(out.message(), "0 expenses, total PKR 0.00");
        let csv = list(env.config(), ListArgs::new(OutputFormat::Csv)).unwrap();
        assert_eq!(csv.structure().unwrap().to_string(), "");
    }

    #[test]
    fn test_list_json() {
        let env = TestEnv::new();
        let food = env.add("Groceries", "100", "Food", "2024-01-05");
        let out = list(env.config(), ListArgs::new(OutputFormat::Json)).unwrap();
        let Some(Listing::Json(value)) = out.structure() else {
            panic!("expected JSON listing");
        };
        let parsed: Vec<Expense> = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(parsed, vec![food]);
    }

    #[test]
    fn test_list_csv() {
        let env = TestEnv::new();
        let food = env.add("Lunch, with tea", "12.5", "Food", "2024-01-05");
        let out = list(env.config(), ListArgs::new(OutputFormat::Csv)).unwrap();
        let csv = out.structure().unwrap().to_string();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,description,amount,category,date");
        assert_eq!(
            lines[1],
            format!("{},\"Lunch, with tea\",12.5,Food,2024-01-05", food.id())
        );
    }
}
