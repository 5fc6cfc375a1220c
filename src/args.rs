//! These structs provide the CLI interface for the expenses CLI.

use crate::model::{Granularity, RecordId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking personal expenses.
///
/// Record what you spend with a description, an amount, a category and a date. Every change
/// redraws two charts in the charts directory: expenses over time (by day, month or year) and a
/// breakdown by category.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/expenses; pass --expenses-home to put it somewhere else.
    Init(InitArgs),
    /// Record a new expense.
    Add(AddArgs),
    /// Delete an expense by its ID.
    Delete(DeleteArgs),
    /// Print all expenses and the total.
    List(ListArgs),
    /// Redraw the charts, optionally changing the time chart granularity.
    View(ViewArgs),
    /// Set the display name that is saved alongside the expenses.
    Name(NameArgs),
    /// Import expenses from a JSON array, such as the one a browser copy of this tool saved.
    Import(ImportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expense data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The currency label shown next to amounts. Defaults to PKR.
    #[arg(long)]
    currency: Option<String>,

    /// The time chart granularity used when the app starts. Defaults to month.
    #[arg(long, value_enum)]
    granularity: Option<Granularity>,
}

impl InitArgs {
    pub fn new(currency: Option<String>, granularity: Option<Granularity>) -> Self {
        Self {
            currency,
            granularity,
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn granularity(&self) -> Option<Granularity> {
        self.granularity
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the money was spent on.
    #[arg(long, short)]
    description: String,

    /// How much was spent. Must be greater than zero. Commas are allowed, e.g. 1,250.50
    #[arg(long, short, allow_hyphen_values = true)]
    amount: String,

    /// The category, e.g. Food, Travel, Bills.
    #[arg(long, short)]
    category: String,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the expense, as shown by `expenses list`.
    id: RecordId,
}

impl DeleteArgs {
    pub fn new(id: RecordId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }
}

/// The output format for `expenses list`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A markdown table.
    #[default]
    Table,
    /// A JSON array of expenses.
    Json,
    /// CSV with a header row.
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Args for the `expenses list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// How to print the expenses.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `expenses view` command.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Group the time chart by day, month or year. Defaults to the configured granularity.
    #[arg(long, value_enum)]
    by: Option<Granularity>,
}

impl ViewArgs {
    pub fn new(by: Option<Granularity>) -> Self {
        Self { by }
    }

    pub fn by(&self) -> Option<Granularity> {
        self.by
    }
}

/// Args for the `expenses name` command.
#[derive(Debug, Parser, Clone)]
pub struct NameArgs {
    /// The display name. Pass an empty string to clear it.
    name: String,
}

impl NameArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Args for the `expenses import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// A JSON file holding an array of expenses, each with description, amount, category and
    /// date. Any id in the file is ignored and a new one is assigned.
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
