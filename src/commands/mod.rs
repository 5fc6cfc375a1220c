//! Command handlers for the expenses CLI.
//!
//! Each invocation is one session: the saved expenses are loaded, the charts are drawn, the
//! command's event is handled, and the process exits.

mod add;
mod delete;
mod import;
mod init;
mod list;
mod name;
mod view;

use crate::app::App;
use crate::chart::SvgCharts;
use crate::storage::JsonStorage;
use crate::view::{Screen, ViewSync};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use delete::delete;
pub use import::{import, Imported};
pub use init::init;
pub use list::{list, Listing};
pub use name::name;
pub use view::{view, Drawn};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Starts a session backed by the files under the expenses home, drawing charts with `charts`.
fn start(config: &Config, charts: SvgCharts) -> Result<App> {
    let storage = JsonStorage::new(config.expenses_path());
    let view = ViewSync::new(Box::new(charts), config.currency());
    App::start(Box::new(storage), view, config.granularity())
}

/// Starts a session that draws into the configured charts directory.
fn open(config: &Config) -> Result<App> {
    start(config, SvgCharts::new(config.charts_dir())?)
}

/// Renders the expense table and the total as markdown.
fn render_table(screen: &Screen, currency: &str) -> String {
    let mut table = format!(
        "| ID | Description | Amount ({currency}) | Category | Date |\n\
         |----|-------------|---:|----------|------|\n"
    );
    for row in screen.rows() {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.id,
            cell(&row.description),
            row.amount,
            cell(&row.category),
            row.date
        ));
    }
    table.push_str(&format!("\nTotal: {currency} {}", screen.total()));
    table
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
