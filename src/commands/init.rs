use crate::args::InitArgs;
use crate::commands::{open, Out};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, the charts directory and an initial `config.json`, then draws the
/// (empty) charts so that the user has something to open right away.
///
/// # Arguments
/// - `expenses_home` - The directory that will be the root of data directory, e.g. `$HOME/expenses`
/// - `args` - The optional currency label and starting granularity.
///
/// # Errors
/// - Returns an error if the config already exists or any file operation fails.
pub fn init(expenses_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::create(expenses_home, args.currency(), args.granularity())
        .context("Unable to create the data directory and configs")?;
    open(&config)?;
    Ok(format!(
        "Successfully created the expenses directory at {}",
        config.root().display()
    )
    .into())
}
