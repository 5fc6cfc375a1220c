//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and holds the currency label,
//! the starting chart granularity and where charts are drawn.

use crate::model::Granularity;
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const EXPENSES_JSON: &str = "expenses.json";
const CHARTS: &str = "charts";
const DEFAULT_CURRENCY: &str = "PKR";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`. It provides
/// the paths of the data file and the chart directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json`. An existing `config.json` is left
    /// alone and an error is returned so that a second `init` cannot clobber settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/expenses`
    /// - `currency` - The label shown next to amounts, e.g. `PKR`. Defaults to `PKR`.
    /// - `granularity` - The bar chart granularity used at startup. Defaults to `month`.
    pub fn create(
        dir: impl Into<PathBuf>,
        currency: Option<&str>,
        granularity: Option<Granularity>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative)
            .context("Unable to create the expenses home directory")?;
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let config_file = ConfigFile {
            currency: currency.unwrap_or(DEFAULT_CURRENCY).to_string(),
            granularity: granularity.unwrap_or_default(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path)?;

        let config = Self {
            root,
            config_path,
            config_file,
        };
        fs::create_dir_all(config.charts_dir())?;
        Ok(config)
    }

    /// This will
    /// - validate that `expenses_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The expenses home directory is missing '{}', run 'expenses init' first",
                maybe_relative.display()
            )
        }
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'expenses init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The file holding the expenses and display name.
    pub fn expenses_path(&self) -> PathBuf {
        self.root.join(EXPENSES_JSON)
    }

    /// Returns the stored `charts_path` if it is absolute, otherwise resolves it relative to the
    /// home directory.
    pub fn charts_dir(&self) -> PathBuf {
        let p = self.config_file.charts_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    pub fn granularity(&self) -> Granularity {
        self.config_file.granularity
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "currency": "PKR",
///   "granularity": "month",
///   "charts_path": "charts"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The label shown next to amounts
    currency: String,

    /// The bar chart granularity at startup
    #[serde(default)]
    granularity: Granularity,

    /// Where charts are drawn (optional, relative to the home directory or absolute)
    /// Defaults to $EXPENSES_HOME/charts if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    charts_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: DEFAULT_CURRENCY.to_string(),
            granularity: Granularity::default(),
            charts_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write(p, data).context("Unable to write config file")
    }

    fn charts_path(&self) -> PathBuf {
        self.charts_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CHARTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("expenses");
        let created = Config::create(&home, Some("USD"), Some(Granularity::Day)).unwrap();
        assert!(created.config_path().is_file());
        assert!(created.charts_dir().is_dir());
        assert!(created.charts_dir().starts_with(created.root()));

        let loaded = Config::load(&home).unwrap();
        assert_eq!(loaded.currency(), "USD");
        assert_eq!(loaded.granularity(), Granularity::Day);
        assert_eq!(loaded.expenses_path(), loaded.root().join("expenses.json"));
    }

    #[test]
    fn test_create_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), None, None).unwrap();
        assert_eq!(config.currency(), "PKR");
        assert_eq!(config.granularity(), Granularity::Month);
    }

    #[test]
    fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None, None).unwrap();
        assert!(Config::create(dir.path(), Some("USD"), None).is_err());
        assert_eq!(Config::load(dir.path()).unwrap().currency(), "PKR");
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("expenses init"));
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[test]
    fn test_load_rejects_wrong_app_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"app_name": "budget", "config_version": 1, "currency": "PKR"}"#,
        )
        .unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_absolute_charts_path() {
        let dir = TempDir::new().unwrap();
        let elsewhere = dir.path().join("elsewhere");
        let config_file = ConfigFile {
            charts_path: Some(elsewhere.clone()),
            ..ConfigFile::default()
        };
        config_file.save(dir.path().join("config.json")).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.charts_dir(), elsewhere);
        assert_eq!(config.granularity(), Granularity::Month);
    }
}
