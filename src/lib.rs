pub mod aggregate;
pub mod app;
pub mod args;
pub mod chart;
pub mod commands;
mod config;
pub mod error;
mod fs;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::{Error, Result, ValidationError};
