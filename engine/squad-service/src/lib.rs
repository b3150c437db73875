//! Squad Optimizer Service Library
//!
//! Configuration, logging, command line handling and report rendering for the
//! `squad-optimizer` binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use app::{load_facts, run};
pub use cli::Cli;
pub use config::{load_config, validate_config, LoggingConfig, OptimizerSettings, ServiceConfig};
pub use logging::initialize_logging;
pub use report::TextReport;
