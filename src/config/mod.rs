//! Configuration module for favicon-scan
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional, so `Config::default()` is a complete configuration.
//!
//! # Example
//!
//! ```no_run
//! use favicon_scan::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("favicon-scan.toml")).unwrap();
//! println!("Concurrent requests: {}", config.scanner.max_concurrent_requests);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, ScannerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
