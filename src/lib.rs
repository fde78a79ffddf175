// grade-gate - Letter grade bands from a flat INI-style file
//
// This is the library crate containing the parser, validation and
// classification logic. The binary crate (main.rs) provides the CLI.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ConfigStore, SettingsManager};
pub use metrics::EvaluationMetrics;
pub use models::{Evaluation, Grade, GradeLabel, GradeRange, RunSettings};
pub use services::{GradeError, GradeThresholds};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
