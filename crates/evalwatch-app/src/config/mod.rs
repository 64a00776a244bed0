//! Configuration file parsing for evalwatch
//!
//! Supports `.evalwatch/config.toml` in the working directory (or the
//! directory passed with `--config`).

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
