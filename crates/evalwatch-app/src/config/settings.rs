//! Settings parser for .evalwatch/config.toml

use std::path::Path;

use evalwatch_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const EVALWATCH_DIR: &str = ".evalwatch";

/// Load settings from `<dir>/.evalwatch/config.toml`.
///
/// A missing or unreadable file yields defaults.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(EVALWATCH_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create `.evalwatch/config.toml` with commented defaults if it is missing
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let evalwatch_dir = dir.join(EVALWATCH_DIR);

    if !evalwatch_dir.exists() {
        std::fs::create_dir_all(&evalwatch_dir)
            .map_err(|e| Error::config(format!("Failed to create .evalwatch dir: {}", e)))?;
    }

    let config_path = evalwatch_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# evalwatch configuration

[endpoints]
api_base = "http://localhost:5000"   # REST API for commands and results
live_url = "ws://localhost:3000/ws"  # live status stream

[live]
log_caller_close = false  # log a disconnect line when evalwatch closes the stream itself

[refresh]
interval_secs = 0         # periodic results refresh, 0 = manual only (minimum 2)
request_timeout_secs = 10

[ui]
show_timestamps = true
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
