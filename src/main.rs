//! evalwatch - terminal dashboard for remote evaluation runs
//!
//! This is the binary entry point. All logic lives in the workspace crates.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use evalwatch_app::config::{self, Settings};

/// evalwatch - monitor and control a remote evaluation run
#[derive(Parser, Debug)]
#[command(name = "evalwatch", version)]
#[command(about = "Monitor and control a remote evaluation run", long_about = None)]
struct Args {
    /// Directory containing `.evalwatch/config.toml` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// REST API base URL, e.g. http://localhost:5000
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Live status stream URL, e.g. ws://localhost:3000/ws
    #[arg(long, value_name = "URL")]
    live_url: Option<String>,

    /// Write a default `.evalwatch/config.toml` if none exists
    #[arg(long)]
    init_config: bool,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,
}

impl Args {
    /// Command-line endpoints take precedence over the config file
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(api_base) = &self.api_base {
            settings.endpoints.api_base = api_base.clone();
        }
        if let Some(live_url) = &self.live_url {
            settings.endpoints.live_url = live_url.clone();
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    evalwatch_core::logging::init()?;

    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    if args.init_config {
        config::init_config_dir(&config_dir)?;
    }

    let mut settings = config::load_settings(&config_dir);
    args.apply_overrides(&mut settings);

    if args.headless {
        headless::run_headless(settings).await?;
    } else {
        evalwatch_tui::run(settings).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_endpoints() {
        let args = Args::parse_from([
            "evalwatch",
            "--api-base",
            "https://eval.example.com",
            "--live-url",
            "wss://eval.example.com/ws",
        ]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);

        assert_eq!(settings.endpoints.api_base, "https://eval.example.com");
        assert_eq!(settings.endpoints.live_url, "wss://eval.example.com/ws");
        assert!(!args.headless);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let args = Args::parse_from(["evalwatch", "--headless"]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);

        assert_eq!(settings, Settings::default());
        assert!(args.headless);
    }
}
