//! Endpoint configuration for the evaluation backend
//!
//! Endpoints are injected at session start. Nothing here looks at the
//! runtime environment to choose between deployments.

use evalwatch_core::prelude::*;
use url::Url;

use crate::commands::Command;

/// Default REST base for a locally running backend
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Default live channel for a locally running backend
pub const DEFAULT_LIVE_URL: &str = "ws://localhost:3000/ws";

/// Results snapshot path, relative to the API base
const ANALYSIS_PATH: &str = "/api/analysis";

/// Command path prefix, relative to the API base
const EVALUATIONS_PATH: &str = "/api/evaluations";

/// Validated backend endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    live_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            live_url: DEFAULT_LIVE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Validate and build endpoints.
    ///
    /// `api_base` must be `http`/`https`, `live_url` must be `ws`/`wss`.
    pub fn new(api_base: &str, live_url: &str) -> Result<Self> {
        validate(api_base, &["http", "https"])?;
        validate(live_url, &["ws", "wss"])?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            live_url: live_url.to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn live_url(&self) -> &str {
        &self.live_url
    }

    pub fn analysis_url(&self) -> String {
        format!("{}{}", self.api_base, ANALYSIS_PATH)
    }

    pub fn command_url(&self, command: Command) -> String {
        format!(
            "{}{}/{}",
            self.api_base,
            EVALUATIONS_PATH,
            command.path_segment()
        )
    }
}

fn validate(raw: &str, schemes: &[&str]) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| Error::invalid_endpoint(raw, e.to_string()))?;
    if !schemes.contains(&url.scheme()) {
        return Err(Error::invalid_endpoint(
            raw,
            format!("expected scheme {}", schemes.join(" or ")),
        ));
    }
    Ok(())
}
