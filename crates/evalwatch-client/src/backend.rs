//! Backend seam for control commands and the results snapshot
//!
//! [`EvaluationBackend`] is the Send variant used across Tokio tasks;
//! [`HttpBackend`] talks to the REST API with reqwest.

use std::time::Duration;

use evalwatch_core::prelude::*;
use evalwatch_core::StatsSnapshot;

use crate::commands::{Command, CommandAck};
use crate::endpoints::Endpoints;

/// Operations the dashboard needs from the evaluation backend
#[trait_variant::make(EvaluationBackend: Send)]
pub trait LocalEvaluationBackend {
    /// POST a control command and decode its acknowledgement
    async fn send_command(&self, command: Command) -> Result<CommandAck>;

    /// GET the current per-domain results
    async fn fetch_snapshot(&self) -> Result<StatsSnapshot>;
}

/// REST implementation of [`EvaluationBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("evalwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl EvaluationBackend for HttpBackend {
    async fn send_command(&self, command: Command) -> Result<CommandAck> {
        let url = self.endpoints.command_url(command);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("{}: {}", url, e)))?;

        // The runner reports refusals (e.g. "already running") in the body
        // with a non-2xx status, so the body is decoded either way.
        let status = response.status();
        response.json::<CommandAck>().await.map_err(|e| {
            Error::command(format!("{} ({}): invalid acknowledgement: {}", url, status, e))
        })
    }

    async fn fetch_snapshot(&self) -> Result<StatsSnapshot> {
        let url = self.endpoints.analysis_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("{}: {}", url, e)))?
            .error_for_status()
            .map_err(|e| Error::snapshot(e.to_string()))?;

        response
            .json::<StatsSnapshot>()
            .await
            .map_err(|e| Error::snapshot(format!("{}: invalid results: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let endpoints = Endpoints::new("http://127.0.0.1:9", "ws://127.0.0.1:9/ws").unwrap();
        let backend = HttpBackend::new(endpoints, Duration::from_secs(2)).unwrap();

        // Both trait variants are in scope here, so call through the Send one.
        let err = EvaluationBackend::send_command(&backend, Command::Start)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));

        let err = EvaluationBackend::fetch_snapshot(&backend)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
