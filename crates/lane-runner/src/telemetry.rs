// Best-effort usage statistics. A tracking request is dispatched on a detached
// task; its outcome is never awaited and can never fail the run. Without
// `LANE_RUNNER_TRACKING_URL` the request goes to an unresolvable placeholder
// host and nothing is collected.

use anyhow::Result;
use lane_sdk::LanePackage;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Endpoint used when `LANE_RUNNER_TRACKING_URL` is not set. The `.invalid`
/// host never resolves, so events are only delivered when the override points
/// at a real collector.
pub const DEFAULT_TRACKING_URL: &str = "https://usage.lane-runner.invalid/track";

static DEFAULT_ENDPOINT: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_TRACKING_URL).expect("Invalid default tracking URL"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which optional inputs a run used. Input values are never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub repository: Option<String>,
    #[serde(rename = "runnerOS")]
    pub runner_os: Option<String>,
    pub uses_options: bool,
    pub uses_subdirectory: bool,
    pub uses_bundle_install_path: bool,
}

/// Receives one usage event per tracked run.
pub trait UsageTracker: Send + Sync {
    /// Dispatch the event and return immediately.
    fn track(&self, event: UsageEvent);
}

/// Posts usage events as JSON over HTTP.
pub struct HttpUsageTracker {
    client: Client,
    endpoint: Url,
}

impl HttpUsageTracker {
    pub fn new(endpoint: Url) -> Result<Self> {
        let client = client_builder().build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Tracker for `override_url`, or the default endpoint. An unparsable
    /// override falls back to the default.
    pub fn from_override(override_url: Option<&str>) -> Result<Self> {
        let endpoint = match override_url.map(Url::parse) {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                tracing::debug!("Ignoring invalid tracking URL override: {e}");
                DEFAULT_ENDPOINT.clone()
            }
            None => DEFAULT_ENDPOINT.clone(),
        };
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl UsageTracker for HttpUsageTracker {
    fn track(&self, event: UsageEvent) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime available; usage event dropped.");
            return;
        };

        let request = self.client.post(self.endpoint.clone()).json(&event);
        // Detached: the handle is dropped and the response is never inspected.
        drop(runtime.spawn(async move {
            match request.send().await {
                Ok(response) => tracing::debug!("Usage event sent ({}).", response.status()),
                Err(e) => tracing::debug!("Usage event not sent: {e}"),
            }
        }));
    }
}

/// HTTP client settings shared by every tracker.
pub fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(LanePackage::user_agent())
        .timeout(REQUEST_TIMEOUT)
}

/// Tracker used when tracking is disabled.
#[derive(Debug, Clone, Default)]
pub struct DisabledUsageTracker;

impl UsageTracker for DisabledUsageTracker {
    fn track(&self, _event: UsageEvent) {}
}
