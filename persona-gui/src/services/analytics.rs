use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::{app::config::ApiConfig, services::http::ResponseExt};

pub const REGISTER_IDENTITY: &str = "Register identity";
pub const PERFORM_ACTION: &str = "Perform action";

/// Event tracking. Fire-and-forget: implementations swallow failures, there
/// is no result to act upon.
#[async_trait]
pub trait AnalyticsApi {
    async fn track(&self, event: &str, distinct_id: &Uuid);
}

pub struct AnalyticsClient<C> {
    inner: C,
    endpoint: Option<String>,
}

impl<C> AnalyticsClient<C> {
    pub fn new(inner: C, endpoint: Option<String>) -> Self {
        Self { inner, endpoint }
    }
}

impl AnalyticsClient<reqwest::Client> {
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(reqwest::Client::new(), api.analytics_url.clone())
    }
}

#[async_trait]
impl AnalyticsApi for AnalyticsClient<reqwest::Client> {
    async fn track(&self, event: &str, distinct_id: &Uuid) {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => return,
        };
        let body = json!({
            "event": event,
            "distinct_id": distinct_id,
        });
        let res = self
            .inner
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string());
        match res {
            Ok(response) => {
                if let Err(info) = response.check_success().await {
                    tracing::warn!("analytics event '{}' rejected: {:?}", event, info);
                }
            }
            Err(e) => tracing::warn!("failed to send analytics event '{}': {}", event, e),
        }
    }
}
