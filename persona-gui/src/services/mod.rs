pub mod analytics;
pub mod http;
pub mod node;
pub mod storage;

use std::sync::Arc;

use crate::app::{config::ApiConfig, identities::IdentityStore};

/// Handles to the external collaborators, injected into panels. Panels clone
/// what they need into their tasks; none of the handles is ever blocked on
/// directly.
#[derive(Clone)]
pub struct Services {
    pub node: Arc<dyn node::api::NodeApi + Send + Sync>,
    pub storage: Arc<dyn storage::ProfileStorage + Send + Sync>,
    pub analytics: Arc<dyn analytics::AnalyticsApi + Send + Sync>,
    pub identities: Arc<IdentityStore>,
}

impl Services {
    /// Wire the default reqwest-backed clients against the configured
    /// endpoints.
    pub fn from_config(api: &ApiConfig, identities: Arc<IdentityStore>) -> Self {
        Self {
            node: Arc::new(node::client::NodeClient::from_config(api)),
            storage: Arc::new(storage::StorageClient::from_config(api)),
            analytics: Arc::new(analytics::AnalyticsClient::from_config(api)),
            identities,
        }
    }
}
