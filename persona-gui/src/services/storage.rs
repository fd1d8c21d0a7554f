use async_trait::async_trait;

use crate::{
    app::{config::ApiConfig, identities::Profile},
    names::FullyQualifiedName,
    services::http::{NotSuccessResponseInfo, ResponseExt},
};

#[derive(Debug, Clone)]
pub enum StorageError {
    RequestFailed(String),
    NotSuccessResponse(NotSuccessResponseInfo),
    CannotParseResponse(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "Request failed: {}", e),
            Self::NotSuccessResponse(info) => write!(f, "Not success response: {:?}", info),
            Self::CannotParseResponse(e) => write!(f, "Cannot parse response: {}", e),
        }
    }
}

/// Where public profiles are uploaded so that other users can resolve them.
/// Transport and authentication are the gateway's concern.
#[async_trait]
pub trait ProfileStorage {
    /// Upload the profile document for `name`. Returns its public URL.
    async fn upload_profile(
        &self,
        name: &FullyQualifiedName,
        profile: &Profile,
    ) -> Result<String, StorageError>;
}

pub struct StorageClient<C> {
    inner: C,
    base_url: String,
}

impl<C> StorageClient<C> {
    pub fn new(inner: C, base_url: String) -> Self {
        Self { inner, base_url }
    }
}

impl StorageClient<reqwest::Client> {
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(reqwest::Client::new(), api.storage_url.clone())
    }
}

#[async_trait]
impl ProfileStorage for StorageClient<reqwest::Client> {
    async fn upload_profile(
        &self,
        name: &FullyQualifiedName,
        profile: &Profile,
    ) -> Result<String, StorageError> {
        let url = format!("{}/profiles/{}", self.base_url, name);
        let response = self
            .inner
            .put(&url)
            .json(profile)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?
            .check_success()
            .await
            .map_err(StorageError::NotSuccessResponse)?;
        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::CannotParseResponse(e.to_string()))?;
        data.get("url")
            .and_then(|u| u.as_str())
            .map(|u| u.to_string())
            .ok_or_else(|| {
                StorageError::CannotParseResponse(format!("no url in answer for {}", name))
            })
    }
}
