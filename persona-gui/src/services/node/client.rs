use async_trait::async_trait;
use bitcoin::Amount;
use serde_json::json;

use super::api::{NameApi, NodeApiError, RegistrarApi, RegistrationReceipt, WalletApi};
use crate::{
    app::{account::IdentityKeypair, config::ApiConfig},
    names::FullyQualifiedName,
    services::http::ResponseExt,
};

/// Client for the registrar node HTTP API.
pub struct NodeClient<C> {
    inner: C,
    node_url: String,
    balance_url: String,
}

impl<C> NodeClient<C> {
    pub fn new(inner: C, node_url: String, balance_url: String) -> Self {
        Self {
            inner,
            node_url,
            balance_url,
        }
    }
}

impl NodeClient<reqwest::Client> {
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            reqwest::Client::new(),
            api.node_url.clone(),
            api.balance_url.clone(),
        )
    }
}

#[async_trait]
impl NameApi for NodeClient<reqwest::Client> {
    async fn name_availability(&self, name: &FullyQualifiedName) -> Result<bool, NodeApiError> {
        let url = format!("{}/v1/names/{}", self.node_url, name);
        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(|e| NodeApiError::RequestFailed(e.to_string()))?;
        // An unknown name is the available one.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(true);
        }
        let data = parse_json(
            response
                .check_success()
                .await
                .map_err(NodeApiError::NotSuccessResponse)?,
        )
        .await?;
        match data.get("status").and_then(|s| s.as_str()) {
            Some(_) => Ok(false),
            None => Err(NodeApiError::CannotParseData(format!(
                "no registration status for {}",
                name
            ))),
        }
    }

    async fn name_price(&self, name: &FullyQualifiedName) -> Result<Amount, NodeApiError> {
        let url = format!("{}/v1/prices/names/{}", self.node_url, name);
        let data = get_data(&self.inner, &url).await?;
        let btc = data
            .get("name_price")
            .and_then(|p| p.get("btc"))
            .and_then(|p| p.as_f64())
            .ok_or_else(|| {
                NodeApiError::CannotParseData(format!("no price in answer for {}", name))
            })?;
        Amount::from_btc(btc).map_err(|e| NodeApiError::CannotParseData(e.to_string()))
    }
}

#[async_trait]
impl RegistrarApi for NodeClient<reqwest::Client> {
    async fn register_name(
        &self,
        name: &FullyQualifiedName,
        owner: &str,
        keypair: &IdentityKeypair,
    ) -> Result<RegistrationReceipt, NodeApiError> {
        let url = format!("{}/v1/registrations", self.node_url);
        let body = json!({
            "name": name,
            "owner_address": owner,
            "public_key": keypair.public_key,
        });
        let response = self
            .inner
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NodeApiError::RequestFailed(e.to_string()))?
            .check_success()
            .await
            .map_err(NodeApiError::NotSuccessResponse)?;
        let data = parse_json(response).await?;
        Ok(RegistrationReceipt {
            transaction_id: data
                .get("transaction_id")
                .and_then(|t| t.as_str())
                .map(|t| t.to_string()),
        })
    }
}

#[async_trait]
impl WalletApi for NodeClient<reqwest::Client> {
    async fn wallet_balance(&self, address: &str) -> Result<Amount, NodeApiError> {
        let url = format!("{}/{}", self.balance_url, address);
        let data = get_data(&self.inner, &url).await?;
        let btc = data
            .get("balance")
            .and_then(|b| b.as_f64())
            .ok_or_else(|| {
                NodeApiError::CannotParseData(format!("no balance in answer for {}", address))
            })?;
        Amount::from_btc(btc).map_err(|e| NodeApiError::CannotParseData(e.to_string()))
    }
}

// Sends a GET request to the specified URL and returns the parsed JSON response.
// If the request fails or the response is not successful, it returns an error.
async fn get_data(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, NodeApiError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| NodeApiError::RequestFailed(e.to_string()))?
        .check_success()
        .await
        .map_err(NodeApiError::NotSuccessResponse)?;
    parse_json(response).await
}

async fn parse_json(response: reqwest::Response) -> Result<serde_json::Value, NodeApiError> {
    response
        .json()
        .await
        .map_err(|e| NodeApiError::CannotParseResponse(e.to_string()))
}
