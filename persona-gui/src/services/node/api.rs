use async_trait::async_trait;
use bitcoin::Amount;

use crate::{
    app::account::IdentityKeypair, names::FullyQualifiedName,
    services::http::NotSuccessResponseInfo,
};

/// Acknowledgement of a registration submission. The registration itself
/// completes asynchronously on the registrar side.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone)]
pub enum NodeApiError {
    RequestFailed(String),
    NotSuccessResponse(NotSuccessResponseInfo),
    CannotParseResponse(String),
    CannotParseData(String),
}

impl std::fmt::Display for NodeApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "Request failed: {}", e),
            Self::NotSuccessResponse(info) => write!(f, "Not success response: {:?}", info),
            Self::CannotParseResponse(e) => write!(f, "Cannot parse response: {}", e),
            Self::CannotParseData(e) => write!(f, "Cannot parse data: {}", e),
        }
    }
}

/// Name lookups. Results describe the state of the namespace at the time of
/// the call; the caller is responsible for ignoring answers it no longer
/// cares about.
#[async_trait]
pub trait NameApi {
    /// Whether `name` can still be registered.
    async fn name_availability(&self, name: &FullyQualifiedName) -> Result<bool, NodeApiError>;

    /// Current registration price of `name`.
    async fn name_price(&self, name: &FullyQualifiedName) -> Result<Amount, NodeApiError>;
}

/// Registration submission.
#[async_trait]
pub trait RegistrarApi {
    /// Submit a registration for `name`, owned by `owner` and signed with
    /// `keypair`. A successful return only acknowledges the submission.
    async fn register_name(
        &self,
        name: &FullyQualifiedName,
        owner: &str,
        keypair: &IdentityKeypair,
    ) -> Result<RegistrationReceipt, NodeApiError>;
}

/// Wallet balance lookups.
#[async_trait]
pub trait WalletApi {
    /// Spendable balance of the funding `address`.
    async fn wallet_balance(&self, address: &str) -> Result<Amount, NodeApiError>;
}

/// The full registrar-node surface the panels consume.
pub trait NodeApi: NameApi + RegistrarApi + WalletApi {}

impl<T: NameApi + RegistrarApi + WalletApi> NodeApi for T {}
