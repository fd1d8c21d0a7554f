use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of the account data the registration and profile screens read.
///
/// Key derivation and custody are the wallet's concern: the screens only
/// consume the derived addresses and keypairs in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    /// Identifier attached to analytics events.
    pub analytics_id: Uuid,
    /// Addresses available to own registered identities, in derivation order.
    pub identity_addresses: Vec<String>,
    pub identity_keypairs: Vec<IdentityKeypair>,
    /// Funding address of the spendable wallet, once known.
    pub wallet_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityKeypair {
    pub address: String,
    pub public_key: String,
    pub key: String,
}

impl Account {
    /// The address and keypair a new registration is submitted with: the
    /// first available of each.
    pub fn registration_credentials(&self) -> Option<(&String, &IdentityKeypair)> {
        self.identity_addresses.first().zip(self.identity_keypairs.first())
    }
}
