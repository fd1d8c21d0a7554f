use bitcoin::Amount;

use crate::app::{account::Account, identities::LocalIdentity};

/// The shared state snapshot panels read. The application shell owns it and
/// refreshes it from the services; panels never mutate it directly.
#[derive(Debug, Clone)]
pub struct Cache {
    pub account: Account,
    /// The local identity list, mirrored from the on-disk store.
    pub identities: Vec<LocalIdentity>,
    /// Latest known spendable balance of the funding wallet.
    pub wallet_balance: Amount,
}

/// only used for tests.
impl std::default::Default for Cache {
    fn default() -> Self {
        Self {
            account: Account::default(),
            identities: Vec::new(),
            wallet_balance: Amount::ZERO,
        }
    }
}
