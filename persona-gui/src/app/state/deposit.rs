use bitcoin::Amount;
use iced::Task;
use tracing::error;

use crate::{
    app::{cache::Cache, message::Message, state::State},
    services::Services,
};

/// The wallet deposit screen the zero-balance and shortfall alerts link to:
/// the funding address to send coins to, with the latest known balance.
pub struct DepositPanel {
    address: Option<String>,
    balance: Amount,
}

impl DepositPanel {
    pub fn new() -> Self {
        Self {
            address: None,
            balance: Amount::ZERO,
        }
    }

    pub fn address(&self) -> Option<&String> {
        self.address.as_ref()
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }
}

impl State for DepositPanel {
    fn update(&mut self, _services: Services, cache: &Cache, message: Message) -> Task<Message> {
        if let Message::WalletBalance(res) = message {
            match res {
                Ok(_) => self.balance = cache.wallet_balance,
                Err(e) => error!("failed to refresh wallet balance: {}", e),
            }
        }
        Task::none()
    }

    fn reload(&mut self, _services: Services, cache: &Cache) -> Task<Message> {
        self.address = cache.account.wallet_address.clone();
        self.balance = cache.wallet_balance;
        Task::none()
    }
}

impl From<DepositPanel> for Box<dyn State> {
    fn from(s: DepositPanel) -> Box<dyn State> {
        Box::new(s)
    }
}
