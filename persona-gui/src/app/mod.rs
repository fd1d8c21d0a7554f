pub mod account;
pub mod alert;
pub mod cache;
pub mod config;
pub mod identities;
pub mod menu;
pub mod message;
pub mod state;
pub mod view;

mod error;

pub use error::Error;

use std::time::Duration;

use bitcoin::Amount;
use iced::{time, Subscription, Task};
use tracing::error;

pub use config::Config;
pub use message::Message;

use self::{
    account::Account,
    cache::Cache,
    menu::Menu,
    state::{DepositPanel, EditProfilePanel, RegisterPanel, State},
};
use crate::services::Services;

/// How often the funding wallet balance is refreshed.
pub const BALANCE_REFRESH_INTERVAL_SECS: u64 = 60;

struct Panels {
    current: Menu,
    register: RegisterPanel,
    profile: EditProfilePanel,
    deposit: DepositPanel,
}

impl Panels {
    fn new() -> Panels {
        Self {
            current: Menu::Register,
            register: RegisterPanel::new(),
            profile: EditProfilePanel::new(0),
            deposit: DepositPanel::new(),
        }
    }

    fn current(&self) -> &dyn State {
        match self.current {
            Menu::Register => &self.register,
            Menu::EditProfile(_) => &self.profile,
            Menu::Deposit => &self.deposit,
        }
    }

    fn current_mut(&mut self) -> &mut dyn State {
        match self.current {
            Menu::Register => &mut self.register,
            Menu::EditProfile(_) => &mut self.profile,
            Menu::Deposit => &mut self.deposit,
        }
    }
}

/// The application shell: owns the cache, routes messages to the current
/// panel and keeps the shared state fresh.
pub struct App {
    cache: Cache,
    services: Services,
    panels: Panels,
}

impl App {
    pub fn new(services: Services, account: Account) -> (App, Task<Message>) {
        let cache = Cache {
            identities: services.identities.list(),
            account,
            wallet_balance: Amount::ZERO,
        };
        let mut app = Self {
            cache,
            services,
            panels: Panels::new(),
        };
        let task = Task::batch(vec![
            app.refresh_balance(),
            app.panels
                .register
                .reload(app.services.clone(), &app.cache),
        ]);
        (app, task)
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn current_menu(&self) -> &Menu {
        &self.panels.current
    }

    pub fn current_panel(&self) -> &dyn State {
        self.panels.current()
    }

    pub fn register_panel(&self) -> &RegisterPanel {
        &self.panels.register
    }

    pub fn profile_panel(&self) -> &EditProfilePanel {
        &self.panels.profile
    }

    pub fn deposit_panel(&self) -> &DepositPanel {
        &self.panels.deposit
    }

    fn refresh_balance(&self) -> Task<Message> {
        let address = match &self.cache.account.wallet_address {
            Some(address) => address.clone(),
            None => return Task::none(),
        };
        let node = self.services.node.clone();
        Task::perform(
            async move { node.wallet_balance(&address).await.map_err(Error::from) },
            Message::WalletBalance,
        )
    }

    fn set_current_panel(&mut self, menu: Menu) -> Task<Message> {
        self.panels.current_mut().interrupt();

        let mut commands = Vec::new();
        // The profile editor saves and uploads its working copy on leave.
        if matches!(self.panels.current, Menu::EditProfile(_)) {
            commands.push(self.panels.profile.flush(&self.services));
        }
        if let Menu::EditProfile(index) = menu {
            self.panels.profile = EditProfilePanel::new(index);
        }
        // Screens displaying the balance get a fresh value on entry.
        if matches!(menu, Menu::Register) || matches!(menu, Menu::Deposit) {
            commands.push(self.refresh_balance());
        }
        self.panels.current = menu;
        commands.push(
            self.panels
                .current_mut()
                .reload(self.services.clone(), &self.cache),
        );
        Task::batch(commands)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch(vec![
            time::every(Duration::from_secs(BALANCE_REFRESH_INTERVAL_SECS))
                .map(|_| Message::Tick),
            self.panels.current().subscription(),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.refresh_balance(),
            Message::WalletBalance(res) => {
                match &res {
                    Ok(balance) => self.cache.wallet_balance = *balance,
                    Err(e) => error!("failed to refresh wallet balance: {}", e),
                }
                self.panels.current_mut().update(
                    self.services.clone(),
                    &self.cache,
                    Message::WalletBalance(res),
                )
            }
            Message::IdentitySaved(res) => {
                match &res {
                    Ok(identities) => self.cache.identities = identities.clone(),
                    Err(e) => error!("failed to persist identities: {}", e),
                }
                self.panels.current_mut().update(
                    self.services.clone(),
                    &self.cache,
                    Message::IdentitySaved(res),
                )
            }
            Message::View(view::Message::Menu(menu)) => self.set_current_panel(menu),
            Message::View(view::Message::Reload) => self
                .panels
                .current_mut()
                .reload(self.services.clone(), &self.cache),
            _ => self
                .panels
                .current_mut()
                .update(self.services.clone(), &self.cache, message),
        }
    }
}
