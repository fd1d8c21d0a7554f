use std::collections::HashMap;
use std::time::Duration;

use bitcoin::Amount;
use iced::{task::Handle, Task};
use tracing::{error, info};

use crate::{
    app::{
        alert::Alert,
        cache::Cache,
        error::Error,
        identities::{LocalIdentity, Profile},
        menu::Menu,
        message::Message,
        state::State,
        view,
    },
    names::{self, FullyQualifiedName, NameType},
    services::{analytics, Services},
};

/// Delay between the last keystroke and the availability check, so that a
/// burst of typing results in a single check.
pub const NAME_CHECK_DELAY: Duration = Duration::from_millis(500);

/// Progress of an availability & price lookup for one fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct NameCheckEntry {
    pub checking_availability: bool,
    pub available: Option<bool>,
    pub checking_price: bool,
    pub price: Option<Amount>,
    pub error: Option<String>,
}

/// Progress of a registration submission.
#[derive(Debug, Clone, Default)]
pub struct RegistrationStatus {
    pub profile_uploading: bool,
    pub registration_submitting: bool,
    pub registration_submitted: bool,
    pub error: Option<String>,
    /// Submission is disabled while the hosting screen is loading.
    pub prevent_registration: bool,
}

impl RegistrationStatus {
    fn is_reportable(&self) -> bool {
        self.profile_uploading
            || self.registration_submitting
            || self.registration_submitted
            || self.error.is_some()
    }
}

/// The registration screen: converts raw user input and asynchronous status
/// feeds into a single coherent alert and a gated registration submission.
pub struct RegisterPanel {
    name: String,
    name_type: NameType,
    /// Lookup records, keyed by the fully-qualified name they were requested
    /// for. Only the record of the currently entered name is ever displayed.
    checks: HashMap<FullyQualifiedName, NameCheckEntry>,
    /// Last name an availability check was requested for.
    last_requested: Option<FullyQualifiedName>,
    status: RegistrationStatus,
    /// Held from submission until its terminal outcome. A click landing
    /// while it is held is dropped.
    registration_lock: bool,
    /// The pending debounce timer. At most one is live: arming a new one
    /// aborts the previous.
    pending_check: Option<Handle>,
    zero_balance: bool,
    alert: Option<Alert>,
}

impl RegisterPanel {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            name_type: NameType::Person,
            checks: HashMap::new(),
            last_requested: None,
            // Submission stays disabled until the first balance snapshot
            // ends the screen's loading phase.
            status: RegistrationStatus {
                prevent_registration: true,
                ..Default::default()
            },
            registration_lock: false,
            pending_check: None,
            zero_balance: false,
            alert: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_type(&self) -> NameType {
        self.name_type
    }

    /// The name input is frozen while the wallet cannot pay for anything.
    pub fn input_disabled(&self) -> bool {
        self.zero_balance
    }

    pub fn register_disabled(&self) -> bool {
        self.zero_balance || self.status.prevent_registration
    }

    fn fully_qualified_name(&self) -> FullyQualifiedName {
        FullyQualifiedName::new(&self.name, self.name_type)
    }

    /// Re-derive the displayed alert from the current external state. Runs on
    /// every update the panel observes.
    fn refresh_alert(&mut self, cache: &Cache) {
        self.zero_balance = cache.wallet_balance == Amount::ZERO;
        let current = self.fully_qualified_name();
        // Only the record matching the currently entered name is consulted:
        // results for a previously entered, superseded name must not surface.
        let entry = self
            .last_requested
            .as_ref()
            .filter(|requested| **requested == current)
            .and_then(|requested| self.checks.get(requested));
        self.alert = derived_alert(
            cache.wallet_balance,
            cache.account.wallet_address.as_deref(),
            &self.status,
            &current,
            entry,
        );
    }

    fn on_name_edited(&mut self, raw: &str) -> Task<Message> {
        self.name = names::normalize(raw);
        // Cancel-and-replace: a superseding keystroke discards the prior
        // pending check entirely.
        if let Some(handle) = self.pending_check.take() {
            handle.abort();
        }
        if self.name.is_empty() {
            self.alert = None;
            return Task::none();
        }
        let name = self.fully_qualified_name();
        let (task, handle) = Task::perform(
            async move {
                tokio::time::sleep(NAME_CHECK_DELAY).await;
                name
            },
            Message::NameCheckDelayElapsed,
        )
        .abortable();
        self.pending_check = Some(handle);
        task
    }

    fn on_check_delay_elapsed(
        &mut self,
        services: Services,
        cache: &Cache,
        name: FullyQualifiedName,
    ) -> Task<Message> {
        // The timer may still fire while a newer keystroke's abort is racing
        // it: a name that no longer matches the input is dropped, and the
        // live timer keeps its handle slot.
        if name != self.fully_qualified_name() {
            return Task::none();
        }
        self.pending_check = None;
        if !name.is_valid() {
            self.alert = Some(Alert::danger(format!("{} is not a valid name", name)));
            return Task::none();
        }
        self.last_requested = Some(name.clone());
        self.checks.insert(
            name.clone(),
            NameCheckEntry {
                checking_availability: true,
                ..Default::default()
            },
        );
        self.refresh_alert(cache);
        let node = services.node.clone();
        Task::perform(
            async move {
                let res = node.name_availability(&name).await.map_err(Error::from);
                (name, res)
            },
            |(name, res)| Message::NameAvailability(name, res),
        )
    }

    fn on_register(&mut self, services: Services, cache: &Cache) -> Task<Message> {
        if self.registration_lock {
            return Task::none();
        }
        self.registration_lock = true;

        if self.name.is_empty() {
            self.alert = Some(Alert::danger("Name must have at least one character"));
            self.registration_lock = false;
            return Task::none();
        }

        let name = self.fully_qualified_name();
        // Local duplicate check, distinct from the remote availability one.
        if cache
            .identities
            .iter()
            .any(|identity| identity.domain_name == name)
        {
            self.alert = Some(Alert::danger("Name has already been preordered"));
            self.registration_lock = false;
            return Task::none();
        }

        if cache.account.registration_credentials().is_none() {
            self.alert = Some(Alert::danger(
                "No identity address is available to own the name",
            ));
            self.registration_lock = false;
            return Task::none();
        }

        // The lock stays held until a terminal outcome; the optimistic alert
        // is replaced by status alerts as the submission progresses. Any
        // status left over from a failed attempt is dropped.
        self.status = RegistrationStatus {
            prevent_registration: self.status.prevent_registration,
            ..Default::default()
        };
        self.status.profile_uploading = true;
        self.alert = Some(Alert::success(
            "Name preordered! Waiting for registration confirmation.",
        ));

        let analytics_api = services.analytics.clone();
        let distinct_id = cache.account.analytics_id;
        let storage = services.storage.clone();
        let profile = Profile::default();
        Task::batch(vec![
            Task::future(async move {
                analytics_api
                    .track(analytics::REGISTER_IDENTITY, &distinct_id)
                    .await;
                analytics_api
                    .track(analytics::PERFORM_ACTION, &distinct_id)
                    .await;
            })
            .discard(),
            Task::perform(
                async move {
                    let res = storage
                        .upload_profile(&name, &profile)
                        .await
                        .map_err(Error::from);
                    (name, res)
                },
                |(name, res)| Message::RegistrationProfileUploaded(name, res),
            ),
        ])
    }

    fn on_registration_profile_uploaded(
        &mut self,
        services: Services,
        cache: &Cache,
        name: FullyQualifiedName,
        res: Result<String, Error>,
    ) -> Task<Message> {
        self.status.profile_uploading = false;
        match res {
            Ok(url) => {
                info!("profile for {} uploaded to {}", name, url);
                let (owner, keypair) = match cache.account.registration_credentials() {
                    Some((owner, keypair)) => (owner.clone(), keypair.clone()),
                    None => {
                        self.status.error =
                            Some("No identity address is available to own the name".to_string());
                        self.registration_lock = false;
                        self.refresh_alert(cache);
                        return Task::none();
                    }
                };
                self.status.registration_submitting = true;
                self.refresh_alert(cache);
                let node = services.node.clone();
                Task::perform(
                    async move {
                        let res = node
                            .register_name(&name, &owner, &keypair)
                            .await
                            .map_err(Error::from);
                        (name, res)
                    },
                    |(name, res)| Message::RegistrationSubmitted(name, res),
                )
            }
            Err(e) => {
                self.status.error = Some(e.to_string());
                self.registration_lock = false;
                self.refresh_alert(cache);
                Task::none()
            }
        }
    }

    fn on_registration_submitted(
        &mut self,
        services: Services,
        cache: &Cache,
        name: FullyQualifiedName,
        res: Result<crate::services::node::api::RegistrationReceipt, Error>,
    ) -> Task<Message> {
        self.status.registration_submitting = false;
        self.registration_lock = false;
        match res {
            Ok(receipt) => {
                self.status.registration_submitted = true;
                if let Some(txid) = receipt.transaction_id {
                    info!("registration of {} submitted in {}", name, txid);
                }
                self.refresh_alert(cache);
                // Record the preorder locally so that further attempts hit
                // the duplicate guard.
                let identities = services.identities.clone();
                let owner = cache
                    .account
                    .identity_addresses
                    .first()
                    .cloned()
                    .unwrap_or_default();
                Task::perform(
                    async move {
                        identities
                            .insert(LocalIdentity {
                                domain_name: name,
                                owner_address: owner,
                                registered: false,
                                profile: Profile::default(),
                            })
                            .map_err(Error::from)
                    },
                    Message::IdentitySaved,
                )
            }
            Err(e) => {
                self.status.error = Some(e.to_string());
                self.refresh_alert(cache);
                Task::none()
            }
        }
    }
}

impl State for RegisterPanel {
    fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    fn update(&mut self, services: Services, cache: &Cache, message: Message) -> Task<Message> {
        match message {
            Message::View(view::Message::Register(msg)) => match msg {
                view::RegisterMessage::NameEdited(raw) => self.on_name_edited(&raw),
                view::RegisterMessage::NameTypeSelected(kind) => {
                    self.name_type = kind;
                    // The fully-qualified name changed: same discipline as a
                    // keystroke.
                    let name = self.name.clone();
                    self.on_name_edited(&name)
                }
                view::RegisterMessage::Register => self.on_register(services, cache),
            },
            Message::NameCheckDelayElapsed(name) => {
                self.on_check_delay_elapsed(services, cache, name)
            }
            Message::NameAvailability(name, res) => {
                let mut follow_up = Task::none();
                match res {
                    Ok(available) => {
                        if let Some(entry) = self.checks.get_mut(&name) {
                            entry.checking_availability = false;
                            entry.available = Some(available);
                            entry.checking_price = available;
                        }
                        if available {
                            let node = services.node.clone();
                            follow_up = Task::perform(
                                async move {
                                    let res = node.name_price(&name).await.map_err(Error::from);
                                    (name, res)
                                },
                                |(name, res)| Message::NamePrice(name, res),
                            );
                        }
                    }
                    Err(e) => {
                        if let Some(entry) = self.checks.get_mut(&name) {
                            entry.checking_availability = false;
                            entry.error = Some(e.to_string());
                        }
                    }
                }
                self.refresh_alert(cache);
                follow_up
            }
            Message::NamePrice(name, res) => {
                if let Some(entry) = self.checks.get_mut(&name) {
                    entry.checking_price = false;
                    match res {
                        Ok(price) => entry.price = Some(price),
                        Err(e) => entry.error = Some(e.to_string()),
                    }
                }
                self.refresh_alert(cache);
                Task::none()
            }
            Message::RegistrationProfileUploaded(name, res) => {
                self.on_registration_profile_uploaded(services, cache, name, res)
            }
            Message::RegistrationSubmitted(name, res) => {
                self.on_registration_submitted(services, cache, name, res)
            }
            Message::WalletBalance(res) => {
                if let Err(e) = res {
                    error!("failed to refresh wallet balance: {}", e);
                }
                self.status.prevent_registration = false;
                self.refresh_alert(cache);
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn interrupt(&mut self) {
        if let Some(handle) = self.pending_check.take() {
            handle.abort();
        }
    }

    fn reload(&mut self, _services: Services, cache: &Cache) -> Task<Message> {
        *self = Self::new();
        self.refresh_alert(cache);
        Task::none()
    }
}

impl From<RegisterPanel> for Box<dyn State> {
    fn from(s: RegisterPanel) -> Box<dyn State> {
        Box::new(s)
    }
}

/// The single alert derived from the wallet balance, the registration status
/// and the lookup record of the currently entered name, in strict priority
/// order.
fn derived_alert(
    balance: Amount,
    wallet_address: Option<&str>,
    status: &RegistrationStatus,
    current_name: &FullyQualifiedName,
    entry: Option<&NameCheckEntry>,
) -> Option<Alert> {
    if balance == Amount::ZERO {
        return Some(zero_balance_alert(wallet_address));
    }
    if status.is_reportable() {
        return Some(registration_alert(status));
    }
    entry.and_then(|entry| name_check_alert(current_name, entry, balance))
}

fn zero_balance_alert(wallet_address: Option<&str>) -> Alert {
    let message = match wallet_address {
        Some(address) => format!(
            "You need to deposit at least 0.01 bitcoins before you can register a name. \
             Go to your wallet or send bitcoins directly to {}",
            address
        ),
        None => {
            "You need to deposit at least 0.01 bitcoins before you can register a name."
                .to_string()
        }
    };
    Alert::danger(message).with_link(Menu::Deposit)
}

fn registration_alert(status: &RegistrationStatus) -> Alert {
    if let Some(e) = &status.error {
        Alert::danger(format!(
            "There was a problem submitting your registration: {}",
            e
        ))
    } else if status.profile_uploading {
        Alert::info("Uploading your profile...")
    } else if status.registration_submitting {
        Alert::info("Submitting your registration to the registrar node...")
    } else {
        Alert::success(
            "Congrats! Your name is preordered! \
             Registration will automatically complete over the next few hours.",
        )
    }
}

fn name_check_alert(
    name: &FullyQualifiedName,
    entry: &NameCheckEntry,
    balance: Amount,
) -> Option<Alert> {
    if let Some(e) = &entry.error {
        error!("checking price & availability of {} failed: {}", name, e);
        return Some(Alert::danger(format!(
            "There was a problem checking on price & availability of {}",
            name
        )));
    }
    if entry.checking_availability {
        return Some(Alert::info(format!("Checking if {} is available...", name)));
    }
    match entry.available {
        Some(false) => Some(Alert::danger(format!(
            "{} has already been registered.",
            name
        ))),
        Some(true) => {
            if entry.checking_price {
                return Some(Alert::info(format!(
                    "{} is available! Checking price...",
                    name
                )));
            }
            let price = entry.price?;
            if price < balance {
                Some(Alert::info(format!(
                    "{} costs ~{} btc to register.",
                    name,
                    price.to_btc()
                )))
            } else {
                let shortfall = price - balance;
                Some(
                    Alert::danger(format!(
                        "Your wallet doesn't have enough money to buy {}. \
                         Please send at least {} more bitcoin to your wallet.",
                        name,
                        shortfall.to_btc()
                    ))
                    .with_link(Menu::Deposit),
                )
            }
        }
        None => None,
    }
}
