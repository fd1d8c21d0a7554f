use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bitcoin::Amount;
use uuid::Uuid;

use crate::{
    app::{
        account::IdentityKeypair,
        identities::{IdentityStore, Profile},
    },
    names::FullyQualifiedName,
    services::{
        analytics::AnalyticsApi,
        node::api::{NameApi, NodeApiError, RegistrarApi, RegistrationReceipt, WalletApi},
        storage::{ProfileStorage, StorageError},
        Services,
    },
};

/// Scripted registrar node. Every call consumes the next scripted response
/// for its method, in order, and records the call for later assertions. An
/// unscripted call is a test failure.
pub struct Node {
    availability: Mutex<VecDeque<(FullyQualifiedName, Result<bool, NodeApiError>)>>,
    prices: Mutex<VecDeque<(FullyQualifiedName, Result<Amount, NodeApiError>)>>,
    registrations: Mutex<VecDeque<Result<RegistrationReceipt, NodeApiError>>>,
    balances: Mutex<VecDeque<Result<Amount, NodeApiError>>>,
    availability_calls: Mutex<Vec<FullyQualifiedName>>,
    register_calls: Mutex<Vec<FullyQualifiedName>>,
}

impl Node {
    pub fn new() -> Self {
        Self {
            availability: Mutex::new(VecDeque::new()),
            prices: Mutex::new(VecDeque::new()),
            registrations: Mutex::new(VecDeque::new()),
            balances: Mutex::new(VecDeque::new()),
            availability_calls: Mutex::new(Vec::new()),
            register_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_availability(self, name: &str, res: Result<bool, NodeApiError>) -> Self {
        self.availability
            .lock()
            .unwrap()
            .push_back((FullyQualifiedName::from(name), res));
        self
    }

    pub fn with_price(self, name: &str, res: Result<Amount, NodeApiError>) -> Self {
        self.prices
            .lock()
            .unwrap()
            .push_back((FullyQualifiedName::from(name), res));
        self
    }

    pub fn with_registration(self, res: Result<RegistrationReceipt, NodeApiError>) -> Self {
        self.registrations.lock().unwrap().push_back(res);
        self
    }

    pub fn with_balance(self, res: Result<Amount, NodeApiError>) -> Self {
        self.balances.lock().unwrap().push_back(res);
        self
    }

    pub fn availability_calls(&self) -> Vec<FullyQualifiedName> {
        self.availability_calls.lock().unwrap().clone()
    }

    pub fn register_calls(&self) -> Vec<FullyQualifiedName> {
        self.register_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameApi for Node {
    async fn name_availability(&self, name: &FullyQualifiedName) -> Result<bool, NodeApiError> {
        self.availability_calls.lock().unwrap().push(name.clone());
        let (expected, res) = self
            .availability
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock node must have all availability checks scripted in the right order");
        assert_eq!(&expected, name, "availability check for an unexpected name");
        res
    }

    async fn name_price(&self, name: &FullyQualifiedName) -> Result<Amount, NodeApiError> {
        let (expected, res) = self
            .prices
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock node must have all price checks scripted in the right order");
        assert_eq!(&expected, name, "price check for an unexpected name");
        res
    }
}

#[async_trait]
impl RegistrarApi for Node {
    async fn register_name(
        &self,
        name: &FullyQualifiedName,
        _owner: &str,
        _keypair: &IdentityKeypair,
    ) -> Result<RegistrationReceipt, NodeApiError> {
        self.register_calls.lock().unwrap().push(name.clone());
        self.registrations
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock node must have all registrations scripted in the right order")
    }
}

#[async_trait]
impl WalletApi for Node {
    async fn wallet_balance(&self, _address: &str) -> Result<Amount, NodeApiError> {
        self.balances
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock node must have all balance refreshes scripted in the right order")
    }
}

/// Scripted profile storage gateway.
pub struct Storage {
    responses: Mutex<VecDeque<Result<String, StorageError>>>,
    uploads: Mutex<Vec<(FullyQualifiedName, Profile)>>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_upload(self, res: Result<String, StorageError>) -> Self {
        self.responses.lock().unwrap().push_back(res);
        self
    }

    pub fn uploads(&self) -> Vec<(FullyQualifiedName, Profile)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStorage for Storage {
    async fn upload_profile(
        &self,
        name: &FullyQualifiedName,
        profile: &Profile,
    ) -> Result<String, StorageError> {
        self.uploads
            .lock()
            .unwrap()
            .push((name.clone(), profile.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock storage must have all uploads scripted in the right order")
    }
}

/// Records tracked events.
pub struct Analytics {
    events: Mutex<Vec<(String, Uuid)>>,
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(event, _)| event.clone())
            .collect()
    }
}

#[async_trait]
impl AnalyticsApi for Analytics {
    async fn track(&self, event: &str, distinct_id: &Uuid) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), *distinct_id));
    }
}

/// Services bundle around a scripted node, with quiet storage/analytics and
/// a fresh identity store.
pub fn services(node: Arc<Node>) -> Services {
    services_with(node, Arc::new(Storage::new()), Arc::new(Analytics::new()))
}

pub fn services_with(
    node: Arc<Node>,
    storage: Arc<Storage>,
    analytics: Arc<Analytics>,
) -> Services {
    Services {
        node,
        storage,
        analytics,
        identities: Arc::new(identity_store()),
    }
}

/// A fresh identity store backed by a unique temporary file.
pub fn identity_store() -> IdentityStore {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "persona-test-identities-{}.json",
        crate::utils::now().as_nanos()
    ));
    IdentityStore::from_file(path).expect("a fresh store cannot fail to load")
}
