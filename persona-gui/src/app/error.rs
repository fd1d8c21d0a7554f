use std::convert::From;

use crate::{
    app::{config::ConfigError, identities::IdentityStoreError},
    services::{node::api::NodeApiError, storage::StorageError},
};

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Node(NodeApiError),
    Storage(StorageError),
    Identities(IdentityStoreError),
    Unexpected(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Node(e) => write!(f, "{}", e),
            Self::Storage(e) => write!(f, "{}", e),
            Self::Identities(e) => write!(f, "{}", e),
            Self::Unexpected(e) => write!(f, "Unexpected error: {}", e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl From<NodeApiError> for Error {
    fn from(error: NodeApiError) -> Self {
        Error::Node(error)
    }
}

impl From<StorageError> for Error {
    fn from(error: StorageError) -> Self {
        Error::Storage(error)
    }
}

impl From<IdentityStoreError> for Error {
    fn from(error: IdentityStoreError) -> Self {
        Error::Identities(error)
    }
}
