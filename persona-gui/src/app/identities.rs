//! Local identity records and their on-disk store.
//!
//! The store is the list of names the user owns or has preordered, with the
//! profile attached to each. It backs the duplicate-preorder guard of the
//! registration screen and the profile editor.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::names::FullyQualifiedName;

pub const DEFAULT_FILE_NAME: &str = "identities.json";

/// An identity profile. Only the basic-info fields are typed; anything else
/// present in the stored document is preserved on rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A name owned locally, either preordered or fully registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalIdentity {
    pub domain_name: FullyQualifiedName,
    pub owner_address: String,
    /// False while the preorder has not completed on the registrar side.
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    identities: Vec<LocalIdentity>,
}

/// On-disk store for the local identity list.
#[derive(Debug)]
pub struct IdentityStore {
    path: PathBuf,
    identities: Mutex<Vec<LocalIdentity>>,
}

impl IdentityStore {
    /// Load the store, starting empty if the file does not exist yet.
    pub fn from_file(path: PathBuf) -> Result<Self, IdentityStoreError> {
        let identities = match std::fs::read(&path) {
            Ok(content) => {
                serde_json::from_slice::<StoreFile>(&content)
                    .map_err(|e| {
                        IdentityStoreError::ReadingFile(format!("Parsing identities file: {}", e))
                    })?
                    .identities
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(IdentityStoreError::ReadingFile(format!(
                    "Reading identities file: {}",
                    e
                )))
            }
        };
        Ok(Self {
            path,
            identities: Mutex::new(identities),
        })
    }

    pub fn list(&self) -> Vec<LocalIdentity> {
        self.identities.lock().expect("poisoned").clone()
    }

    pub fn contains(&self, name: &FullyQualifiedName) -> bool {
        self.identities
            .lock()
            .expect("poisoned")
            .iter()
            .any(|identity| &identity.domain_name == name)
    }

    /// Append a new identity and persist. Returns the updated list.
    pub fn insert(
        &self,
        identity: LocalIdentity,
    ) -> Result<Vec<LocalIdentity>, IdentityStoreError> {
        let mut identities = self.identities.lock().expect("poisoned");
        identities.push(identity);
        self.persist(&identities)?;
        Ok(identities.clone())
    }

    /// Replace the profile of the identity at `index` and persist. Returns
    /// the updated list.
    pub fn update_profile(
        &self,
        index: usize,
        profile: Profile,
    ) -> Result<Vec<LocalIdentity>, IdentityStoreError> {
        let mut identities = self.identities.lock().expect("poisoned");
        match identities.get_mut(index) {
            Some(identity) => identity.profile = profile,
            None => return Err(IdentityStoreError::UnknownIndex(index)),
        }
        self.persist(&identities)?;
        Ok(identities.clone())
    }

    fn persist(&self, identities: &[LocalIdentity]) -> Result<(), IdentityStoreError> {
        let content = serde_json::to_string_pretty(&StoreFile {
            identities: identities.to_vec(),
        })
        .map_err(|e| {
            IdentityStoreError::WritingFile(format!("Failed to serialize identities: {}", e))
        })?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| IdentityStoreError::WritingFile(e.to_string()))?;

        file.write_all(content.as_bytes()).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            IdentityStoreError::WritingFile(e.to_string())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStoreError {
    UnknownIndex(usize),
    ReadingFile(String),
    WritingFile(String),
}

impl std::fmt::Display for IdentityStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnknownIndex(index) => write!(f, "No identity at index {}", index),
            Self::ReadingFile(e) => write!(f, "Error while reading file: {}", e),
            Self::WritingFile(e) => write!(f, "Error while writing file: {}", e),
        }
    }
}
