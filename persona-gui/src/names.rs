//! Naming rules of the identity namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of identity a name belongs to. It decides the namespace suffix the
/// name is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameType {
    Person,
    Organization,
}

impl NameType {
    pub const ALL: [NameType; 2] = [NameType::Person, NameType::Organization];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Person => "id",
            Self::Organization => "corp",
        }
    }

    /// Label of the name input field for this kind of identity.
    pub fn input_label(self) -> &'static str {
        match self {
            Self::Person => "Username",
            Self::Organization => "Domain",
        }
    }
}

/// Maximum length of a fully-qualified name, suffix included.
pub const MAX_NAME_LENGTH: usize = 37;

/// Strip raw input down to the allowed name character set, lower-cased.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().chars().filter(|c| is_name_char(*c)).collect()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// A name label joined with its namespace suffix, e.g. `alice.id`.
///
/// Construction does not validate: the candidate a user is typing is carried
/// around before it is known to be well-formed. [`FullyQualifiedName::is_valid`]
/// is the registrar's name-format rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullyQualifiedName(String);

impl FullyQualifiedName {
    pub fn new(label: &str, kind: NameType) -> Self {
        Self(format!("{}.{}", label, kind.suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the namespace suffix.
    pub fn label(&self) -> &str {
        self.0.split('.').next().unwrap_or("")
    }

    pub fn is_valid(&self) -> bool {
        if self.0.len() > MAX_NAME_LENGTH {
            return false;
        }
        let mut parts = self.0.splitn(2, '.');
        let label = match parts.next() {
            Some(l) => l,
            None => return false,
        };
        let suffix = match parts.next() {
            Some(s) => s,
            None => return false,
        };
        !label.is_empty()
            && label.chars().all(is_name_char)
            && NameType::ALL.iter().any(|kind| kind.suffix() == suffix)
    }
}

impl fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FullyQualifiedName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_only_name_characters() {
        assert_eq!(normalize("Alice Smith!"), "alicesmith");
        assert_eq!(normalize("ALICE"), "alice");
        assert_eq!(normalize("al-ice.99"), "alice99");
        assert_eq!(normalize("under_score"), "under_score");
        assert_eq!(normalize("émile"), "mile");
        assert_eq!(normalize("  "), "");
    }

    #[test]
    fn name_validity() {
        assert!(FullyQualifiedName::from("alice.id").is_valid());
        assert!(FullyQualifiedName::from("alice_1.corp").is_valid());
        assert!(FullyQualifiedName::new("bob99", NameType::Person).is_valid());

        // empty label
        assert!(!FullyQualifiedName::from(".id").is_valid());
        // no suffix
        assert!(!FullyQualifiedName::from("alice").is_valid());
        // unknown suffix
        assert!(!FullyQualifiedName::from("alice.xyz").is_valid());
        // forbidden characters
        assert!(!FullyQualifiedName::from("al ice.id").is_valid());
        assert!(!FullyQualifiedName::from("Alice.id").is_valid());
        // too long
        let long = "a".repeat(MAX_NAME_LENGTH);
        assert!(!FullyQualifiedName::new(&long, NameType::Person).is_valid());
    }

    #[test]
    fn label_of_fully_qualified_name() {
        assert_eq!(FullyQualifiedName::from("alice.id").label(), "alice");
        assert_eq!(FullyQualifiedName::new("acme", NameType::Organization).as_str(), "acme.corp");
    }
}
