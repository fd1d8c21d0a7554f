use bitcoin::Amount;

use crate::{
    app::{error::Error, identities::LocalIdentity, view},
    names::FullyQualifiedName,
    services::node::api::RegistrationReceipt,
};

#[derive(Debug)]
pub enum Message {
    Tick,
    View(view::Message),
    WalletBalance(Result<Amount, Error>),
    /// The debounce delay after the last keystroke elapsed for this name.
    NameCheckDelayElapsed(FullyQualifiedName),
    NameAvailability(FullyQualifiedName, Result<bool, Error>),
    NamePrice(FullyQualifiedName, Result<Amount, Error>),
    /// The profile document of a name under registration was uploaded.
    RegistrationProfileUploaded(FullyQualifiedName, Result<String, Error>),
    RegistrationSubmitted(FullyQualifiedName, Result<RegistrationReceipt, Error>),
    /// The identity store was rewritten; carries the updated list.
    IdentitySaved(Result<Vec<LocalIdentity>, Error>),
    /// The profile editor finished uploading the edited profile.
    ProfileUploaded(Result<String, Error>),
}
