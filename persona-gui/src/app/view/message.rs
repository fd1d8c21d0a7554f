use crate::{app::menu::Menu, names::NameType};

#[derive(Debug, Clone)]
pub enum Message {
    Reload,
    Menu(Menu),
    Register(RegisterMessage),
    Profile(ProfileMessage),
}

#[derive(Debug, Clone)]
pub enum RegisterMessage {
    /// The raw content of the name input field changed.
    NameEdited(String),
    NameTypeSelected(NameType),
    Register,
}

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    TabSelected(Tab),
    FieldEdited(&'static str, String),
    Save,
}

/// Tabs of the profile editing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    BasicInfo,
    Photos,
    SocialAccounts,
    PublicKeys,
    PrivateInfo,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::BasicInfo,
        Tab::Photos,
        Tab::SocialAccounts,
        Tab::PublicKeys,
        Tab::PrivateInfo,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Photos => "Photos",
            Self::SocialAccounts => "Social Accounts",
            Self::PublicKeys => "Public Keys",
            Self::PrivateInfo => "Private Info",
        }
    }
}
