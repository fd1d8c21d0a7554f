use crate::app::menu::Menu;

/// Severity of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Danger,
}

/// A single user-facing alert. Panels display at most one at a time: a newly
/// derived alert replaces the previous one, never accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    /// In-app destination offered alongside the message.
    pub link: Option<Menu>,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
            link: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            link: None,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, menu: Menu) -> Self {
        self.link = Some(menu);
        self
    }
}
