mod deposit;
mod profile;
mod register;

use iced::{Subscription, Task};

use super::{alert::Alert, cache::Cache, message::Message};
use crate::services::Services;

pub use deposit::DepositPanel;
pub use profile::EditProfilePanel;
pub use register::RegisterPanel;

/// A screen controller. The hosting view renders from the panel's accessors
/// and feeds user events back as [`Message`]s.
pub trait State {
    /// The alert currently displayed by the hosting view, if any.
    fn alert(&self) -> Option<&Alert> {
        None
    }
    fn update(
        &mut self,
        _services: Services,
        _cache: &Cache,
        _message: Message,
    ) -> Task<Message> {
        Task::none()
    }
    fn subscription(&self) -> Subscription<Message> {
        Subscription::none()
    }
    fn interrupt(&mut self) {}
    fn reload(&mut self, _services: Services, _cache: &Cache) -> Task<Message> {
        Task::none()
    }
}
