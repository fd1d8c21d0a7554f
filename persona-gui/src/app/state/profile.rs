use iced::Task;
use tracing::info;

use crate::{
    app::{
        cache::Cache,
        error::Error,
        identities::LocalIdentity,
        message::Message,
        state::State,
        view::{self, Tab},
    },
    services::Services,
};

/// The profile editing screen. It works on a local copy of the identity's
/// profile and writes it back to the store and to the public storage gateway
/// on save and on leave.
pub struct EditProfilePanel {
    /// Index of the identity under edit in the local identity list.
    index: usize,
    identity: Option<LocalIdentity>,
    tab: Tab,
    uploading: bool,
    warning: Option<Error>,
}

impl EditProfilePanel {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            identity: None,
            tab: Tab::BasicInfo,
            uploading: false,
            warning: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn identity(&self) -> Option<&LocalIdentity> {
        self.identity.as_ref()
    }

    pub fn uploading(&self) -> bool {
        self.uploading
    }

    pub fn warning(&self) -> Option<&Error> {
        self.warning.as_ref()
    }

    fn persist(&self, services: &Services) -> Task<Message> {
        let identity = match &self.identity {
            Some(identity) => identity.clone(),
            None => return Task::none(),
        };
        let store = services.identities.clone();
        let index = self.index;
        Task::perform(
            async move {
                store
                    .update_profile(index, identity.profile)
                    .map_err(Error::from)
            },
            Message::IdentitySaved,
        )
    }

    fn upload(&mut self, services: &Services) -> Task<Message> {
        let identity = match &self.identity {
            Some(identity) => identity.clone(),
            None => return Task::none(),
        };
        self.uploading = true;
        let storage = services.storage.clone();
        Task::perform(
            async move {
                storage
                    .upload_profile(&identity.domain_name, &identity.profile)
                    .await
                    .map_err(Error::from)
            },
            Message::ProfileUploaded,
        )
    }

    /// Persist and upload the working copy. The application shell calls this
    /// when the user navigates away from the screen.
    pub fn flush(&mut self, services: &Services) -> Task<Message> {
        if self.identity.is_none() {
            return Task::none();
        }
        Task::batch(vec![self.persist(services), self.upload(services)])
    }
}

impl State for EditProfilePanel {
    fn update(&mut self, services: Services, _cache: &Cache, message: Message) -> Task<Message> {
        match message {
            Message::View(view::Message::Profile(msg)) => match msg {
                view::ProfileMessage::TabSelected(tab) => {
                    self.tab = tab;
                    Task::none()
                }
                view::ProfileMessage::FieldEdited(field, value) => {
                    if let Some(identity) = &mut self.identity {
                        let value = if value.is_empty() { None } else { Some(value) };
                        match field {
                            "name" => identity.profile.name = value,
                            "description" => identity.profile.description = value,
                            "avatar_url" => identity.profile.avatar_url = value,
                            _ => {}
                        }
                    }
                    Task::none()
                }
                view::ProfileMessage::Save => {
                    let persist = self.persist(&services);
                    let upload = self.upload(&services);
                    Task::batch(vec![persist, upload])
                }
            },
            Message::IdentitySaved(res) => {
                if let Err(e) = res {
                    self.warning = Some(e);
                }
                Task::none()
            }
            Message::ProfileUploaded(res) => {
                self.uploading = false;
                match res {
                    Ok(url) => info!("profile uploaded to {}", url),
                    Err(e) => self.warning = Some(e),
                }
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn reload(&mut self, _services: Services, cache: &Cache) -> Task<Message> {
        self.identity = cache.identities.get(self.index).cloned();
        self.tab = Tab::BasicInfo;
        self.uploading = false;
        self.warning = match self.identity {
            Some(_) => None,
            None => Some(Error::Unexpected(format!(
                "no identity at index {}",
                self.index
            ))),
        };
        Task::none()
    }
}

impl From<EditProfilePanel> for Box<dyn State> {
    fn from(s: EditProfilePanel) -> Box<dyn State> {
        Box::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::identities::Profile,
        names::FullyQualifiedName,
        utils::{mock, sandbox::Sandbox},
    };
    use std::sync::Arc;

    fn cache_with_identity(name: &str) -> Cache {
        let mut cache = Cache::default();
        cache.identities.push(LocalIdentity {
            domain_name: FullyQualifiedName::from(name),
            owner_address: "1JjjFy32balcSNrXZ7qqXR3uhnKSQAGSGb".to_string(),
            registered: true,
            profile: Profile::default(),
        });
        cache
    }

    fn edited(field: &'static str, value: &str) -> Message {
        Message::View(view::Message::Profile(view::ProfileMessage::FieldEdited(
            field,
            value.to_string(),
        )))
    }

    #[tokio::test]
    async fn tabs_switch_without_touching_the_profile() {
        let services = mock::services(Arc::new(mock::Node::new()));
        let cache = cache_with_identity("alice.id");

        let sandbox = Sandbox::new(EditProfilePanel::new(0))
            .load(services.clone(), &cache)
            .await;
        assert_eq!(sandbox.state().tab(), Tab::BasicInfo);

        let sandbox = sandbox
            .update(
                services.clone(),
                &cache,
                Message::View(view::Message::Profile(view::ProfileMessage::TabSelected(
                    Tab::SocialAccounts,
                ))),
            )
            .await;
        assert_eq!(sandbox.state().tab(), Tab::SocialAccounts);
        assert_eq!(
            sandbox.state().identity().unwrap().profile,
            Profile::default()
        );
    }

    #[tokio::test]
    async fn save_persists_and_uploads_once() {
        let storage = Arc::new(mock::Storage::new().with_upload(Ok(
            "https://storage.test/alice.id.json".to_string(),
        )));
        let services = mock::services_with(
            Arc::new(mock::Node::new()),
            storage.clone(),
            Arc::new(mock::Analytics::new()),
        );
        // The store must hold the identity for the save to land somewhere.
        services
            .identities
            .insert(cache_with_identity("alice.id").identities[0].clone())
            .unwrap();
        let cache = cache_with_identity("alice.id");

        let sandbox = Sandbox::new(EditProfilePanel::new(0))
            .load(services.clone(), &cache)
            .await;
        let sandbox = sandbox
            .update(services.clone(), &cache, edited("name", "Alice"))
            .await;
        let sandbox = sandbox
            .update(services.clone(), &cache, edited("description", "dev"))
            .await;
        let sandbox = sandbox
            .update(
                services.clone(),
                &cache,
                Message::View(view::Message::Profile(view::ProfileMessage::Save)),
            )
            .await;

        let stored = services.identities.list();
        assert_eq!(stored[0].profile.name.as_deref(), Some("Alice"));
        assert_eq!(stored[0].profile.description.as_deref(), Some("dev"));

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, FullyQualifiedName::from("alice.id"));
        assert_eq!(uploads[0].1.name.as_deref(), Some("Alice"));
        assert!(!sandbox.state().uploading());
        assert!(sandbox.state().warning().is_none());
    }

    #[tokio::test]
    async fn flush_on_leave_saves_the_working_copy() {
        let storage = Arc::new(mock::Storage::new().with_upload(Ok(
            "https://storage.test/alice.id.json".to_string(),
        )));
        let services = mock::services_with(
            Arc::new(mock::Node::new()),
            storage.clone(),
            Arc::new(mock::Analytics::new()),
        );
        services
            .identities
            .insert(cache_with_identity("alice.id").identities[0].clone())
            .unwrap();
        let cache = cache_with_identity("alice.id");

        let mut panel = EditProfilePanel::new(0);
        let _ = panel.reload(services.clone(), &cache);
        let _ = panel.update(services.clone(), &cache, edited("name", "Alice"));

        let flush = panel.flush(&services);
        let _sandbox = Sandbox::new(panel).run(services.clone(), &cache, flush).await;

        assert_eq!(
            services.identities.list()[0].profile.name.as_deref(),
            Some("Alice")
        );
        assert_eq!(storage.uploads().len(), 1);
    }

    #[tokio::test]
    async fn missing_identity_is_reported() {
        let services = mock::services(Arc::new(mock::Node::new()));
        let cache = Cache::default();

        let sandbox = Sandbox::new(EditProfilePanel::new(4))
            .load(services.clone(), &cache)
            .await;
        assert!(sandbox.state().identity().is_none());
        assert!(sandbox.state().warning().is_some());
    }
}
