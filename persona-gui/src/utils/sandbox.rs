use iced::futures::StreamExt;
use iced::Task;

use iced_runtime::{task::into_stream, Action};

use crate::{
    app::{cache::Cache, message::Message, state::State},
    services::Services,
};

pub struct Sandbox<S: State> {
    state: S,
}

impl<S: State + 'static> Sandbox<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub async fn update(mut self, services: Services, cache: &Cache, message: Message) -> Self {
        let cmd = self.state.update(services.clone(), cache, message);
        self.run(services, cache, cmd).await
    }

    /// Drive `task` to completion, feeding every produced message back into
    /// the state, follow-up tasks included.
    pub async fn run(mut self, services: Services, cache: &Cache, task: Task<Message>) -> Self {
        let mut queue = vec![task];
        while let Some(cmd) = queue.pop() {
            if let Some(mut stream) = into_stream(cmd) {
                while let Some(action) = stream.next().await {
                    if let Action::Output(msg) = action {
                        queue.push(self.state.update(services.clone(), cache, msg));
                    }
                }
            }
        }
        self
    }

    pub async fn load(mut self, services: Services, cache: &Cache) -> Self {
        let cmd = self.state.reload(services.clone(), cache);
        self.run(services, cache, cmd).await
    }
}
