//! Application core - owns state, the conversation session, and the backend handle

mod actions;
mod dispatch;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;

use render_thread::RenderThread;

use crate::backend::{BackendCommand, BackendHandle, EmailId, HttpBackend, spawn_backend_actor};
use crate::config::Config;
use crate::input::KeyBindings;
use crate::session::Session;
use state::AppState;

/// Generation of the most recently issued request of each kind.
///
/// Completions carry the generation they were issued with; anything older
/// than the current value is stale and dropped.
#[derive(Debug, Default)]
pub(crate) struct RequestGenerations {
    pub list: u64,
    pub chat: u64,
}

impl RequestGenerations {
    pub fn next_list(&mut self) -> u64 {
        self.list += 1;
        self.list
    }

    pub fn next_chat(&mut self) -> u64 {
        self.chat += 1;
        self.chat
    }
}

/// A chat question that has been sent but not answered yet
#[derive(Debug, Clone)]
pub(crate) struct PendingExchange {
    pub generation: u64,
    pub email_id: EmailId,
    pub question: String,
    /// Index of the optimistic user bubble in the chat panel
    pub bubble: usize,
}

pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
    /// Selected email, transcript and model (single owner)
    pub(crate) session: Session,
    /// Models the selector cycles through
    pub(crate) models: Vec<String>,
    pub(crate) bindings: KeyBindings,
    pub(crate) backend: BackendHandle,
    pub(crate) requests: RequestGenerations,
    pub(crate) pending_chat: Option<PendingExchange>,
    /// Set by `:quit`; checked by the event loop
    pub(crate) should_quit: bool,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpBackend::new(&config.backend)?;
        let backend = spawn_backend_actor(client);
        Ok(Self::with_backend(config, backend))
    }

    /// Build the app around an already running backend actor
    pub fn with_backend(config: Config, backend: BackendHandle) -> Self {
        let model = config.models.initial();
        let models = config.models.candidates();
        let bindings = KeyBindings::new(&config.ui.keybinding_mode);

        let state = AppState {
            model: model.clone(),
            backend_url: config.backend.url.clone(),
            split_ratio: config.ui.clamped_split_ratio(),
            ..Default::default()
        };

        Self {
            session: Session::new(model),
            models,
            bindings,
            backend,
            requests: RequestGenerations::default(),
            pending_chat: None,
            should_quit: false,
            dirty: true, // Start dirty for initial render
            config,
            state,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        self.state.set_status(format!(
            "Backend {} | press f to fetch emails",
            self.config.backend.url
        ));

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        // Stop the backend actor; in-flight requests are abandoned
        self.backend.cmd_tx.send(BackendCommand::Shutdown).await.ok();

        result
    }

    /// Send a command to the backend actor. Returns false if the actor is gone.
    pub(crate) async fn send_backend(&mut self, cmd: BackendCommand) -> bool {
        if self.backend.cmd_tx.send(cmd).await.is_err() {
            tracing::error!("Backend actor is not running");
            self.state.set_error("Backend worker stopped; restart mailchat");
            return false;
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::mpsc;

    use super::App;
    use crate::backend::{BackendCommand, BackendEvent, BackendHandle};
    use crate::config::Config;

    /// The test's ends of the channels an app uses to talk to its backend actor
    pub struct FakeBackend {
        pub cmd_rx: mpsc::Receiver<BackendCommand>,
        pub event_tx: mpsc::Sender<BackendEvent>,
    }

    impl FakeBackend {
        /// Next command the app sent, if any
        pub fn next_command(&mut self) -> Option<BackendCommand> {
            self.cmd_rx.try_recv().ok()
        }
    }

    pub fn app() -> (App, FakeBackend) {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(16);
        let app = App::with_backend(Config::default(), BackendHandle { cmd_tx, event_rx });
        (app, FakeBackend { cmd_rx, event_tx })
    }
}
