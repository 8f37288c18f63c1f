//! Conversation orchestrator.
//!
//! State machine:
//!
//! ```text
//! Idle --start()--> AwaitingGreeting --settled--> Ready
//! Ready --submit()--> AwaitingReply --settled--> Ready
//! ```
//!
//! Every pending reply is represented by a loading placeholder. When the send
//! settles the placeholder is reconciled, by id, into either the answer or an
//! error-state message, so no placeholder is left loading.

use crate::listener::ConversationListener;
use chatline_core::assistant::AssistantService;
use chatline_core::conversation::{AgentProfile, OutgoingMessage, SendMessageBody, reply_text};
use chatline_core::id::IdGenerator;
use chatline_core::message::{Message, MessageStore};
use chatline_core::translation::{DEFAULT_LOCALE, TranslationProvider, Translations};
use chatline_core::{ChatlineError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

const DEFAULT_GREETING: &str = "Hi";
const FALLBACK_SEND_LABEL: &str = "Enviar";
const FALLBACK_PLACEHOLDER: &str = "Digite sua mensagem ...";

/// Widget-level configuration (the element attributes of the chat widget).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Opening prompt sent on start; defaults to `Hi`.
    pub greetings: Option<String>,
    /// Agent id.
    pub identifier: String,
    /// Session id; generated when absent.
    pub chat_uid: Option<String>,
    /// Free-text conversation context.
    pub context: Option<String>,
    /// Locale for static UI strings; defaults to `en`.
    pub language: Option<String>,
}

impl WidgetConfig {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_greetings(mut self, greetings: impl Into<String>) -> Self {
        self.greetings = Some(greetings.into());
        self
    }

    pub fn with_chat_uid(mut self, chat_uid: impl Into<String>) -> Self {
        self.chat_uid = Some(chat_uid.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    AwaitingGreeting,
    Ready,
    AwaitingReply,
}

/// Result of [`ConversationOrchestrator::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The message was sent and its reply has settled.
    Dispatched {
        user_message_id: String,
        reply_id: String,
    },
    /// Empty input; nothing happened.
    Blank,
    /// Submission is currently disabled; nothing happened.
    SendDisabled,
}

struct SessionState {
    state: OrchestratorState,
    send_disabled: bool,
    store: MessageStore,
    agent: Option<AgentProfile>,
    translations: Option<Translations>,
}

/// Coordinates submit → placeholder → send → reconcile for one chat session.
pub struct ConversationOrchestrator {
    config: WidgetConfig,
    chat_uid: String,
    assistant: Arc<dyn AssistantService>,
    ids: Arc<dyn IdGenerator>,
    translator: Arc<dyn TranslationProvider>,
    listeners: Vec<Arc<dyn ConversationListener>>,
    session: Mutex<SessionState>,
}

impl ConversationOrchestrator {
    pub fn new(
        config: WidgetConfig,
        assistant: Arc<dyn AssistantService>,
        ids: Arc<dyn IdGenerator>,
        translator: Arc<dyn TranslationProvider>,
    ) -> Self {
        let chat_uid = config
            .chat_uid
            .clone()
            .filter(|uid| !uid.is_empty())
            .unwrap_or_else(|| ids.next_id());

        Self {
            config,
            chat_uid,
            assistant,
            ids,
            translator,
            listeners: Vec::new(),
            session: Mutex::new(SessionState {
                state: OrchestratorState::Idle,
                send_disabled: true,
                store: MessageStore::new(),
                agent: None,
                translations: None,
            }),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn ConversationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn chat_uid(&self) -> &str {
        &self.chat_uid
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Initial load: translations, agent profile and the greeting exchange.
    ///
    /// Only valid once, from `Idle`.
    pub async fn start(&self) -> Result<()> {
        {
            let mut session = self.session.lock().await;
            if session.state != OrchestratorState::Idle {
                return Err(ChatlineError::invalid_state(format!(
                    "start() requires Idle, orchestrator is {:?}",
                    session.state
                )));
            }
            session.state = OrchestratorState::AwaitingGreeting;
        }
        tracing::info!(
            chat_uid = %self.chat_uid,
            agent = %self.config.identifier,
            "[Orchestrator] starting conversation"
        );

        let translations = self.translator.translations(self.language()).await;
        self.session.lock().await.translations = translations;

        let reply_id = self.ids.next_id();
        self.reconcile(Message::placeholder(reply_id.clone())).await;

        self.load_agent().await;

        let greeting = self
            .config
            .greetings
            .clone()
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());
        // The greeting is a user-side message and gets its own id.
        let body = self.send_body(vec![OutgoingMessage {
            id: self.ids.next_id(),
            content: greeting,
        }]);
        self.settle(&reply_id, body).await;
        Ok(())
    }

    /// Submits user text and waits for the reply to settle.
    ///
    /// Submission is disabled from the moment a send starts until it
    /// settles; a concurrent submit in that window returns
    /// [`SubmitOutcome::SendDisabled`].
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Blank;
        }
        {
            let mut session = self.session.lock().await;
            if session.send_disabled || session.state != OrchestratorState::Ready {
                tracing::debug!(state = ?session.state, "[Orchestrator] submit ignored");
                return SubmitOutcome::SendDisabled;
            }
            session.send_disabled = true;
            session.state = OrchestratorState::AwaitingReply;
        }

        let user_message = Message::user(self.ids.next_id(), text);
        for listener in &self.listeners {
            listener.on_user_submit(&user_message);
        }
        let user_message_id = user_message.id.clone();
        self.reconcile(user_message).await;

        let reply_id = self.ids.next_id();
        self.reconcile(Message::placeholder(reply_id.clone())).await;

        let body = self.send_body(vec![OutgoingMessage {
            id: user_message_id.clone(),
            content: text.to_string(),
        }]);
        self.settle(&reply_id, body).await;

        SubmitOutcome::Dispatched {
            user_message_id,
            reply_id,
        }
    }

    /// Reconciles a host-provided message into the thread.
    pub async fn receive(&self, message: Message) -> Vec<Message> {
        self.reconcile(message).await
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.session.lock().await.store.messages().to_vec()
    }

    pub async fn state(&self) -> OrchestratorState {
        self.session.lock().await.state
    }

    pub async fn send_disabled(&self) -> bool {
        self.session.lock().await.send_disabled
    }

    pub async fn agent(&self) -> Option<AgentProfile> {
        self.session.lock().await.agent.clone()
    }

    /// Static UI string for `key`, with built-in fallbacks when no catalog
    /// was loaded.
    pub async fn ui_text(&self, key: &str) -> String {
        let session = self.session.lock().await;
        if let Some(text) = session.translations.as_ref().and_then(|t| t.get(key)) {
            return text.to_string();
        }
        match key {
            "button.send" => FALLBACK_SEND_LABEL.to_string(),
            "text.placeholder" => FALLBACK_PLACEHOLDER.to_string(),
            other => other.to_string(),
        }
    }

    fn language(&self) -> &str {
        self.config
            .language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }

    fn send_body(&self, messages: Vec<OutgoingMessage>) -> SendMessageBody {
        SendMessageBody::for_session(
            self.chat_uid.clone(),
            self.config.identifier.clone(),
            self.config.context.clone().unwrap_or_default(),
            messages,
        )
    }

    async fn load_agent(&self) {
        match self.assistant.fetch_agent(&self.config.identifier).await {
            Ok(profile) => {
                tracing::debug!(name = ?profile.name, "[Orchestrator] agent profile loaded");
                self.session.lock().await.agent = Some(profile);
            }
            Err(e) => {
                tracing::warn!(agent = %self.config.identifier, "[Orchestrator] agent lookup failed: {}", e);
            }
        }
    }

    /// Sends `body`, reconciles the outcome under `reply_id` and re-enables
    /// submission.
    async fn settle(&self, reply_id: &str, body: SendMessageBody) {
        let resolved = match self.assistant.send_message(body).await {
            Ok(reply) => Message::answer(reply_id, reply_text(&reply)),
            Err(e) => {
                tracing::error!(
                    reply_id,
                    timeout = e.is_timeout(),
                    "[Orchestrator] send failed: {}",
                    e
                );
                Message::failure(reply_id, e.summary())
            }
        };
        self.reconcile(resolved).await;

        let mut session = self.session.lock().await;
        session.state = OrchestratorState::Ready;
        session.send_disabled = false;
    }

    /// Listeners run under the session lock, so they observe reconciles in
    /// store order and each `thread` snapshot is the latest one.
    async fn reconcile(&self, message: Message) -> Vec<Message> {
        let mut session = self.session.lock().await;
        let thread = session.store.reconcile(message.clone()).to_vec();
        for listener in &self.listeners {
            listener.on_message_reconciled(&message, &thread);
        }
        thread
    }
}
