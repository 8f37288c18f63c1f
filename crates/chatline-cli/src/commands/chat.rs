use super::resolve_settings;
use crate::ConnectionArgs;
use anyhow::Result;
use chatline_application::{ConversationListener, ConversationOrchestrator, SubmitOutcome, WidgetConfig};
use chatline_core::id::UuidGenerator;
use chatline_core::message::{Message, Sender};
use chatline_infrastructure::{BundledTranslationProvider, MemoryTranslationCache};
use chatline_interaction::EnterpriseAssistantService;
use clap::Args;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Agent id
    pub identifier: String,

    /// Opening prompt sent on start
    #[arg(long)]
    pub greetings: Option<String>,

    /// Existing chat session id
    #[arg(long)]
    pub chat_uid: Option<String>,

    /// Conversation context
    #[arg(long)]
    pub context: Option<String>,

    /// UI locale (en, pt-br)
    #[arg(long)]
    pub language: Option<String>,
}

impl ChatArgs {
    fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            greetings: self.greetings.clone(),
            identifier: self.identifier.clone(),
            chat_uid: self.chat_uid.clone(),
            context: self.context.clone(),
            language: self.language.clone(),
        }
    }
}

/// Prints settled AI messages; loading placeholders show as a marker.
struct TerminalListener;

impl ConversationListener for TerminalListener {
    fn on_message_reconciled(&self, message: &Message, _thread: &[Message]) {
        if message.sender != Sender::Ai {
            return;
        }
        if message.loading {
            eprintln!("...");
        } else if let Some(error) = &message.error {
            eprintln!("[error] {}", error);
        } else {
            println!("ai> {}", message.content.as_deref().unwrap_or_default());
        }
    }
}

pub async fn run(connection: &ConnectionArgs, args: ChatArgs) -> Result<()> {
    let settings = resolve_settings(connection)?;
    let assistant = Arc::new(EnterpriseAssistantService::new(settings));
    let translator = Arc::new(BundledTranslationProvider::new(Arc::new(
        MemoryTranslationCache::new(),
    )));

    let orchestrator = ConversationOrchestrator::new(
        args.widget_config(),
        assistant,
        Arc::new(UuidGenerator),
        translator,
    )
    .with_listener(Arc::new(TerminalListener));

    orchestrator.start().await?;
    if let Some(name) = orchestrator.agent().await.and_then(|a| a.name) {
        eprintln!("Connected to {} (chat {})", name, orchestrator.chat_uid());
    }
    let prompt = orchestrator.ui_text("text.placeholder").await;
    eprintln!("{}", prompt);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match orchestrator.submit(&line).await {
            SubmitOutcome::Dispatched { .. } | SubmitOutcome::Blank => {}
            SubmitOutcome::SendDisabled => eprintln!("[busy] wait for the current reply"),
        }
    }

    tracing::info!(chat_uid = %orchestrator.chat_uid(), "[Chat] session closed");
    Ok(())
}
