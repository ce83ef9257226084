use std::sync::mpsc::{Receiver, Sender};

use crate::engine::llm_client::{GeminiClient, LoggingModel, ScriptModel};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::turn::{self, GREETING};
use crate::model::conversation::{Conversation, ConversationSnapshot};

/// Owns the conversation and serves UI commands one at a time, so there is
/// never more than one model call in flight.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    conversation: Conversation,
    model: Box<dyn ScriptModel>,
    repaint: Option<egui::Context>,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        model: Box<dyn ScriptModel>,
    ) -> Self {
        Self {
            rx,
            tx,
            conversation: Conversation::new(GREETING),
            model,
            repaint: None,
        }
    }

    /// Wake the UI whenever a response is sent.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.conversation.snapshot()
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::Kickstart => {
                    // Failures are already logged and shown as an apology.
                    let _ = turn::kickstart(&mut self.conversation, self.model.as_ref());
                    self.send(EngineResponse::TurnFinished(self.conversation.snapshot()));
                }

                EngineCommand::UserInput(text) => {
                    let _ = turn::submit_user_input(&mut self.conversation, self.model.as_ref(), &text);
                    self.send(EngineResponse::TurnFinished(self.conversation.snapshot()));
                }

                EngineCommand::UpdateModelSettings(settings) => match GeminiClient::new(settings) {
                    Ok(client) => {
                        tracing::info!(model = %client.model_id(), "Model settings applied");
                        self.model = Box::new(LoggingModel::new(client));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Rejected model settings");
                        self.send(EngineResponse::SettingsRejected(err.to_string()));
                    }
                },
            }
        }

        tracing::debug!("Engine command channel closed");
    }

    fn send(&self, response: EngineResponse) {
        // The UI going away is the only way this fails.
        let _ = self.tx.send(response);
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}
