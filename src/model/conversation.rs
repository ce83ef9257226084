use crate::model::conversation_state::ConversationState;
use crate::model::message::Message;
use crate::model::script::ScriptData;
use crate::model::transcript::Transcript;

/// Authoritative session state. Owned by the engine thread.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub transcript: Transcript,
    pub state: ConversationState,
    pub script: Option<ScriptData>,
}

impl Conversation {
    /// Starts a session with the PM greeting already said.
    pub fn new(greeting: &str) -> Self {
        let mut transcript = Transcript::default();
        transcript.push_pm(greeting);

        Self {
            messages: vec![Message::ai(greeting)],
            transcript,
            state: ConversationState::GatheringInfo,
            script: None,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            state: self.state,
            script: self.script.clone(),
        }
    }
}

/// Read-only copy handed to the UI after every turn.
#[derive(Debug, Clone, Default)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub state: ConversationState,
    pub script: Option<ScriptData>,
}
