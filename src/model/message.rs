use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

/// A multiple-choice prompt issued by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPoint {
    pub question: String,
    pub options: Vec<String>,
}

/// One chat bubble. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub decision: Option<DecisionPoint>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), None)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text.into(), None)
    }

    pub fn ai_decision(decision: DecisionPoint) -> Self {
        Self::new(Sender::Ai, decision.question.clone(), Some(decision))
    }

    fn new(sender: Sender, text: String, decision: Option<DecisionPoint>) -> Self {
        Self {
            id: next_message_id(),
            sender,
            text,
            decision,
        }
    }
}

/// Millisecond timestamp plus a random suffix.
fn next_message_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen();
    format!("{millis}-{suffix:08x}")
}
