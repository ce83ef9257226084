use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    #[default]
    GatheringInfo,
    AwaitingConfirmation,
    GeneratingScript,
    AwaitingDecision,
    Completed,
}

impl ConversationState {
    /// State shown to the user while a turn is still waiting on the model.
    /// Once the interview has left the gathering phase, any pending turn is
    /// treated as script work.
    pub fn while_pending(self) -> Self {
        match self {
            Self::GatheringInfo => Self::GatheringInfo,
            _ => Self::GeneratingScript,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GatheringInfo => "Gathering info",
            Self::AwaitingConfirmation => "Awaiting confirmation",
            Self::GeneratingScript => "Generating script",
            Self::AwaitingDecision => "Awaiting decision",
            Self::Completed => "Completed",
        }
    }
}
