use crate::model::conversation::Conversation;
use crate::model::conversation_state::ConversationState;
use crate::model::llm_decode::ModelReply;
use crate::model::message::Message;

pub const SCRIPT_READY: &str =
    "Your video plan is ready! Check the details on the right. If you'd like any changes, just tell me.";

/// Apply one decoded reply to the conversation.
/// Any reply kind may follow any state.
pub fn apply_reply(conversation: &mut Conversation, reply: ModelReply) {
    match reply {
        ModelReply::Question(question) => {
            conversation.state = ConversationState::GatheringInfo;
            conversation.transcript.push_pm(&question);
            conversation.messages.push(Message::ai(question));
        }

        ModelReply::Confirmation(confirmation) => {
            conversation.state = ConversationState::AwaitingConfirmation;
            conversation.transcript.push_pm(&confirmation);
            conversation.messages.push(Message::ai(confirmation));
        }

        ModelReply::DecisionPoint(decision) => {
            conversation.state = ConversationState::AwaitingDecision;
            conversation.transcript.push_decision(&decision.question);
            conversation.messages.push(Message::ai_decision(decision));
        }

        ModelReply::Script(script) => {
            conversation.state = ConversationState::Completed;
            conversation.transcript.push_script(&script);
            conversation.script = Some(script);
            conversation.messages.push(Message::ai(SCRIPT_READY));
        }
    }
}
