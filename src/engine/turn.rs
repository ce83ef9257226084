use thiserror::Error;

use crate::engine::apply_reply::apply_reply;
use crate::engine::llm_client::{ModelError, ScriptModel};
use crate::engine::prompt_builder::SYSTEM_PROMPT;
use crate::model::conversation::Conversation;
use crate::model::llm_decode::{decode_model_reply, ModelReply, ReplyError};
use crate::model::message::Message;

pub const GREETING: &str = "Hello! I'm your AI project manager. I'll walk you through a relaxed \
conversation to understand what you need, and then my team of experts will craft a \
high-converting product video script for you.";

pub const STARTUP_APOLOGY: &str =
    "Sorry, I ran into a problem while getting started. Please restart the app and try again.";

pub const TURN_APOLOGY: &str =
    "Sorry, my expert team hit a snag during the discussion. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Reply(#[from] ReplyError),

    #[error("opening reply must be a question, got '{0}'")]
    UnexpectedOpening(&'static str),
}

/// Ask the model for its first question. Runs once per session.
///
/// On failure the startup apology is appended and the error returned;
/// nothing else changes.
pub fn kickstart(conversation: &mut Conversation, model: &dyn ScriptModel) -> Result<(), TurnError> {
    let result = request_reply(conversation, model).and_then(|reply| match reply {
        ModelReply::Question(_) => Ok(reply),
        other => Err(TurnError::UnexpectedOpening(other.kind())),
    });

    match result {
        Ok(reply) => {
            apply_reply(conversation, reply);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to start the conversation");
            conversation.messages.push(Message::ai(STARTUP_APOLOGY));
            Err(err)
        }
    }
}

/// One turn: record the user's input, call the model, apply its reply.
/// Decision-button choices arrive here too.
///
/// On failure the turn apology is appended and the error returned. The
/// user's own entry stays in the log; state and script are untouched.
pub fn submit_user_input(
    conversation: &mut Conversation,
    model: &dyn ScriptModel,
    text: &str,
) -> Result<(), TurnError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }

    conversation.messages.push(Message::user(text));
    conversation.transcript.push_user(text);

    match request_reply(conversation, model) {
        Ok(reply) => {
            tracing::info!(
                kind = reply.kind(),
                state = ?conversation.state,
                transcript_entries = conversation.transcript.len(),
                "Applying model reply"
            );
            apply_reply(conversation, reply);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, state = ?conversation.state, "Turn failed");
            conversation.messages.push(Message::ai(TURN_APOLOGY));
            Err(err)
        }
    }
}

fn request_reply(conversation: &Conversation, model: &dyn ScriptModel) -> Result<ModelReply, TurnError> {
    let raw = model.generate(SYSTEM_PROMPT, &conversation.transcript.render())?;

    decode_model_reply(&raw).map_err(|err| {
        tracing::debug!(raw = %raw, "Undecodable model reply");
        TurnError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::ScriptedModel;
    use crate::model::conversation_state::ConversationState;
    use crate::model::message::Sender;

    const SCRIPT_REPLY: &str = r#"{"script": {
        "targetAudience": "Remote workers",
        "coreCreativeHook": "Your desk, but calmer",
        "storyline": [
            {"sceneNumber": 1, "visuals": "Messy desk timelapse", "dialogue": "Sound familiar?"},
            {"sceneNumber": 2, "visuals": "Organizer unboxing", "dialogue": "Meet DeskZen."},
            {"sceneNumber": 3, "visuals": "Clean desk, smiling user", "dialogue": "Focus, restored."}
        ],
        "emotionalValuePoints": ["Control", "Calm"],
        "callToAction": "Order now and get free shipping."
    }}"#;

    fn started() -> Conversation {
        let mut conversation = Conversation::new(GREETING);
        let model = ScriptedModel::with_replies([r#"{"question": "What are you selling?"}"#]);
        kickstart(&mut conversation, &model).unwrap();
        conversation
    }

    #[test]
    fn kickstart_sends_only_the_greeting() {
        let mut conversation = Conversation::new(GREETING);
        let model = ScriptedModel::with_replies([r#"{"question": "What are you selling?"}"#]);

        kickstart(&mut conversation, &model).unwrap();

        assert_eq!(model.calls(), vec![format!("PM: {GREETING}")]);
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].text, "What are you selling?");
        assert_eq!(conversation.state, ConversationState::GatheringInfo);
    }

    #[test]
    fn kickstart_rejects_non_question_opening() {
        let mut conversation = Conversation::new(GREETING);
        let model = ScriptedModel::with_replies([r#"{"confirmation": "Ready?"}"#]);

        let err = kickstart(&mut conversation, &model).unwrap_err();

        assert!(matches!(err, TurnError::UnexpectedOpening("confirmation")));
        assert_eq!(conversation.messages.last().unwrap().text, STARTUP_APOLOGY);
        assert_eq!(conversation.transcript.len(), 1);
        assert_eq!(conversation.state, ConversationState::GatheringInfo);
    }

    #[test]
    fn kickstart_failure_adds_startup_apology() {
        let mut conversation = Conversation::new(GREETING);
        let model = ScriptedModel::default();
        model.push_error(ModelError::Http {
            status: 503,
            message: "overloaded".into(),
        });

        assert!(kickstart(&mut conversation, &model).is_err());
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].text, STARTUP_APOLOGY);
    }

    #[test]
    fn user_turn_sends_full_transcript() {
        let mut conversation = started();
        let model = ScriptedModel::with_replies([r#"{"question": "Who buys it?"}"#]);

        submit_user_input(&mut conversation, &model, "  Ergonomic desk organizers \n").unwrap();

        assert_eq!(
            model.calls(),
            vec![format!(
                "PM: {GREETING}\n\nPM: What are you selling?\n\nUser: Ergonomic desk organizers"
            )]
        );
        let texts: Vec<(Sender, &str)> = conversation
            .messages
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect();
        assert_eq!(
            &texts[2..],
            &[
                (Sender::User, "Ergonomic desk organizers"),
                (Sender::Ai, "Who buys it?")
            ]
        );
    }

    #[test]
    fn empty_input_is_ignored() {
        let mut conversation = started();
        let model = ScriptedModel::default();

        submit_user_input(&mut conversation, &model, "   ").unwrap();

        assert!(model.calls().is_empty());
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn confirmed_turn_produces_script() {
        let mut conversation = started();
        let model = ScriptedModel::with_replies([
            r#"{"confirmation": "I have everything. Shall I brief the team?"}"#,
            SCRIPT_REPLY,
        ]);

        submit_user_input(&mut conversation, &model, "Remote workers, calm style, buy now").unwrap();
        assert_eq!(conversation.state, ConversationState::AwaitingConfirmation);

        submit_user_input(&mut conversation, &model, "yes").unwrap();

        assert!(model.calls()[1].ends_with("User: yes"));
        assert_eq!(conversation.state, ConversationState::Completed);
        let script = conversation.script.as_ref().unwrap();
        let scenes: Vec<(u32, &str)> = script
            .storyline
            .iter()
            .map(|s| (s.scene_number, s.dialogue.as_str()))
            .collect();
        assert_eq!(
            scenes,
            vec![(1, "Sound familiar?"), (2, "Meet DeskZen."), (3, "Focus, restored.")]
        );
    }

    #[test]
    fn decision_choice_goes_through_the_same_path() {
        let mut conversation = started();
        let model = ScriptedModel::with_replies([
            r#"{"decisionPoint": {"question": "Which tone?", "options": ["Playful", "Premium"]}}"#,
            r#"{"question": "Any must-have shots?"}"#,
        ]);

        submit_user_input(&mut conversation, &model, "Go ahead").unwrap();
        assert_eq!(conversation.state, ConversationState::AwaitingDecision);

        let choice = conversation.messages.last().unwrap().decision.clone().unwrap().options[1].clone();
        submit_user_input(&mut conversation, &model, &choice).unwrap();

        assert!(model.calls()[1].ends_with("PM Question: Which tone?\n\nUser: Premium"));
        assert_eq!(conversation.state, ConversationState::GatheringInfo);
    }

    #[test]
    fn bad_replies_leave_state_and_script_alone() {
        for raw in [
            "not json at all",
            r#"{"answer": "nope"}"#,
            r#"{"question": "More?", "script": {"targetAudience": "x"}}"#,
        ] {
            let mut conversation = started();
            let model = ScriptedModel::with_replies([SCRIPT_REPLY, raw]);
            submit_user_input(&mut conversation, &model, "yes").unwrap();
            let before_script = conversation.script.clone();
            let before_len = conversation.messages.len();

            assert!(submit_user_input(&mut conversation, &model, "Make it funnier").is_err());

            assert_eq!(conversation.state, ConversationState::Completed, "{raw}");
            assert_eq!(conversation.script, before_script);
            // The user's message plus exactly one apology.
            assert_eq!(conversation.messages.len(), before_len + 2);
            assert_eq!(conversation.messages.last().unwrap().text, TURN_APOLOGY);
        }
    }

    #[test]
    fn transport_failure_adds_one_apology() {
        let mut conversation = started();
        let model = ScriptedModel::default();
        model.push_error(ModelError::MissingApiKey("API_KEY".into()));

        let err = submit_user_input(&mut conversation, &model, "Mugs").unwrap_err();

        assert!(matches!(err, TurnError::Model(ModelError::MissingApiKey(_))));
        let apologies = conversation
            .messages
            .iter()
            .filter(|m| m.text == TURN_APOLOGY)
            .count();
        assert_eq!(apologies, 1);
        assert_eq!(conversation.state, ConversationState::GatheringInfo);
    }

    #[test]
    fn user_can_retry_after_a_failure() {
        let mut conversation = started();
        let model = ScriptedModel::with_replies(["garbage", r#"{"question": "Price point?"}"#]);

        assert!(submit_user_input(&mut conversation, &model, "Mugs").is_err());
        submit_user_input(&mut conversation, &model, "Mugs").unwrap();

        assert_eq!(conversation.messages.last().unwrap().text, "Price point?");
    }
}
