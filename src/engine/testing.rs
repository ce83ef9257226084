//! Scripted stand-in for the hosted model.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::engine::llm_client::{ModelError, ScriptModel};

/// Returns queued replies in order and records every transcript it was sent.
#[derive(Default)]
pub struct ScriptedModel {
    replies: RefCell<VecDeque<Result<String, ModelError>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedModel {
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::default();
        for reply in replies {
            model.push_reply(reply);
        }
        model
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.borrow_mut().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, err: ModelError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ScriptModel for ScriptedModel {
    fn generate(&self, _system_instruction: &str, transcript: &str) -> Result<String, ModelError> {
        self.calls.borrow_mut().push(transcript.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyReply))
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}
