use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::message::DecisionPoint;
use crate::model::script::ScriptData;

/// A model reply. Exactly one kind per reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    Question(String),
    Confirmation(String),
    DecisionPoint(DecisionPoint),
    Script(ScriptData),
}

impl ModelReply {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelReply::Question(_) => QUESTION,
            ModelReply::Confirmation(_) => CONFIRMATION,
            ModelReply::DecisionPoint(_) => DECISION_POINT,
            ModelReply::Script(_) => SCRIPT,
        }
    }
}

const QUESTION: &str = "question";
const CONFIRMATION: &str = "confirmation";
const DECISION_POINT: &str = "decisionPoint";
const SCRIPT: &str = "script";

const REPLY_KEYS: [&str; 4] = [QUESTION, CONFIRMATION, DECISION_POINT, SCRIPT];

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("reply must be a JSON object")]
    NotAnObject,

    #[error("reply has none of 'question', 'confirmation', 'decisionPoint' or 'script'")]
    MissingKind,

    #[error("reply has more than one kind: {}", .0.join(", "))]
    AmbiguousKind(Vec<&'static str>),

    #[error("'{kind}' payload has the wrong shape: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Removes markdown code fences some models wrap around JSON output.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode raw model text into exactly one typed reply.
pub fn decode_model_reply(raw: &str) -> Result<ModelReply, ReplyError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned).map_err(ReplyError::InvalidJson)?;

    let Value::Object(mut object) = value else {
        return Err(ReplyError::NotAnObject);
    };

    let present: Vec<&'static str> = REPLY_KEYS
        .into_iter()
        .filter(|key| object.get(*key).is_some_and(is_present))
        .collect();

    match present.len() {
        0 => Err(ReplyError::MissingKind),
        1 => decode_kind(present[0], &mut object),
        _ => Err(ReplyError::AmbiguousKind(present)),
    }
}

fn decode_kind(kind: &'static str, object: &mut Map<String, Value>) -> Result<ModelReply, ReplyError> {
    let payload = object.remove(kind).unwrap_or(Value::Null);

    match kind {
        QUESTION => payload_as(kind, payload).map(ModelReply::Question),
        CONFIRMATION => payload_as(kind, payload).map(ModelReply::Confirmation),
        DECISION_POINT => payload_as(kind, payload).map(ModelReply::DecisionPoint),
        _ => payload_as(kind, payload).map(ModelReply::Script),
    }
}

fn payload_as<T: DeserializeOwned>(kind: &'static str, payload: Value) -> Result<T, ReplyError> {
    serde_json::from_value(payload).map_err(|source| ReplyError::InvalidPayload { kind, source })
}

/// Null, `false` and empty strings do not count as a reply kind.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
