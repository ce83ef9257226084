pub mod conversation;
pub mod conversation_state;
pub mod llm_decode;
pub mod message;
pub mod script;
pub mod transcript;
