use crate::model::script::ScriptData;

/// Ordered session history, resent in full as model context on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    pub fn push_pm(&mut self, text: &str) {
        self.entries.push(format!("PM: {text}"));
    }

    pub fn push_user(&mut self, text: &str) {
        self.entries.push(format!("User: {text}"));
    }

    pub fn push_decision(&mut self, question: &str) {
        self.entries.push(format!("PM Question: {question}"));
    }

    pub fn push_script(&mut self, script: &ScriptData) {
        // Serializing plain strings and vectors cannot fail.
        let json = serde_json::to_string_pretty(script).unwrap_or_default();
        self.entries.push(format!("AI Script:\n{json}"));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The text sent as model contents: entries separated by a blank line.
    pub fn render(&self) -> String {
        self.entries.join("\n\n")
    }
}
