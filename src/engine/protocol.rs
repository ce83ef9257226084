use crate::model::conversation::ConversationSnapshot;
use crate::ui::settings::ModelSettings;

pub enum EngineCommand {
    /// Ask the model for its opening question.
    Kickstart,
    UserInput(String),
    UpdateModelSettings(ModelSettings),
}

pub enum EngineResponse {
    /// Sent once per `Kickstart` or `UserInput`, after the turn settles.
    TurnFinished(ConversationSnapshot),

    SettingsRejected(String),
}
