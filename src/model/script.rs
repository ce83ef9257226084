use serde::{Deserialize, Serialize};

/// A finished video script. Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptData {
    pub target_audience: String,
    pub core_creative_hook: String,
    pub storyline: Vec<Scene>,
    pub emotional_value_points: Vec<String>,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub scene_number: u32,
    pub visuals: String,
    pub dialogue: String,
}
