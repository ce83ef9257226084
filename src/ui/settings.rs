use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub ui: UiSettings,
    pub model: ModelSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Sender → bubble color
    pub sender_colors: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut sender_colors = HashMap::new();

        sender_colors.insert("User".into(), [110, 60, 190, 255]);
        sender_colors.insert("Ai".into(), [60, 64, 72, 255]);
        sender_colors.insert("Decision".into(), [80, 50, 130, 255]);

        Self {
            ui_scale: 1.0,
            sender_colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.sender_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::DARK_GRAY)
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.sender_colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }
}

/// Everything the model client needs. The API key itself is never stored;
/// only the name of the environment variable it is read from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            temperature: 0.8,
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: "API_KEY".into(),
            timeout_secs: 120,
        }
    }
}
