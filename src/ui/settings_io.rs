use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ui::settings::AppSettings;

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("video_script_pm");
    path.push("settings.json");
    path
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings() -> AppSettings {
    let path = settings_path();
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Using default settings");
            AppSettings::default()
        }
    }
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<AppSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

pub fn save_settings(settings: &AppSettings) {
    let path = settings_path();
    if let Err(err) = save_settings_to(&path, settings) {
        tracing::warn!(path = %path.display(), error = %err, "Failed to save settings");
    }
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
