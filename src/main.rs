mod engine;
mod model;
mod ui;

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_script_pm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ui::settings_io::load_settings();
    tracing::info!(model = %settings.model.model, "Starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Video Script Master")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Video Script Master",
        options,
        Box::new(move |cc| Ok(Box::new(ui::app::ScriptPmApp::new(cc, settings)?))),
    )
    .map_err(|e| anyhow::anyhow!("UI event loop failed: {e}"))
}
