use eframe::egui;
use std::sync::mpsc;

use crate::engine::engine::Engine;
use crate::engine::llm_client::{GeminiClient, LoggingModel};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::conversation::ConversationSnapshot;
use crate::model::conversation_state::ConversationState;
use crate::model::message::Message;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::AppSettings;
use crate::ui::settings_io::save_settings;

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub input_text: String,
    pub snapshot: ConversationSnapshot,

    /// A turn is waiting on the model. Input is locked until it settles.
    pub pending: bool,
    pub should_auto_scroll: bool,

    pub show_settings: bool,
    pub settings_error: Option<String>,
}

impl UiState {
    /// Conversation state as the user should see it right now.
    pub fn displayed_state(&self) -> ConversationState {
        if self.pending {
            self.snapshot.state.while_pending()
        } else {
            self.snapshot.state
        }
    }
}

/* =========================
   App
   ========================= */

pub struct ScriptPmApp {
    pub ui: UiState,
    pub settings: AppSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl ScriptPmApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let model = LoggingModel::new(GeminiClient::new(settings.model.clone())?);
        let mut engine =
            Engine::new(cmd_rx, resp_tx, Box::new(model)).with_repaint(cc.egui_ctx.clone());
        let snapshot = engine.snapshot();

        std::thread::Builder::new()
            .name("conversation-engine".into())
            .spawn(move || engine.run())?;

        let mut app = Self {
            ui: UiState {
                snapshot,
                ..Default::default()
            },
            settings,
            cmd_tx,
            resp_rx,
        };

        app.send_command(EngineCommand::Kickstart);
        app.ui.pending = true;

        Ok(app)
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            tracing::error!("Conversation engine is gone");
        }
    }

    /// Free text and decision choices both land here.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if self.ui.pending || text.is_empty() {
            return;
        }

        // Shown right away; the engine's snapshot replaces it when the turn settles.
        self.ui.snapshot.messages.push(Message::user(text));
        self.ui.pending = true;
        self.ui.should_auto_scroll = true;

        self.send_command(EngineCommand::UserInput(text.to_string()));
    }

    fn poll_engine(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::TurnFinished(snapshot) => {
                    self.ui.snapshot = snapshot;
                    self.ui.pending = false;
                    self.ui.should_auto_scroll = true;
                }
                EngineResponse::SettingsRejected(reason) => {
                    self.ui.settings_error = Some(reason);
                    self.ui.show_settings = true;
                }
            }
        }
    }

    fn apply_settings(&mut self) {
        save_settings(&self.settings);
        self.ui.settings_error = None;
        self.send_command(EngineCommand::UpdateModelSettings(self.settings.model.clone()));
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for ScriptPmApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui.ui_scale);

        self.poll_engine();

        draw_header(ctx, &mut self.ui);
        self.draw_settings_window(ctx);
        draw_right_panel(ctx, &self.ui);
        draw_center_panel(ctx, self);

        self.ui.should_auto_scroll = false;
    }
}

fn draw_header(ctx: &egui::Context, ui_state: &mut UiState) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("AI Video Script Master");
                ui.weak("Co-create a high-converting product video plan with AI");
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙ Settings").clicked() {
                    ui_state.show_settings = true;
                }
                ui.label(ui_state.displayed_state().label());
            });
        });
        ui.add_space(4.0);
    });
}

impl ScriptPmApp {
    fn draw_settings_window(&mut self, ctx: &egui::Context) {
        let was_open = self.ui.show_settings;
        let mut open = self.ui.show_settings;

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let settings = &mut self.settings;

                ui.label("UI Scale");
                ui.add(egui::Slider::new(&mut settings.ui.ui_scale, 0.75..=2.0));

                ui.horizontal(|ui| {
                    for key in ["User", "Ai", "Decision"] {
                        let mut color = settings.ui.color(key);
                        ui.label(key);
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            settings.ui.set_color(key, color);
                        }
                    }
                });

                ui.separator();

                ui.label("Model");
                ui.text_edit_singleline(&mut settings.model.model);

                ui.label("Temperature");
                ui.add(egui::Slider::new(&mut settings.model.temperature, 0.0..=2.0));

                ui.label("API base URL");
                ui.text_edit_singleline(&mut settings.model.base_url);

                ui.label("API key environment variable");
                ui.text_edit_singleline(&mut settings.model.api_key_env);

                ui.label("Request timeout (s)");
                ui.add(egui::DragValue::new(&mut settings.model.timeout_secs).range(5..=600));

                if let Some(err) = &self.ui.settings_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
                }
            });

        self.ui.show_settings = open;
        if was_open && !open {
            self.apply_settings();
        }
    }
}
