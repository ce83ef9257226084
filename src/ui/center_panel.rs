use eframe::egui;
use egui::Layout;

use super::app::ScriptPmApp;
use super::settings::UiSettings;
use crate::model::message::{Message, Sender};

pub fn draw_center_panel(ctx: &egui::Context, app: &mut ScriptPmApp) {
    let input_id = egui::Id::new("chat_input_box");
    let pending = app.ui.pending;

    // ---------- Input bar ----------
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        let mut send_now = false;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                !pending,
                egui::TextEdit::multiline(&mut app.ui.input_text)
                    .id(input_id)
                    .desired_rows(2)
                    .desired_width(ui.available_width() - 70.0)
                    .hint_text("Tell me about your idea…"),
            );

            // Enter sends, Shift+Enter inserts a newline
            if response.has_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift)
            {
                send_now = true;
            }

            let can_send = !pending && !app.ui.input_text.trim().is_empty();
            if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                send_now = true;
            }
        });
        ui.add_space(4.0);

        if send_now && !pending {
            let text = app.ui.input_text.trim().to_string();

            if !text.is_empty() {
                app.submit(&text);
                app.ui.input_text.clear();
            }

            ui.memory_mut(|m| m.request_focus(input_id));
        }
    });

    // ---------- Chat history ----------
    let mut chosen: Option<String> = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(app.ui.should_auto_scroll)
            .show(ui, |ui| {
                for msg in &app.ui.snapshot.messages {
                    if let Some(choice) = draw_message(ui, &app.settings.ui, msg, pending) {
                        chosen = Some(choice);
                    }
                }

                if pending {
                    ui.add_space(6.0);
                    bubble(ui, app.settings.ui.color("Ai"), |ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Thinking…");
                        });
                    });
                }
            });
    });

    if let Some(choice) = chosen {
        app.submit(&choice);
    }
}

/// Returns the option the user clicked, if any.
fn draw_message(
    ui: &mut egui::Ui,
    settings: &UiSettings,
    msg: &Message,
    pending: bool,
) -> Option<String> {
    let mut chosen = None;

    ui.add_space(6.0);

    let mut contents = |ui: &mut egui::Ui| {
        ui.label(egui::RichText::new(msg.text.as_str()).color(egui::Color32::WHITE));

        if let Some(decision) = &msg.decision {
            ui.add_space(6.0);
            for option in &decision.options {
                let button = egui::Button::new(option.as_str()).fill(settings.color("Decision"));
                if ui.add_enabled(!pending, button).clicked() {
                    chosen = Some(option.clone());
                }
            }
        }
    };

    match msg.sender {
        Sender::User => {
            ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, settings.color("User"), &mut contents);
            });
        }
        Sender::Ai => bubble(ui, settings.color("Ai"), &mut contents),
    }

    chosen
}

fn bubble(ui: &mut egui::Ui, color: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_max_width(420.0);
            add_contents(ui);
        });
}
