use eframe::egui;

use super::app::UiState;
use crate::model::conversation_state::ConversationState;
use crate::model::script::{Scene, ScriptData};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(170, 120, 250);
const SCENE_ACCENT: egui::Color32 = egui::Color32::from_rgb(80, 200, 220);

pub fn draw_right_panel(ctx: &egui::Context, ui_state: &UiState) {
    egui::SidePanel::right("script")
        .resizable(true)
        .default_width(420.0)
        .min_width(300.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.heading("Video Production Brief");
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if ui_state.displayed_state() == ConversationState::GeneratingScript {
                        draw_loading(ui);
                    } else if let Some(script) = &ui_state.snapshot.script {
                        draw_script(ui, script);
                    } else {
                        draw_placeholder(ui);
                    }
                });
        });
}

fn draw_loading(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.add(egui::Spinner::new().size(48.0));
        ui.add_space(16.0);
        ui.heading("The expert team is planning your video…");
        ui.weak("Our marketing strategist, scriptwriter and visual director are deep in discussion. Hang tight.");
    });
}

fn draw_placeholder(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("📜").size(48.0));
        ui.heading("Video Production Brief");
        ui.weak("Finish the conversation on the left and your video plan will appear here.");
    });
}

fn draw_script(ui: &mut egui::Ui, script: &ScriptData) {
    section(ui, "👥 Target Audience", |ui| {
        ui.label(script.target_audience.as_str());
    });

    section(ui, "💡 Core Creative Hook", |ui| {
        ui.label(egui::RichText::new(format!("\"{}\"", script.core_creative_hook)).italics().size(16.0));
    });

    section(ui, "🎞 Storyline", |ui| {
        for scene in &script.storyline {
            scene_card(ui, scene);
            ui.add_space(6.0);
        }
    });

    section(ui, "💖 Emotional Value Points", |ui| {
        for point in &script.emotional_value_points {
            ui.label(format!("• {point}"));
        }
    });

    section(ui, "🚀 Call To Action", |ui| {
        ui.label(script.call_to_action.as_str());
    });
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .corner_radius(6)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(16.0).color(ACCENT));
            ui.add_space(4.0);
            add_contents(ui);
        });
    ui.add_space(10.0);
}

fn scene_card(ui: &mut egui::Ui, scene: &Scene) {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(1.0, SCENE_ACCENT))
        .corner_radius(4)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("🎬 Scene {}", scene.scene_number))
                    .strong()
                    .color(SCENE_ACCENT),
            );
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("Visuals:").weak());
                ui.label(scene.visuals.as_str());
            });
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("Dialogue / VO:").weak());
                ui.label(scene.dialogue.as_str());
            });
        });
}
