//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a centered form heading with an optional subtitle.
pub fn form_heading(ui: &mut Ui, title: &str, subtitle: Option<&str>) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(title).size(24.0).strong());
        if let Some(subtitle) = subtitle {
            ui.add_space(6.0);
            ui.label(RichText::new(subtitle).weak());
        }
    });
    ui.add_space(24.0);
}

/// Plain text button.
pub fn styled_button(ui: &mut Ui, label: &str) -> Response {
    ui.button(RichText::new(label).size(14.0))
}

/// Regular button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {label}")).size(14.0))
}

/// Filled button used for the main action of a panel.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    let text = if icon.is_empty() {
        label.to_string()
    } else {
        format!("{icon} {label}")
    };
    ui.add(
        egui::Button::new(RichText::new(text).size(14.0).color(Color32::WHITE))
            .fill(Color32::from_rgb(33, 43, 54)),
    )
}

/// Full-width submit button, disabled with a spinner while `loading` is set.
pub fn loading_button(ui: &mut Ui, label: &str, loading: bool) -> bool {
    let size = egui::vec2(ui.available_width(), 36.0);
    let response = ui
        .add_enabled_ui(!loading, |ui| {
            ui.add_sized(size, egui::Button::new(RichText::new(label).size(15.0).strong()))
        })
        .inner;
    if loading {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| ui.spinner());
    }
    response.clicked()
}

/// Blocking alert window. Returns `true` when dismissed.
pub fn alert_dialog(ctx: &egui::Context, title: &str, message: &str, color: Color32) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(color, message);
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}
