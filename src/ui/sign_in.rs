//! Sign-in screen.

use eframe::egui::{self, Key, RichText, Ui};
use egui_phosphor::regular::{EYE, EYE_CLOSED};

use super::app::{App, Screen};
use super::components::{form_heading, loading_button};

const FORM_WIDTH: f32 = 360.0;

/// Show the sign-in form.
///
/// Returns `Some(screen)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let mut next = None;
    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.set_max_width(FORM_WIDTH);

        form_heading(ui, "Sign in", None);

        let form = &mut app.sign_in;

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.label("Email address");
            ui.add(
                egui::TextEdit::singleline(&mut form.email)
                    .desired_width(f32::INFINITY)
                    .hint_text("name@university.edu"),
            );
            ui.add_space(16.0);

            ui.label("Password");
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut form.password)
                        .password(!form.show_password)
                        .desired_width(FORM_WIDTH - 40.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    submit = true;
                }

                let icon = if form.show_password { EYE } else { EYE_CLOSED };
                if ui.button(icon).on_hover_text("Show password").clicked() {
                    form.show_password = !form.show_password;
                }
            });
            ui.add_space(24.0);
        });

        if loading_button(ui, "Sign in", form.loading) {
            submit = true;
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Have a one-time code?").weak());
            if ui.link("Verify OTP").clicked() {
                next = Some(Screen::Otp);
            }
        });
    });

    if submit {
        app.sign_in();
    }

    next
}
