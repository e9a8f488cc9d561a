//! One-time passcode screen with six digit cells and a resend countdown.

use eframe::egui::{self, Align, Event, Id, Key, RichText, TextStyle, Ui};
use tracing::debug;

use super::app::{App, Screen};
use super::components::{form_heading, loading_button};
use crate::otp::OTP_LENGTH;

const CELL_WIDTH: f32 = 40.0;
const CELL_SPACING: f32 = 12.0;

fn cell_id(index: usize) -> Id {
    Id::new(("otp_cell", index))
}

/// Pull a paste event out of the input queue so no single cell receives it.
fn take_paste(ui: &mut Ui) -> Option<String> {
    ui.input_mut(|input| {
        let mut pasted = None;
        input.events.retain(|event| match event {
            Event::Paste(text) => {
                pasted = Some(text.clone());
                false
            }
            _ => true,
        });
        pasted
    })
}

/// Show the OTP form.
///
/// Returns `Some(screen)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let Some(otp) = app.otp.as_mut() else {
        return Some(Screen::SignIn);
    };

    let mut next = None;
    let mut verify = false;
    let mut resend = false;

    let focused = ui.memory(|m| m.focused());
    let cell_focused = (0..OTP_LENGTH).any(|i| focused == Some(cell_id(i)));
    if cell_focused
        && let Some(text) = take_paste(ui)
        && !otp.input.paste(&text)
    {
        debug!("Ignoring pasted text that is not all digits");
    }

    if let Some(index) = otp.input.take_focus_request() {
        ui.memory_mut(|m| m.request_focus(cell_id(index)));
    }

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.set_max_width(360.0);

        form_heading(ui, "Verify OTP", Some("Enter the 6-digit code we sent to your email"));

        let row_width = CELL_WIDTH * OTP_LENGTH as f32 + CELL_SPACING * (OTP_LENGTH - 1) as f32;
        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
            ui.spacing_mut().item_spacing.x = CELL_SPACING;

            for index in 0..OTP_LENGTH {
                let mut value = otp.input.cells()[index].clone();
                let was_empty = value.is_empty();

                let response = ui.add(
                    egui::TextEdit::singleline(&mut value)
                        .id(cell_id(index))
                        .desired_width(CELL_WIDTH)
                        .font(TextStyle::Heading)
                        .horizontal_align(Align::Center),
                );

                if response.changed() {
                    otp.input.set_cell(index, &value);
                }
                if response.has_focus() && was_empty && ui.input(|i| i.key_pressed(Key::Backspace)) {
                    otp.input.backspace_on_empty(index);
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    verify = true;
                }
            }
        });

        ui.add_space(24.0);

        if loading_button(ui, "Verify", otp.loading) {
            verify = true;
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Did not receive the code?").weak());
            if otp.countdown.resend_enabled() {
                if ui.add_enabled(!otp.loading, egui::Link::new("Resend")).clicked() {
                    resend = true;
                }
            } else {
                ui.label(RichText::new(format!("Resend in {}s", otp.countdown.remaining())).weak());
            }
        });

        ui.add_space(8.0);
        if ui.link("Back to sign in").clicked() {
            next = Some(Screen::SignIn);
        }
    });

    // focus moves on the next frame
    if app.otp.as_ref().is_some_and(|otp| otp.input.has_focus_request()) {
        ui.ctx().request_repaint();
    }

    if verify {
        app.verify_otp();
    }
    if resend {
        app.resend_otp();
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::test_app;

    fn key_event(key: Key) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Default::default(),
        }
    }

    fn run_frame(ctx: &egui::Context, app: &mut App, events: Vec<Event>, focus: Option<usize>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(index) = focus {
                    ui.memory_mut(|m| m.request_focus(cell_id(index)));
                }
                show(app, ui);
            });
        });
    }

    #[test]
    fn test_enter_in_focused_cell_submits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);
        let ctx = egui::Context::default();

        run_frame(&ctx, &mut app, Vec::new(), Some(0));
        assert!(app.error_message.is_none());

        run_frame(&ctx, &mut app, vec![key_event(Key::Enter)], None);
        assert_eq!(app.error_message.as_deref(), Some("Please enter the complete 6-digit OTP"));
    }

    #[test]
    fn test_enter_without_focus_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);
        let ctx = egui::Context::default();

        run_frame(&ctx, &mut app, Vec::new(), None);
        run_frame(&ctx, &mut app, vec![key_event(Key::Enter)], None);
        assert!(app.error_message.is_none());
    }
}
