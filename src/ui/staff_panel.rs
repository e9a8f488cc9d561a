//! Staff list with search, sortable columns, selection, pagination, and a
//! registration dialog.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{CARET_DOWN, CARET_UP, FILE_XLS, MAGNIFYING_GLASS, PLUS, SIGN_OUT};
use tracing::{error, info};

use super::app::{App, StaffForm, StaffFormField, StaffPanelState};
use super::components::{colors, primary_button_with_icon, styled_button, styled_button_with_icon};
use crate::export::{export_staff_to_excel, generate_export_filename, show_save_dialog};
use crate::models::{CreateStaff, Role, StaffId};
use crate::table::{SortDirection, SortKey, all_ids, compose, last_page};

const ROW_HEIGHT: f32 = 32.0;
const NOT_FOUND_HEIGHT: f32 = 96.0;

/// Table interaction collected during rendering, applied afterwards.
enum TableAction {
    Sort(SortKey),
    SelectRow(StaffId),
    SelectAll(bool),
    ChangePage(usize),
    ChangeRowsPerPage(usize),
}

/// Show the staff panel.
///
/// Returns `true` if sign-out was requested.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let rows_per_page_options = app.config.table.rows_per_page_options.clone();
    let Some(state) = app.staff.as_mut() else {
        return false;
    };

    let mut sign_out = false;
    let mut export = false;

    state.clamp_page();

    ui.horizontal(|ui| {
        ui.heading(RichText::new("Staff").size(24.0));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if styled_button_with_icon(ui, SIGN_OUT, "Sign out").clicked() {
                sign_out = true;
            }
            ui.add_space(10.0);
            if primary_button_with_icon(ui, PLUS, "New staff").clicked() {
                state.form.open();
            }
        });
    });
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);

    // Toolbar
    ui.horizontal(|ui| {
        let selected = state.table.selected().len();
        if selected > 0 {
            ui.label(RichText::new(format!("{selected} selected")).strong());
            ui.add_space(20.0);
        }

        ui.label(MAGNIFYING_GLASS);
        let mut query = state.filter_text.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .desired_width(260.0)
                .hint_text("Search staff..."),
        );
        if response.changed() {
            state.set_filter(query);
        }

        ui.add_space(10.0);
        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            export = true;
        }
    });

    ui.add_space(15.0);

    let mut actions = show_table(state, ui);
    show_pagination(state, ui, &rows_per_page_options, &mut actions);

    for action in actions {
        match action {
            TableAction::Sort(key) => state.table.on_sort(key),
            TableAction::SelectRow(id) => state.table.on_select_row(&id),
            TableAction::SelectAll(checked) => state.table.on_select_all_rows(checked, all_ids(&state.records)),
            TableAction::ChangePage(page) => state.table.on_change_page(page),
            TableAction::ChangeRowsPerPage(rows) => state.table.on_change_rows_per_page(rows),
        }
    }

    let submitted = if state.form.is_open {
        show_form_dialog(&mut state.form, ui.ctx())
    } else {
        None
    };

    if let Some(data) = submitted {
        app.create_staff(data);
    }
    if export {
        export_rows(app);
    }

    sign_out
}

fn sort_label(key: SortKey, active: Option<SortKey>, direction: SortDirection) -> String {
    if active != Some(key) {
        return key.label().to_string();
    }
    let arrow = match direction {
        SortDirection::Ascending => CARET_UP,
        SortDirection::Descending => CARET_DOWN,
    };
    format!("{} {}", key.label(), arrow)
}

fn show_table(state: &StaffPanelState, ui: &mut Ui) -> Vec<TableAction> {
    let page = compose(&state.records, &state.filter_text, &state.table);
    let mut actions = Vec::new();

    let total = state.records.len();
    let num_selected = state.table.selected().len();

    TableBuilder::new(ui)
        .id_salt("staff_table")
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(36.0))
        .column(Column::remainder().at_least(240.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(120.0))
        .header(28.0, |mut header| {
            header.col(|ui| {
                let mut all = total > 0 && num_selected == total;
                let partial = num_selected > 0 && num_selected < total;
                if ui
                    .add(egui::Checkbox::without_text(&mut all).indeterminate(partial))
                    .changed()
                {
                    actions.push(TableAction::SelectAll(all));
                }
            });
            for key in SortKey::ALL {
                header.col(|ui| {
                    let label = sort_label(key, state.table.sort_key(), state.table.direction());
                    if ui
                        .add(egui::Button::new(RichText::new(label).strong()).frame(false))
                        .clicked()
                    {
                        actions.push(TableAction::Sort(key));
                    }
                });
            }
        })
        .body(|mut body| {
            if page.not_found {
                body.row(NOT_FOUND_HEIGHT, |mut row| {
                    row.col(|_| {});
                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new("Not found").size(18.0).strong());
                            ui.label(format!("No results found for \"{}\".", state.filter_text));
                            ui.label(RichText::new("Try checking for typos or using complete words.").weak());
                        });
                    });
                });
                return;
            }

            for record in &page.rows {
                let selected = state.table.is_selected(&record.id);
                body.row(ROW_HEIGHT, |mut row| {
                    row.set_selected(selected);
                    row.col(|ui| {
                        let mut checked = selected;
                        if ui.checkbox(&mut checked, "").changed() {
                            actions.push(TableAction::SelectRow(record.id.clone()));
                        }
                    });
                    row.col(|ui| {
                        ui.label(&record.email);
                    });
                    row.col(|ui| {
                        ui.label(&record.faculty);
                    });
                    row.col(|ui| {
                        ui.label(&record.department);
                    });
                    row.col(|ui| {
                        let color = match record.role {
                            Role::SuperAdmin => colors::SUCCESS,
                            Role::Staff => colors::NEUTRAL,
                        };
                        ui.colored_label(color, record.role.as_str());
                    });
                });
            }

            for _ in 0..page.empty_rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|_| {});
                });
            }
        });

    actions
}

fn show_pagination(state: &StaffPanelState, ui: &mut Ui, options: &[usize], actions: &mut Vec<TableAction>) {
    let count = state.visible_rows().len();
    let page = state.table.page();
    let rows_per_page = state.table.rows_per_page();

    let (from, to) = if count == 0 {
        (0, 0)
    } else {
        (page * rows_per_page + 1, ((page + 1) * rows_per_page).min(count))
    };

    ui.add_space(10.0);
    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        if ui
            .add_enabled(page < last_page(count, rows_per_page), egui::Button::new("Next"))
            .clicked()
        {
            actions.push(TableAction::ChangePage(page + 1));
        }
        if ui.add_enabled(page > 0, egui::Button::new("Previous")).clicked() {
            actions.push(TableAction::ChangePage(page - 1));
        }

        ui.add_space(10.0);
        ui.label(format!("{from}–{to} of {count}"));
        ui.add_space(20.0);

        egui::ComboBox::from_id_salt("staff_rows_per_page")
            .width(60.0)
            .selected_text(rows_per_page.to_string())
            .show_ui(ui, |ui| {
                for &option in options {
                    if ui.selectable_label(option == rows_per_page, option.to_string()).clicked() {
                        actions.push(TableAction::ChangeRowsPerPage(option));
                    }
                }
            });
        ui.label("Rows per page:");
    });
}

/// Registration dialog. Returns the captured values on submit.
fn show_form_dialog(form: &mut StaffForm, ctx: &egui::Context) -> Option<CreateStaff> {
    let mut updates = Vec::new();
    let mut cancel = false;
    let mut submit = false;

    egui::Window::new("Register Staff")
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("staff_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Email:");
                    let mut email = form.email.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut email).desired_width(260.0))
                        .changed()
                    {
                        updates.push(StaffFormField::Email(email));
                    }
                    ui.end_row();

                    ui.label("Password:");
                    let mut password = form.password.clone();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut password)
                                .password(true)
                                .desired_width(260.0),
                        )
                        .changed()
                    {
                        updates.push(StaffFormField::Password(password));
                    }
                    ui.end_row();

                    ui.label("Role:");
                    egui::ComboBox::from_id_salt("staff_form_role")
                        .width(180.0)
                        .selected_text(form.role.as_str())
                        .show_ui(ui, |ui| {
                            for role in Role::ALL {
                                if ui.selectable_label(form.role == role, role.as_str()).clicked() {
                                    updates.push(StaffFormField::Role(role));
                                }
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    cancel = true;
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Register").clicked() {
                        submit = true;
                    }
                });
            });
        });

    for update in updates {
        form.update(update);
    }

    if submit {
        let data = form.to_create();
        form.reset();
        return Some(data);
    }
    if cancel {
        form.close();
    }
    None
}

fn export_rows(app: &mut App) {
    let Some(state) = app.staff.as_ref() else {
        return;
    };

    let rows = state.rows_for_export();
    if rows.is_empty() {
        app.error_message = Some("No staff to export".to_string());
        return;
    }

    let filename = generate_export_filename("staff");
    let Some(path) = show_save_dialog(&filename) else {
        return;
    };

    match export_staff_to_excel(&rows, &path) {
        Ok(()) => {
            info!("Exported {} staff rows to {}", rows.len(), path.display());
            app.success_message = Some(format!("Exported {} staff to {}", rows.len(), path.display()));
        }
        Err(e) => {
            error!("Export failed: {}", e);
            app.error_message = Some(format!("Export failed: {}", e));
        }
    }
}
