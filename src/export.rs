//! Excel export of staff rows.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::StaffRecord;

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Export staff rows to an Excel file, in the given order.
pub fn export_staff_to_excel(staff: &[&StaffRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Staff")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let headers = ["Email", "Faculty", "Department", "Role"];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_column_width(0, 35)?; // Email
    worksheet.set_column_width(1, 20)?; // Faculty
    worksheet.set_column_width(2, 25)?; // Department
    worksheet.set_column_width(3, 14)?; // Role

    for (idx, record) in staff.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.email)?;
        worksheet.write_string(row, 1, &record.faculty)?;
        worksheet.write_string(row, 2, &record.department)?;
        worksheet.write_string(row, 3, record.role.as_str())?;
    }

    if !staff.is_empty() {
        let last_row = staff.len() as u32;
        worksheet.autofilter(0, 0, last_row, 3)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
