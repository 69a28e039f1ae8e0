//! Fixture helpers shared by unit tests

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// Write a workbook with a single worksheet filled from `rows`, starting at A1
///
/// Empty strings leave the cell blank.
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();

    for (r, row) in rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            worksheet.write_string(r as u32, c as u16, *text).unwrap();
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    workbook.save(path).unwrap();
}

/// List-shaped sheet with the given schema and data rows
pub fn write_list_sheet(path: &Path, output_name: &str, body: &[&[&str]]) {
    write_config_sheet(path, output_name, "列表", body);
}

/// Single-shaped sheet with the given key/type/value rows
pub fn write_single_sheet(path: &Path, output_name: &str, body: &[&[&str]]) {
    write_config_sheet(path, output_name, "单项", body);
}

fn write_config_sheet(path: &Path, output_name: &str, shape: &str, body: &[&[&str]]) {
    let name_row = ["name", output_name];
    let shape_row = ["type", shape];

    let mut rows: Vec<&[&str]> = Vec::with_capacity(body.len() + 3);
    rows.push(&name_row);
    rows.push(&shape_row);
    rows.push(&[]);
    rows.extend_from_slice(body);

    write_workbook(path, "Sheet1", &rows);
}
