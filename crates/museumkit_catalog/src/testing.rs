//! Test fixtures shared by the module tests.

use std::path::Path;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

/// Write a one-sheet workbook; numeric-looking cells are stored as numbers,
/// `YYYY-MM-DD` cells as date-formatted serials, and empty strings leave the
/// cell blank.
pub(crate) fn write_xlsx_fixture(path: &Path, sheet_name: &str, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).expect("sheet name");
    let format_date = Format::new().set_num_format("yyyy-mm-dd");

    for (n_row, l_cells) in rows.iter().enumerate() {
        for (n_col, c_value) in l_cells.iter().enumerate() {
            if c_value.is_empty() {
                continue;
            }
            let n_row = n_row as u32;
            let n_col = n_col as u16;
            if is_iso_date(c_value) {
                let date = ExcelDateTime::parse_from_str(c_value).expect("fixture date");
                worksheet
                    .write_datetime_with_format(n_row, n_col, &date, &format_date)
                    .expect("write date");
                continue;
            }
            match c_value.parse::<f64>() {
                Ok(x) => worksheet.write_number(n_row, n_col, x),
                Err(_) => worksheet.write_string(n_row, n_col, *c_value),
            }
            .expect("write cell");
        }
    }

    workbook.save(path).expect("save workbook");
}

fn is_iso_date(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, ch)| i == 4 || i == 7 || ch.is_ascii_digit())
}
