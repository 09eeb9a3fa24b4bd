//! Worksheet access: the [`SheetSource`] seam and its calamine-backed reader.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::spec::{SheetReadError, SiteBuildError};
use crate::util::{convert_data_to_text, derive_cell_axis, derive_column_index};

/// Cell-level read access to one worksheet.
///
/// Rows are 1-based and columns are single letters, as in spreadsheet cell
/// addresses (`C7`). Cells outside the used area read as empty strings.
pub trait SheetSource {
    /// Read one cell as text.
    fn read_cell(&self, column: char, row: u32) -> Result<String, SheetReadError>;

    /// Read `columns` of `row`.
    ///
    /// Returns exactly one value per entry of `columns`, in order. Unreadable
    /// cells come back as empty strings; their errors are returned alongside
    /// so the caller can report them.
    fn read_row(&self, columns: &[char], row: u32) -> (Vec<String>, Vec<SheetReadError>) {
        let mut l_values = Vec::with_capacity(columns.len());
        let mut l_errors = Vec::new();
        for ch_column in columns {
            match self.read_cell(*ch_column, row) {
                Ok(value) => l_values.push(value),
                Err(e) => {
                    l_values.push(String::new());
                    l_errors.push(e);
                }
            }
        }
        (l_values, l_errors)
    }
}

/// Worksheet loaded into memory through calamine.
#[derive(Debug, Clone)]
pub struct XlsxSheet {
    sheet_name: String,
    range: Range<Data>,
}

impl XlsxSheet {
    /// Open `path` (any format calamine detects) and load one worksheet.
    ///
    /// `sheet_name = None` loads the first worksheet.
    pub fn open(path: &Path, sheet_name: Option<&str>) -> Result<Self, SiteBuildError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| SiteBuildError::OpenWorkbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let c_sheet_name = match sheet_name {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| SiteBuildError::EmptyWorkbook(path.to_path_buf()))?,
        };

        let range = workbook
            .worksheet_range(&c_sheet_name)
            .map_err(|e| SiteBuildError::SheetNotFound {
                name: c_sheet_name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self::from_range(c_sheet_name, range))
    }

    /// Wrap an already loaded cell range.
    pub fn from_range(sheet_name: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            range,
        }
    }

    /// Name of the loaded worksheet.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl SheetSource for XlsxSheet {
    fn read_cell(&self, column: char, row: u32) -> Result<String, SheetReadError> {
        let Some(n_row_idx) = row.checked_sub(1) else {
            return Ok(String::new());
        };
        match self
            .range
            .get_value((n_row_idx, derive_column_index(column)))
        {
            None => Ok(String::new()),
            Some(value) => {
                convert_data_to_text(value).map_err(|detail| SheetReadError::CellError {
                    axis: derive_cell_axis(column, row),
                    detail,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;
    use crate::testing::write_xlsx_fixture;

    #[test]
    fn xlsx_sheet_reads_cells_by_axis() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("catalogue.xlsx");
        write_xlsx_fixture(
            &path,
            "Lenses",
            &[&["ID", "Name", "Maker"], &["1", "Tessar", "Zeiss"], &["2", "Biotar"]],
        );

        let sheet = XlsxSheet::open(&path, None).expect("open sheet");
        assert_eq!(sheet.sheet_name(), "Lenses");
        assert_eq!(sheet.read_cell('A', 1), Ok("ID".to_string()));
        assert_eq!(sheet.read_cell('A', 2), Ok("1".to_string()));
        assert_eq!(sheet.read_cell('C', 2), Ok("Zeiss".to_string()));
        assert_eq!(sheet.read_cell('C', 3), Ok(String::new()));
        assert_eq!(sheet.read_cell('A', 40), Ok(String::new()));
        assert_eq!(sheet.read_cell('Z', 1), Ok(String::new()));
    }

    #[test]
    fn xlsx_sheet_reads_date_cells_as_iso_text() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("catalogue.xlsx");
        write_xlsx_fixture(
            &path,
            "Lenses",
            &[&["ID", "Acquired"], &["1", "1936-05-12"]],
        );

        let sheet = XlsxSheet::open(&path, None).expect("open sheet");
        assert_eq!(sheet.read_cell('B', 2), Ok("1936-05-12".to_string()));
    }

    #[test]
    fn xlsx_sheet_open_by_name_and_missing_sheet() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("catalogue.xlsx");
        write_xlsx_fixture(&path, "Lenses", &[&["ID", "Name"]]);

        let sheet = XlsxSheet::open(&path, Some("Lenses")).expect("open sheet");
        assert_eq!(sheet.read_cell('B', 1), Ok("Name".to_string()));

        let err = XlsxSheet::open(&path, Some("Cameras")).expect_err("missing sheet");
        assert!(matches!(err, SiteBuildError::SheetNotFound { .. }));
    }

    #[test]
    fn xlsx_sheet_open_missing_file_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = XlsxSheet::open(&tmp.path().join("absent.xlsx"), None).expect_err("no file");
        assert!(matches!(err, SiteBuildError::OpenWorkbook { .. }));
    }

    #[test]
    fn read_row_blanks_error_cells_and_reports_them() {
        let mut range = Range::new((0, 0), (1, 2));
        range.set_value((1, 0), Data::Float(3.0));
        range.set_value((1, 1), Data::Error(CellErrorType::Ref));
        range.set_value((1, 2), Data::String("Flektogon".to_string()));
        let sheet = XlsxSheet::from_range("Lenses", range);

        let (l_values, l_errors) = sheet.read_row(&['A', 'B', 'C'], 2);
        assert_eq!(l_values, vec!["3", "", "Flektogon"]);
        assert_eq!(l_errors.len(), 1);
        assert!(matches!(
            &l_errors[0],
            SheetReadError::CellError { axis, .. } if axis == "B2"
        ));
    }
}
