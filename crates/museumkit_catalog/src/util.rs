//! Stateless helper utilities shared by the sheet reader and the row pipeline.

use calamine::{Data, ExcelDateTime};
use chrono::NaiveTime;

use crate::conf::{CH_COLUMN_MAX, CH_COLUMN_MIN, N_IDX_COLUMN_NAME};
use crate::spec::{ItemIdError, SpecPipelineOptions};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnRange

/// Expand an inclusive single-letter column range (`'A'..='D'`) to its letters.
pub fn derive_column_letters(column_from: char, column_to: char) -> Result<Vec<char>, String> {
    for ch_column in [column_from, column_to] {
        if !(CH_COLUMN_MIN..=CH_COLUMN_MAX).contains(&ch_column) {
            return Err(format!(
                "Column {ch_column:?} must be a single letter {CH_COLUMN_MIN}..{CH_COLUMN_MAX}."
            ));
        }
    }
    if column_from > column_to {
        return Err(format!(
            "Column range is reversed: {column_from}..{column_to}."
        ));
    }

    Ok((column_from..=column_to).collect())
}

/// Zero-based worksheet column index of a column letter.
pub fn derive_column_index(column: char) -> u32 {
    column as u32 - CH_COLUMN_MIN as u32
}

/// Spreadsheet cell address, e.g. `C7`.
pub fn derive_cell_axis(column: char, row: u32) -> String {
    format!("{column}{row}")
}

/// Validate pipeline options and return the column letters they span.
pub fn validate_pipeline_options(options: &SpecPipelineOptions) -> Result<Vec<char>, String> {
    let l_columns = derive_column_letters(options.column_from, options.column_to)?;
    if l_columns.len() <= N_IDX_COLUMN_NAME {
        return Err(format!(
            "Column range {}..{} must span at least an identifier and a name column.",
            options.column_from, options.column_to
        ));
    }
    if options.n_rows_max == 0 {
        return Err("Arg `n_rows_max` must be >= 1.".to_string());
    }
    if options.cell_delimiter.is_whitespace() {
        return Err("Cell delimiter must not be whitespace.".to_string());
    }
    Ok(l_columns)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ValueConversion

/// Parse an identifier cell as a positive integer.
pub fn parse_item_id(value: &str) -> Result<u64, ItemIdError> {
    let c_value = value.trim();
    if c_value.is_empty() {
        return Err(ItemIdError::Empty);
    }
    match c_value.parse::<u64>() {
        Ok(n_id) if n_id > 0 => Ok(n_id),
        _ => Err(ItemIdError::NotPositiveInteger {
            value: value.to_string(),
        }),
    }
}

/// Render a spreadsheet value as cell text; spreadsheet errors return `Err`.
///
/// Whole floats print without a fractional part so numeric identifiers
/// (`7.0`) read back as `7`.
pub fn convert_data_to_text(value: &Data) -> Result<String, String> {
    match value {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.clone()),
        Data::Int(n) => Ok(n.to_string()),
        Data::Float(x) => Ok(convert_float_to_text(*x)),
        Data::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Ok(convert_datetime_to_text(dt)),
        Data::DateTimeIso(s) => Ok(s.clone()),
        Data::DurationIso(s) => Ok(s.clone()),
        Data::Error(e) => Err(e.to_string()),
    }
}

/// ISO date (`%Y-%m-%d`), with `T%H:%M:%S` appended unless the time is midnight.
///
/// Durations and serials outside the calendar keep their numeric form.
fn convert_datetime_to_text(dt: &ExcelDateTime) -> String {
    let ndt = match dt.as_datetime() {
        Some(ndt) if !dt.is_duration() => ndt,
        _ => return convert_float_to_text(dt.as_f64()),
    };
    if ndt.time() == NaiveTime::MIN {
        ndt.format("%Y-%m-%d").to_string()
    } else {
        ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

fn convert_float_to_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{}", x as i64);
    }
    x.to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
