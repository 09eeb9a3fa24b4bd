//! Catalogue specification models, render payloads and error types.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::conf::{
    C_DIR_OUT_DEFAULT, CH_CELL_DELIMITER_DEFAULT, CH_COLUMN_FROM_DEFAULT, CH_COLUMN_TO_DEFAULT,
    N_ROWS_SCAN_MAX_DEFAULT,
};

////////////////////////////////////////////////////////////////////////////////
// #region RunOptions

/// Options steering one [`crate::pipeline::RowPipeline`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPipelineOptions {
    /// First column letter read (inclusive). Holds the item identifier.
    pub column_from: char,
    /// Last column letter read (inclusive).
    pub column_to: char,
    /// Delimiter between the parts of an image cell.
    pub cell_delimiter: char,
    /// Interpret `rotate!` cells as image reels.
    pub if_parse_reels: bool,
    /// Ceiling on scanned data rows.
    pub n_rows_max: usize,
}

impl Default for SpecPipelineOptions {
    fn default() -> Self {
        Self {
            column_from: CH_COLUMN_FROM_DEFAULT,
            column_to: CH_COLUMN_TO_DEFAULT,
            cell_delimiter: CH_CELL_DELIMITER_DEFAULT,
            if_parse_reels: true,
            n_rows_max: N_ROWS_SCAN_MAX_DEFAULT,
        }
    }
}

/// Input/output locations plus pipeline options for [`crate::generate_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSiteOptions {
    /// Workbook to read.
    pub path_file_in: PathBuf,
    /// Directory receiving `<id>.html` and `index.html`.
    pub path_dir_out: PathBuf,
    /// Worksheet to read; first worksheet when `None`.
    pub sheet_name: Option<String>,
    /// Directory with `index.html` / `item.html` overriding the built-in templates.
    pub path_dir_templates: Option<PathBuf>,
    /// Row/cell handling options.
    pub pipeline: SpecPipelineOptions,
}

impl SpecSiteOptions {
    /// Options reading `path_file_in` with every other setting at its default.
    pub fn new(path_file_in: impl Into<PathBuf>) -> Self {
        Self {
            path_file_in: path_file_in.into(),
            path_dir_out: PathBuf::from(C_DIR_OUT_DEFAULT),
            sheet_name: None,
            path_dir_templates: None,
            pipeline: SpecPipelineOptions::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellModels

/// Picture reference carried by a `pic<SEP><alt><SEP><url>` cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpecImageRef {
    /// Alternative text.
    pub alt_text: String,
    /// Image location.
    pub url: String,
}

/// Numbered frame sequence carried by a `rotate!<frame spec>` cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpecRotatingReel {
    /// Path of the first frame, e.g. `lens0001.jpg`.
    pub first_frame: String,
    /// Placeholder pattern plus range, e.g. `lens####.jpg|0001..0010`.
    pub frame_pattern: String,
}

/// Classified cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCellKind {
    /// Rendered verbatim.
    Plain(String),
    /// Rendered as the `pic` placeholder; picture goes to the payload.
    Image(SpecImageRef),
    /// Not rendered as a row; reel goes to the payload.
    Reel(SpecRotatingReel),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderPayloads

/// Structural position of an item inside the generated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EnumItemPosition {
    /// First generated item.
    #[serde(rename = "first")]
    First,
    /// Any item between first and last.
    #[default]
    #[serde(rename = "")]
    Middle,
    /// Item right before the empty identifier sentinel.
    #[serde(rename = "last")]
    Last,
}

impl EnumItemPosition {
    /// Marker text exposed to templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Middle => "",
            Self::Last => "last",
        }
    }
}

/// One `(label, value)` line of an item page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecTableRow {
    /// Column label from the header row.
    pub label: String,
    /// Rendered cell value.
    pub value: String,
}

/// Template context of one item page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpecRenderPayload {
    /// Item identifier.
    pub id: u64,
    /// Item name.
    pub name: String,
    /// Label/value lines in header order, reel cells excluded.
    pub rows: Vec<SpecTableRow>,
    /// Navigation marker.
    pub position: EnumItemPosition,
    /// Image location, empty when the row has no valid image cell.
    pub img_url: String,
    /// Image alternative text.
    pub img_alt: String,
    /// First reel frame, empty when the row has no valid reel cell.
    pub rotate_first: String,
    /// Reel frame pattern with range.
    pub rotate_reel: String,
    /// Identifier of the previously written item.
    pub prev_id: Option<u64>,
    /// Identifier of the following row, when it parses.
    pub next_id: Option<u64>,
}

impl SpecRenderPayload {
    /// Copy picture fields into the payload.
    pub fn set_image(&mut self, image: SpecImageRef) {
        self.img_alt = image.alt_text;
        self.img_url = image.url;
    }

    /// Copy reel fields into the payload.
    pub fn set_reel(&mut self, reel: SpecRotatingReel) {
        self.rotate_first = reel.first_frame;
        self.rotate_reel = reel.frame_pattern;
    }
}

/// One line of the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecIndexEntry {
    /// Item identifier, also the page file stem.
    pub id: u64,
    /// Item name.
    pub name: String,
}

/// Template context of the index page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpecIndexPayload {
    /// Entries sorted by identifier.
    pub items: Vec<SpecIndexEntry>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Top-level failures aborting a whole run.
#[derive(Debug, Error)]
pub enum SiteBuildError {
    /// Options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// Workbook could not be opened.
    #[error("Failed to open workbook {}: {message}", path.display())]
    OpenWorkbook {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Requested worksheet does not exist or cannot be loaded.
    #[error("Worksheet not readable: {name} ({message})")]
    SheetNotFound {
        /// Worksheet name.
        name: String,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook has no worksheet.
    #[error("Workbook has no worksheet: {}", .0.display())]
    EmptyWorkbook(PathBuf),
    /// Output directory could not be prepared.
    #[error("Failed to initialize output directory {}: {message}", path.display())]
    OutputInit {
        /// Output directory.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Templates could not be loaded or compiled.
    #[error("Failed to load templates: {0}")]
    TemplateInit(String),
    /// Cell pattern could not be compiled.
    #[error("Invalid cell pattern: {0}")]
    InvalidPattern(String),
}

/// Failure reading one cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetReadError {
    /// Cell holds a spreadsheet error value.
    #[error("Cell {axis} holds an error value: {detail}")]
    CellError {
        /// Cell address, e.g. `C7`.
        axis: String,
        /// Error value text.
        detail: String,
    },
}

/// Failure interpreting one cell's micro-syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellParseError {
    /// Image cell split into fewer than three parts.
    #[error("Malformed image cell {value:?}: expected 3 parts, found {n_parts}")]
    MalformedImage {
        /// Raw cell value.
        value: String,
        /// Number of parts found.
        n_parts: usize,
    },
    /// Reel cell without a `<start>..<end>` frame range.
    #[error("Reel cell {value:?} has no frame range like `0001..0042`")]
    MissingFrameRange {
        /// Raw cell value.
        value: String,
    },
}

/// Failure interpreting an identifier cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemIdError {
    /// Identifier cell is empty.
    #[error("Identifier is empty")]
    Empty,
    /// Identifier is not a positive integer.
    #[error("Identifier {value:?} is not a positive integer")]
    NotPositiveInteger {
        /// Raw identifier text.
        value: String,
    },
}

/// Failure publishing one page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Template rendering failed.
    #[error("Failed to render template {name}: {detail}")]
    Render {
        /// Template name.
        name: String,
        /// Engine error chain.
        detail: String,
    },
    /// Page could not be written.
    #[error("Failed to write {}: {detail}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying IO error text.
        detail: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_position_serializes_to_template_markers() {
        assert_eq!(EnumItemPosition::First.as_str(), "first");
        assert_eq!(EnumItemPosition::Middle.as_str(), "");
        assert_eq!(EnumItemPosition::Last.as_str(), "last");
        assert_eq!(EnumItemPosition::default(), EnumItemPosition::Middle);
    }

    #[test]
    fn render_payload_takes_image_and_reel_fields() {
        let mut payload = SpecRenderPayload::default();
        payload.set_image(SpecImageRef {
            alt_text: "Front view".to_string(),
            url: "images/front.png".to_string(),
        });
        payload.set_reel(SpecRotatingReel {
            first_frame: "lens0001.jpg".to_string(),
            frame_pattern: "lens####.jpg|0001..0010".to_string(),
        });

        assert_eq!(payload.img_alt, "Front view");
        assert_eq!(payload.img_url, "images/front.png");
        assert_eq!(payload.rotate_first, "lens0001.jpg");
        assert_eq!(payload.rotate_reel, "lens####.jpg|0001..0010");
    }

    #[test]
    fn site_options_default_to_generated_dir() {
        let options = SpecSiteOptions::new("catalogue.xlsx");
        assert_eq!(options.path_dir_out, PathBuf::from("./generated"));
        assert_eq!(options.pipeline.column_from, 'A');
        assert_eq!(options.pipeline.column_to, 'V');
        assert_eq!(options.pipeline.cell_delimiter, '!');
        assert!(options.pipeline.if_parse_reels);
        assert!(options.sheet_name.is_none());
    }
}
