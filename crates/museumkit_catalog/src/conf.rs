//! Catalogue constants and default preset factories.

use std::path::PathBuf;

use crate::spec::SpecSiteOptions;

/// Literal tag opening an image cell (`pic<SEP><alt><SEP><url>`).
pub const C_CELL_TAG_IMAGE: &str = "pic";
/// Prefix opening a rotating reel cell (`rotate!<frame spec>`).
pub const C_CELL_PREFIX_REEL: &str = "rotate!";
/// Token rendered in the label/value list in place of an image cell.
pub const C_CELL_PLACEHOLDER_IMAGE: &str = "pic";
/// Default delimiter between the parts of an image cell.
pub const CH_CELL_DELIMITER_DEFAULT: char = '!';

/// Character repeated once per digit of the first frame number.
pub const CH_FRAME_PLACEHOLDER: char = '#';
/// Frame range embedded in a reel frame spec, e.g. `0001..0042`.
pub const C_PATTERN_FRAME_RANGE: &str = r"(?P<start>[0-9]+)\.\.(?P<end>[0-9]+)";

/// First column letter read by default.
pub const CH_COLUMN_FROM_DEFAULT: char = 'A';
/// Last column letter read by default.
pub const CH_COLUMN_TO_DEFAULT: char = 'V';
/// Smallest accepted column letter.
pub const CH_COLUMN_MIN: char = 'A';
/// Largest accepted column letter.
pub const CH_COLUMN_MAX: char = 'Z';

/// 1-based sheet row holding the column labels.
pub const N_ROW_HEADER: u32 = 1;
/// 1-based sheet row holding the first item.
pub const N_ROW_DATA_FIRST: u32 = 2;
/// Last addressable worksheet row.
pub const N_ROW_SHEET_MAX: u32 = 1_048_576;
/// Offset of the identifier column inside the configured column range.
pub const N_IDX_COLUMN_ID: usize = 0;
/// Offset of the name column inside the configured column range.
pub const N_IDX_COLUMN_NAME: usize = 1;
/// Default ceiling on scanned data rows.
pub const N_ROWS_SCAN_MAX_DEFAULT: usize = 100_000;

/// Default output directory.
pub const C_DIR_OUT_DEFAULT: &str = "./generated";
/// File name of the generated index page.
pub const C_FILE_INDEX: &str = "index.html";
/// Extension of the generated item pages.
pub const C_EXT_ITEM: &str = "html";

/// Template name of the index page.
pub const C_TEMPLATE_INDEX: &str = "index.html";
/// Template name of the item pages.
pub const C_TEMPLATE_ITEM: &str = "item.html";
/// Built-in index page template.
pub const C_TEMPLATE_INDEX_DEFAULT: &str = include_str!("../templates/index.html");
/// Built-in item page template.
pub const C_TEMPLATE_ITEM_DEFAULT: &str = include_str!("../templates/item.html");

/// Build default site options for `path_file_in`.
pub fn derive_default_site_options(path_file_in: impl Into<PathBuf>) -> SpecSiteOptions {
    SpecSiteOptions::new(path_file_in)
}
