//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;
use museumkit_catalog::conf::{
    C_DIR_OUT_DEFAULT, CH_CELL_DELIMITER_DEFAULT, CH_COLUMN_FROM_DEFAULT, CH_COLUMN_TO_DEFAULT,
    N_ROWS_SCAN_MAX_DEFAULT,
};
use museumkit_catalog::{SpecSiteOptions, derive_default_site_options};

#[derive(Debug, Parser)]
#[command(name = "museumkit")]
#[command(about = "Generate static HTML catalogue pages from a museum item spreadsheet.")]
pub struct CliArgs {
    /// Workbook holding the catalogue (header in row 1, items from row 2).
    #[arg(long = "in", value_name = "PATH")]
    pub path_file_in: PathBuf,

    /// First column read; holds the item identifier.
    #[arg(
        long,
        alias = "fromColumn",
        default_value_t = CH_COLUMN_FROM_DEFAULT,
        value_parser = parse_column_letter
    )]
    pub from_column: char,

    /// Last column read (inclusive).
    #[arg(
        long,
        alias = "toColumn",
        default_value_t = CH_COLUMN_TO_DEFAULT,
        value_parser = parse_column_letter
    )]
    pub to_column: char,

    /// Output directory for `<id>.html` and `index.html`.
    #[arg(long = "out", value_name = "DIR", default_value = C_DIR_OUT_DEFAULT)]
    pub path_dir_out: PathBuf,

    /// Worksheet name; the first worksheet when omitted.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Directory with `index.html` / `item.html` templates overriding the built-in ones.
    #[arg(long = "templates", value_name = "DIR")]
    pub path_dir_templates: Option<PathBuf>,

    /// Delimiter between the parts of an image cell (`pic!alt!url`).
    #[arg(long, default_value_t = CH_CELL_DELIMITER_DEFAULT)]
    pub delimiter: char,

    /// Treat `rotate!` cells as plain text.
    #[arg(long)]
    pub no_reels: bool,

    /// Stop after scanning this many data rows.
    #[arg(long, default_value_t = N_ROWS_SCAN_MAX_DEFAULT)]
    pub max_rows: usize,
}

impl CliArgs {
    /// Convert flags into run options.
    pub fn into_site_options(self) -> SpecSiteOptions {
        let mut options = derive_default_site_options(self.path_file_in);
        options.path_dir_out = self.path_dir_out;
        options.sheet_name = self.sheet;
        options.path_dir_templates = self.path_dir_templates;
        options.pipeline.column_from = self.from_column;
        options.pipeline.column_to = self.to_column;
        options.pipeline.cell_delimiter = self.delimiter;
        options.pipeline.if_parse_reels = !self.no_reels;
        options.pipeline.n_rows_max = self.max_rows;
        options
    }
}

/// Accept one ASCII letter; lowercase is folded to uppercase.
fn parse_column_letter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => Ok(ch.to_ascii_uppercase()),
        _ => Err(format!("expected a single column letter A..Z, got {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_presets() {
        let args = CliArgs::try_parse_from(["museumkit", "--in", "lenses.xlsx"]).expect("parse");
        let options = args.into_site_options();

        assert_eq!(options.path_file_in, PathBuf::from("lenses.xlsx"));
        assert_eq!(options.path_dir_out, PathBuf::from("./generated"));
        assert_eq!(options.pipeline.column_from, 'A');
        assert_eq!(options.pipeline.column_to, 'V');
        assert_eq!(options.pipeline.cell_delimiter, '!');
        assert!(options.pipeline.if_parse_reels);
        assert_eq!(options.pipeline.n_rows_max, 100_000);
        assert!(options.sheet_name.is_none());
        assert!(options.path_dir_templates.is_none());
    }

    #[test]
    fn legacy_camel_case_column_flags_are_accepted() {
        let args = CliArgs::try_parse_from([
            "museumkit",
            "--in",
            "lenses.xlsx",
            "--fromColumn",
            "b",
            "--toColumn",
            "F",
        ])
        .expect("parse");
        assert_eq!(args.from_column, 'B');
        assert_eq!(args.to_column, 'F');
    }

    #[test]
    fn all_flags_reach_site_options() {
        let args = CliArgs::try_parse_from([
            "museumkit",
            "--in",
            "lenses.xlsx",
            "--out",
            "site",
            "--sheet",
            "Lenses",
            "--templates",
            "tpl",
            "--delimiter",
            "|",
            "--no-reels",
            "--max-rows",
            "50",
        ])
        .expect("parse");
        let options = args.into_site_options();

        assert_eq!(options.path_dir_out, PathBuf::from("site"));
        assert_eq!(options.sheet_name.as_deref(), Some("Lenses"));
        assert_eq!(options.path_dir_templates, Some(PathBuf::from("tpl")));
        assert_eq!(options.pipeline.cell_delimiter, '|');
        assert!(!options.pipeline.if_parse_reels);
        assert_eq!(options.pipeline.n_rows_max, 50);
    }

    #[test]
    fn column_flags_reject_multi_letter_values() {
        for l_flags in [["--to-column", "AA"], ["--from-column", "1"]] {
            let res = CliArgs::try_parse_from(
                ["museumkit", "--in", "x.xlsx"].into_iter().chain(l_flags),
            );
            assert!(res.is_err(), "{l_flags:?}");
        }
    }

    #[test]
    fn input_path_is_required() {
        assert!(CliArgs::try_parse_from(["museumkit"]).is_err());
    }
}
