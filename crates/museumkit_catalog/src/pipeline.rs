//! Row-by-row site generation.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::cell::CellValueParser;
use crate::conf::{
    C_CELL_PLACEHOLDER_IMAGE, N_IDX_COLUMN_ID, N_IDX_COLUMN_NAME, N_ROW_DATA_FIRST, N_ROW_HEADER,
    N_ROW_SHEET_MAX,
};
use crate::render::{HtmlSiteWriter, SitePublisher};
use crate::report::{ReportSite, ReportSiteBuilder};
use crate::sheet::{SheetSource, XlsxSheet};
use crate::spec::{
    CellParseError, EnumCellKind, EnumItemPosition, SheetReadError, SiteBuildError,
    SpecImageRef, SpecIndexEntry, SpecIndexPayload, SpecPipelineOptions, SpecRenderPayload,
    SpecRotatingReel, SpecSiteOptions, SpecTableRow,
};
use crate::util::{derive_cell_axis, parse_item_id, validate_pipeline_options};

/// Generate the item pages and the index page described by `options`.
///
/// Returns [`SiteBuildError`] only for setup failures (options, workbook,
/// output directory, templates). Row and cell failures are logged and kept
/// in the returned [`ReportSite`].
pub fn generate_site(options: &SpecSiteOptions) -> Result<ReportSite, SiteBuildError> {
    validate_pipeline_options(&options.pipeline).map_err(SiteBuildError::InvalidOptions)?;

    let sheet = XlsxSheet::open(&options.path_file_in, options.sheet_name.as_deref())?;
    let mut writer = HtmlSiteWriter::new(
        &options.path_dir_out,
        options.path_dir_templates.as_deref(),
    )?;
    info!(
        workbook = %options.path_file_in.display(),
        sheet = sheet.sheet_name(),
        out = %writer.path_dir_out().display(),
        "Generating catalogue pages"
    );

    let report = RowPipeline::new(&sheet, &mut writer, &options.pipeline)?.run();
    info!("{report}");
    Ok(report)
}

/// Walks the data rows of one sheet and publishes one page per item plus the
/// index page.
///
/// Rows are read from row 2 until the identifier cell of the next row is
/// empty, or until `n_rows_max` rows have been scanned.
pub struct RowPipeline<'a, S, P>
where
    S: SheetSource + ?Sized,
    P: SitePublisher + ?Sized,
{
    sheet: &'a S,
    publisher: &'a mut P,
    parser: CellValueParser,
    l_columns: Vec<char>,
    n_rows_max: usize,
}

/// Mutable state carried across rows of one run.
#[derive(Debug, Default)]
struct SpecRunState {
    builder: ReportSiteBuilder,
    dict_index: BTreeMap<u64, String>,
    prev_id: Option<u64>,
    if_first_emitted: bool,
}

impl<'a, S, P> RowPipeline<'a, S, P>
where
    S: SheetSource + ?Sized,
    P: SitePublisher + ?Sized,
{
    /// Bind a sheet and a publisher under validated options.
    pub fn new(
        sheet: &'a S,
        publisher: &'a mut P,
        options: &SpecPipelineOptions,
    ) -> Result<Self, SiteBuildError> {
        let l_columns =
            validate_pipeline_options(options).map_err(SiteBuildError::InvalidOptions)?;
        Ok(Self {
            sheet,
            publisher,
            parser: CellValueParser::from_options(options)?,
            l_columns,
            n_rows_max: options.n_rows_max,
        })
    }

    /// Run the generation pass.
    pub fn run(mut self) -> ReportSite {
        let mut state = SpecRunState::default();
        let l_header = self.read_header(&mut state.builder);

        let mut n_row = N_ROW_DATA_FIRST;
        if is_sentinel(&self.probe_identifier(n_row)) {
            info!("No data rows found below the header");
        } else {
            loop {
                state.builder.add_scanned();
                let probe_next = self.probe_identifier(n_row + 1);
                let if_is_last = is_sentinel(&probe_next);
                let if_at_ceiling = !if_is_last
                    && (state.builder.cnt_rows_scanned >= self.n_rows_max as u64
                        || n_row >= N_ROW_SHEET_MAX);
                // No link to a row past the ceiling.
                let next_id = if if_at_ceiling {
                    None
                } else {
                    probe_next
                        .ok()
                        .flatten()
                        .and_then(|value| parse_item_id(&value).ok())
                };

                self.process_row(n_row, &l_header, if_is_last, next_id, &mut state);

                if if_is_last {
                    break;
                }
                if if_at_ceiling {
                    let c_msg = format!(
                        "Row ceiling reached at row {n_row} before an empty identifier cell; \
                         remaining rows ignored."
                    );
                    warn!(row = n_row, "{c_msg}");
                    state.builder.add_warning(c_msg);
                    state.builder.set_truncated();
                    break;
                }
                n_row += 1;
            }
        }

        self.publish_index(&mut state);
        state.builder.build()
    }

    fn read_header(&self, builder: &mut ReportSiteBuilder) -> Vec<String> {
        self.read_row_checked(N_ROW_HEADER, builder)
    }

    /// Read the configured columns of `n_row`, one value per column.
    ///
    /// Read errors are reported; a sheet returning the wrong number of values
    /// is reported and the row is padded or cut to the column count.
    fn read_row_checked(&self, n_row: u32, builder: &mut ReportSiteBuilder) -> Vec<String> {
        let (mut l_values, l_errors) = self.sheet.read_row(&self.l_columns, n_row);
        self.report_read_errors(n_row, l_errors, builder);

        let n_columns = self.l_columns.len();
        if l_values.len() != n_columns {
            let c_msg = format!(
                "Row {n_row}: sheet returned {} values for {n_columns} columns",
                l_values.len()
            );
            warn!(row = n_row, n_values = l_values.len(), n_columns, "Row width mismatch");
            builder.add_error(n_row, c_msg);
            l_values.resize(n_columns, String::new());
        }
        l_values
    }

    /// Identifier cell of `row`: `Ok(None)` when empty.
    fn probe_identifier(&self, row: u32) -> Result<Option<String>, SheetReadError> {
        let ch_column_id = self.l_columns[N_IDX_COLUMN_ID];
        self.sheet
            .read_cell(ch_column_id, row)
            .map(|value| if value.is_empty() { None } else { Some(value) })
    }

    fn process_row(
        &mut self,
        n_row: u32,
        l_header: &[String],
        if_is_last: bool,
        next_id: Option<u64>,
        state: &mut SpecRunState,
    ) {
        let l_values = self.read_row_checked(n_row, &mut state.builder);

        let n_id = match parse_item_id(&l_values[N_IDX_COLUMN_ID]) {
            Ok(n_id) => n_id,
            Err(e) => {
                let c_msg = format!("Row {n_row} skipped: {e}");
                warn!(row = n_row, error = %e, "Row skipped");
                state.builder.add_error(n_row, c_msg);
                state.builder.add_skipped();
                return;
            }
        };

        let c_name = l_values[N_IDX_COLUMN_NAME].clone();
        if state.dict_index.insert(n_id, c_name.clone()).is_some() {
            let c_msg = format!("Row {n_row}: identifier {n_id} repeats an earlier row");
            warn!(row = n_row, id = n_id, "Duplicate identifier overwrites earlier row");
            state.builder.add_warning(c_msg);
        }

        let position = if if_is_last {
            EnumItemPosition::Last
        } else if !state.if_first_emitted {
            EnumItemPosition::First
        } else {
            EnumItemPosition::Middle
        };
        state.if_first_emitted = true;

        let mut payload = SpecRenderPayload {
            id: n_id,
            name: c_name,
            position,
            prev_id: state.prev_id,
            next_id: if if_is_last { None } else { next_id },
            ..Default::default()
        };
        self.fill_payload_cells(n_row, l_header, &l_values, &mut payload, &mut state.builder);

        match self.publisher.publish_item(&payload) {
            Ok(()) => {
                debug!(row = n_row, id = n_id, position = position.as_str(), "Item page written");
                state.builder.add_written();
                state.prev_id = Some(n_id);
            }
            Err(e) => {
                warn!(row = n_row, id = n_id, error = %e, "Item page not written");
                state.builder.add_error(n_row, e.to_string());
            }
        }
    }

    /// Classify each cell and distribute it over rows / image / reel fields.
    fn fill_payload_cells(
        &self,
        n_row: u32,
        l_header: &[String],
        l_values: &[String],
        payload: &mut SpecRenderPayload,
        builder: &mut ReportSiteBuilder,
    ) {
        for ((ch_column, c_label), c_value) in self.l_columns.iter().zip(l_header).zip(l_values) {
            match self.parser.parse(c_value) {
                Ok(EnumCellKind::Plain(value)) => payload.rows.push(SpecTableRow {
                    label: c_label.clone(),
                    value,
                }),
                Ok(EnumCellKind::Image(image)) => {
                    payload.rows.push(derive_image_placeholder_row(c_label));
                    payload.set_image(image);
                }
                Ok(EnumCellKind::Reel(reel)) => payload.set_reel(reel),
                Err(e) => {
                    let c_axis = derive_cell_axis(*ch_column, n_row);
                    warn!(row = n_row, cell = %c_axis, error = %e, "Cell value not usable");
                    builder.add_error(n_row, format!("{c_axis}: {e}"));
                    // A malformed cell still counts as the latest cell of its kind.
                    match e {
                        CellParseError::MalformedImage { .. } => {
                            payload.rows.push(derive_image_placeholder_row(c_label));
                            payload.set_image(SpecImageRef::default());
                        }
                        CellParseError::MissingFrameRange { .. } => {
                            payload.set_reel(SpecRotatingReel::default());
                        }
                    }
                }
            }
        }
    }

    fn publish_index(&mut self, state: &mut SpecRunState) {
        let payload = SpecIndexPayload {
            items: state
                .dict_index
                .iter()
                .map(|(n_id, c_name)| SpecIndexEntry {
                    id: *n_id,
                    name: c_name.clone(),
                })
                .collect(),
        };
        state.builder.set_index_entries(payload.items.len());

        if let Err(e) = self.publisher.publish_index(&payload) {
            warn!(error = %e, "Index page not written");
            state.builder.add_error(0, e.to_string());
        }
    }

    fn report_read_errors(
        &self,
        n_row: u32,
        l_errors: Vec<SheetReadError>,
        builder: &mut ReportSiteBuilder,
    ) {
        for e in l_errors {
            warn!(row = n_row, error = %e, "Unreadable cell treated as empty");
            builder.add_error(n_row, e.to_string());
        }
    }
}

/// Only a readable, empty identifier cell ends the table.
fn is_sentinel(probe: &Result<Option<String>, SheetReadError>) -> bool {
    matches!(probe, Ok(None))
}

fn derive_image_placeholder_row(label: &str) -> SpecTableRow {
    SpecTableRow {
        label: label.to_string(),
        value: C_CELL_PLACEHOLDER_IMAGE.to_string(),
    }
}
