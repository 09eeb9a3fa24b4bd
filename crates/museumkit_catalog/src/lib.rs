//! `museumkit_catalog` v1:
//! Spreadsheet-to-HTML catalogue generator for museum item sheets.
//!
//! Modules:
//! - `conf`     : constants and default presets
//! - `spec`     : options/payloads/errors
//! - `util`     : pure helper functions
//! - `cell`     : cell micro-syntax (plain / image / rotating reel)
//! - `sheet`    : worksheet access seam and calamine reader
//! - `render`   : page output seam and Tera writer
//! - `pipeline` : row-by-row generation orchestration
//! - `report`   : run-time report model
pub mod cell;
pub mod conf;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod sheet;
pub mod spec;
pub mod util;

#[cfg(test)]
mod testing;

pub use cell::CellValueParser;
pub use conf::derive_default_site_options;
pub use pipeline::{RowPipeline, generate_site};
pub use render::{HtmlSiteWriter, SitePublisher};
pub use report::{ReportSite, ReportSiteBuilder, SpecRowError};
pub use sheet::{SheetSource, XlsxSheet};
pub use spec::{
    CellParseError, EnumCellKind, EnumItemPosition, ItemIdError, PublishError, SheetReadError,
    SiteBuildError, SpecImageRef, SpecIndexEntry, SpecIndexPayload, SpecPipelineOptions,
    SpecRenderPayload, SpecRotatingReel, SpecSiteOptions, SpecTableRow,
};
