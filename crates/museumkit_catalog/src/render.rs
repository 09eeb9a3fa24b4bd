//! Page output: the [`SitePublisher`] seam and its Tera-backed HTML writer.

use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use crate::conf::{
    C_EXT_ITEM, C_FILE_INDEX, C_TEMPLATE_INDEX, C_TEMPLATE_INDEX_DEFAULT, C_TEMPLATE_ITEM,
    C_TEMPLATE_ITEM_DEFAULT,
};
use crate::spec::{PublishError, SiteBuildError, SpecIndexPayload, SpecRenderPayload};

/// Receives rendered pages from the row pipeline.
pub trait SitePublisher {
    /// Publish the page of one item.
    fn publish_item(&mut self, payload: &SpecRenderPayload) -> Result<(), PublishError>;

    /// Publish the index page.
    fn publish_index(&mut self, payload: &SpecIndexPayload) -> Result<(), PublishError>;
}

/// Writes `<id>.html` and `index.html` into one output directory.
#[derive(Debug)]
pub struct HtmlSiteWriter {
    path_dir_out: PathBuf,
    tera: Tera,
}

impl HtmlSiteWriter {
    /// Create the output directory and load templates.
    ///
    /// Files `index.html` / `item.html` found in `path_dir_templates` replace
    /// the built-in template of the same name.
    pub fn new(
        path_dir_out: &Path,
        path_dir_templates: Option<&Path>,
    ) -> Result<Self, SiteBuildError> {
        fs::create_dir_all(path_dir_out).map_err(|e| SiteBuildError::OutputInit {
            path: path_dir_out.to_path_buf(),
            message: e.to_string(),
        })?;
        if !path_dir_out.is_dir() {
            return Err(SiteBuildError::OutputInit {
                path: path_dir_out.to_path_buf(),
                message: "Output path is not a directory.".to_string(),
            });
        }

        let mut l_templates = Vec::with_capacity(2);
        for (c_name, c_default) in [
            (C_TEMPLATE_INDEX, C_TEMPLATE_INDEX_DEFAULT),
            (C_TEMPLATE_ITEM, C_TEMPLATE_ITEM_DEFAULT),
        ] {
            let c_source = match path_dir_templates {
                Some(path_dir) => read_template_override(path_dir, c_name)?
                    .unwrap_or_else(|| c_default.to_string()),
                None => c_default.to_string(),
            };
            l_templates.push((c_name, c_source));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(l_templates)
            .map_err(|e| SiteBuildError::TemplateInit(derive_tera_error_text(&e)))?;

        Ok(Self {
            path_dir_out: path_dir_out.to_path_buf(),
            tera,
        })
    }

    /// Output directory.
    pub fn path_dir_out(&self) -> &Path {
        &self.path_dir_out
    }

    /// Path of the page written for `item_id`.
    pub fn derive_item_path(&self, item_id: u64) -> PathBuf {
        self.path_dir_out.join(format!("{item_id}.{C_EXT_ITEM}"))
    }

    fn render_to_file(
        &self,
        template_name: &str,
        payload: &impl Serialize,
        path_file: &Path,
    ) -> Result<(), PublishError> {
        let context = Context::from_serialize(payload).map_err(|e| PublishError::Render {
            name: template_name.to_string(),
            detail: derive_tera_error_text(&e),
        })?;
        let c_html = self
            .tera
            .render(template_name, &context)
            .map_err(|e| PublishError::Render {
                name: template_name.to_string(),
                detail: derive_tera_error_text(&e),
            })?;
        fs::write(path_file, c_html).map_err(|e| PublishError::Write {
            path: path_file.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

impl SitePublisher for HtmlSiteWriter {
    fn publish_item(&mut self, payload: &SpecRenderPayload) -> Result<(), PublishError> {
        let path_file = self.derive_item_path(payload.id);
        self.render_to_file(C_TEMPLATE_ITEM, payload, &path_file)
    }

    fn publish_index(&mut self, payload: &SpecIndexPayload) -> Result<(), PublishError> {
        let path_file = self.path_dir_out.join(C_FILE_INDEX);
        self.render_to_file(C_TEMPLATE_INDEX, payload, &path_file)
    }
}

fn read_template_override(
    path_dir_templates: &Path,
    template_name: &str,
) -> Result<Option<String>, SiteBuildError> {
    let path_template = path_dir_templates.join(template_name);
    if !path_template.is_file() {
        return Ok(None);
    }
    fs::read_to_string(&path_template).map(Some).map_err(|e| {
        SiteBuildError::TemplateInit(format!("{}: {e}", path_template.display()))
    })
}

/// Flatten a Tera error and its sources into one line.
fn derive_tera_error_text(err: &tera::Error) -> String {
    let mut c_text = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        c_text.push_str(": ");
        c_text.push_str(&e.to_string());
        source = e.source();
    }
    c_text
}
