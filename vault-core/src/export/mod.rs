//! Export pipeline: validate the draft, assemble the field table, locate the
//! themed template and hand everything to a [`DocumentFiller`].
//!
//! Assembly is a pure function of an immutable draft, so the same draft always
//! produces the same table. Nothing here retries; a failed export is repeated
//! by the user.

mod assemble;
mod table;
mod validate;

pub use assemble::{AssembledExport, Assembler};
pub use table::{FieldEntry, FieldTable};
pub use validate::validate;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info_span;

use crate::document::{DocumentFiller, TemplateStore};
use crate::draft::RecipeDraft;
use crate::error::ExportError;
use crate::theme::{TemplateId, ThemeTable};

/// An assembled export whose template file has been found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedExport {
    pub assembled: AssembledExport,
    pub template_path: PathBuf,
}

impl PreparedExport {
    pub fn file_name(&self) -> &str {
        &self.assembled.file_name
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub destination: PathBuf,
    pub template: TemplateId,
    pub filled: Vec<String>,
    pub skipped: Vec<String>,
    pub exported_at: DateTime<Utc>,
}

/// Wires the export collaborators together. Holds no state between calls.
pub struct Exporter<'a> {
    themes: &'a ThemeTable,
    templates: &'a dyn TemplateStore,
    filler: &'a dyn DocumentFiller,
}

impl<'a> Exporter<'a> {
    pub fn new(
        themes: &'a ThemeTable,
        templates: &'a dyn TemplateStore,
        filler: &'a dyn DocumentFiller,
    ) -> Self {
        Self {
            themes,
            templates,
            filler,
        }
    }

    /// Validate and assemble a draft without touching any template.
    pub fn assemble(&self, draft: &RecipeDraft) -> Result<AssembledExport, ExportError> {
        validate(draft)?;
        Assembler::new(self.themes).assemble(draft)
    }

    /// Everything that can fail before asking the user where to save.
    pub fn prepare(&self, draft: &RecipeDraft) -> Result<PreparedExport, ExportError> {
        let assembled = self.assemble(draft)?;
        let template_path = self.templates.locate(&assembled.template)?;
        Ok(PreparedExport {
            assembled,
            template_path,
        })
    }

    /// Fill the template and write it to `destination`.
    pub fn write(
        &self,
        prepared: &PreparedExport,
        destination: &Path,
    ) -> Result<ExportReceipt, ExportError> {
        let template = &prepared.assembled.template;
        let _span = info_span!(
            "export",
            template = %template,
            destination = %destination.display()
        )
        .entered();

        let report = self
            .filler
            .fill(&prepared.template_path, &prepared.assembled.fields, destination)
            .inspect_err(|e| tracing::warn!(error = %e, "Export failed"))?;

        for name in &report.skipped {
            tracing::warn!(field = %name, "Template has no such field, skipped");
        }
        tracing::info!(
            filled = report.filled.len(),
            skipped = report.skipped.len(),
            "Recipe exported"
        );

        Ok(ExportReceipt {
            destination: destination.to_path_buf(),
            template: template.clone(),
            filled: report.filled,
            skipped: report.skipped,
            exported_at: Utc::now(),
        })
    }

    /// Prepare and write in one step.
    pub fn export(
        &self,
        draft: &RecipeDraft,
        destination: &Path,
    ) -> Result<ExportReceipt, ExportError> {
        let prepared = self.prepare(draft)?;
        self.write(&prepared, destination)
    }
}
