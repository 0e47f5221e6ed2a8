//! Template lookup and document filling.
//!
//! The export step only knows template identifiers and field tables. Turning an
//! identifier into a file and writing values into it happens behind the
//! [`TemplateStore`] and [`DocumentFiller`] traits so tests can swap in fakes.

mod pdf;
mod recording;

pub use pdf::PdfFormFiller;
pub use recording::{FillCall, RecordingFiller};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ExportError, FillError};
use crate::export::FieldTable;
use crate::theme::TemplateId;

/// Which fields a fill wrote and which the template did not have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub filled: Vec<String>,
    /// Field names absent from the template. Not an error.
    pub skipped: Vec<String>,
}

/// Writes a field table into a template and saves the result.
pub trait DocumentFiller: Send + Sync {
    fn fill(
        &self,
        template: &Path,
        fields: &FieldTable,
        destination: &Path,
    ) -> Result<FillReport, FillError>;
}

/// Resolves template identifiers to files.
pub trait TemplateStore: Send + Sync {
    fn locate(&self, template: &TemplateId) -> Result<PathBuf, ExportError>;
}

/// Looks templates up as `<dir>/<TemplateId>.pdf`.
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    dir: PathBuf,
}

impl DirTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Templates present in the directory, sorted by identifier.
    pub fn available(&self) -> Vec<TemplateId> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut ids: Vec<TemplateId> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|e| e == "pdf").unwrap_or(false))
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| TemplateId::new(stem.to_string_lossy().into_owned()))
            })
            .collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }
}

impl TemplateStore for DirTemplateStore {
    fn locate(&self, template: &TemplateId) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(template.file_name());
        if path.is_file() {
            Ok(path)
        } else {
            tracing::debug!(path = %path.display(), "Template missing");
            Err(ExportError::TemplateNotFound(template.file_name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn locates_existing_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Fall_Template.pdf"), b"%PDF-1.5").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"not a template").unwrap();

        let store = DirTemplateStore::new(dir.path());
        let path = store.locate(&TemplateId::new("Fall_Template")).unwrap();
        assert_eq!(path, dir.path().join("Fall_Template.pdf"));
        assert_eq!(store.available(), vec![TemplateId::new("Fall_Template")]);
    }

    #[test]
    fn missing_template_is_reported_by_file_name() {
        let dir = TempDir::new().unwrap();
        let store = DirTemplateStore::new(dir.path());

        match store.locate(&TemplateId::new("Spring_Template")) {
            Err(ExportError::TemplateNotFound(name)) => assert_eq!(name, "Spring_Template.pdf"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
