//! In-memory filler for tests and dry runs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{DocumentFiller, FillReport};
use crate::error::FillError;
use crate::export::FieldTable;

/// One recorded call to [`RecordingFiller::fill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillCall {
    pub template: PathBuf,
    pub fields: FieldTable,
    pub destination: PathBuf,
}

/// A filler that records its calls instead of touching the filesystem.
///
/// Clones share the same log, so a test can keep a handle after giving one
/// away. Field names listed with [`RecordingFiller::with_template_fields`] are
/// treated as the template's fields; everything else is reported as skipped.
#[derive(Debug, Clone, Default)]
pub struct RecordingFiller {
    calls: Arc<Mutex<Vec<FillCall>>>,
    template_fields: Option<Vec<String>>,
    fail_with: Option<std::io::ErrorKind>,
}

impl RecordingFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the fields the pretend template knows about.
    pub fn with_template_fields(mut self, names: &[&str]) -> Self {
        self.template_fields = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Fail every fill with an I/O error of the given kind.
    pub fn failing(mut self, kind: std::io::ErrorKind) -> Self {
        self.fail_with = Some(kind);
        self
    }

    pub fn calls(&self) -> Vec<FillCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<FillCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl DocumentFiller for RecordingFiller {
    fn fill(
        &self,
        template: &Path,
        fields: &FieldTable,
        destination: &Path,
    ) -> Result<FillReport, FillError> {
        if let Some(kind) = self.fail_with {
            return Err(FillError::Io {
                path: destination.to_path_buf(),
                source: std::io::Error::new(kind, "RecordingFiller: configured failure"),
            });
        }

        self.calls.lock().unwrap().push(FillCall {
            template: template.to_path_buf(),
            fields: fields.clone(),
            destination: destination.to_path_buf(),
        });

        let mut report = FillReport::default();
        for name in fields.names() {
            let known = self
                .template_fields
                .as_ref()
                .map_or(true, |known| known.iter().any(|k| k == name));
            if known {
                report.filled.push(name.to_string());
            } else {
                report.skipped.push(name.to_string());
            }
        }
        Ok(report)
    }
}
