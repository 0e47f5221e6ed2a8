use std::path::PathBuf;

use thiserror::Error;

use crate::draft::Field;
use crate::list::ListKind;

/// Rejections raised by draft mutations. The draft is unchanged whenever one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("You can only add up to {capacity} {}.", .list.plural())]
    CapacityExceeded { list: ListKind, capacity: usize },

    #[error("{} already in the list or empty", .list.title())]
    DuplicateOrEmpty { list: ListKind },

    #[error("{} cannot be longer than {cap} characters", .list.title())]
    ItemTooLong { list: ListKind, cap: usize },

    #[error("Select {} to remove", .list.with_article())]
    NotFound { list: ListKind },

    #[error("{} cannot be longer than {cap} characters", .field.label())]
    FieldTooLong { field: Field, cap: usize },

    #[error("The recipe form has been closed")]
    SessionClosed,
}

/// Required fields that were blank when an export was attempted, in form order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please fill in the following fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
    pub fn labels(&self) -> &[&'static str] {
        &self.0
    }
}

/// Failures reported by a document-filling backend.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("No form fields found in the PDF template: {}", .0.display())]
    NoFormFields(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error loading or saving the PDF template: {0}")]
    Document(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] MissingFields),

    #[error("Recipe draft is inconsistent: {0}")]
    Inconsistent(String),

    #[error("Invalid theme '{theme}'. Please choose from {available}.")]
    InvalidTheme { theme: String, available: String },

    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    Fill(#[from] FillError),
}

impl ExportError {
    /// True when the collaborator failed while writing; the user may retry.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, ExportError::Fill(FillError::Io { .. }))
    }
}

/// Anything a UI intent can fail with.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
