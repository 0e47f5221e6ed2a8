pub mod config;
pub mod document;
pub mod draft;
pub mod error;
pub mod export;
pub mod list;
pub mod session;
pub mod theme;

pub use config::{ConfigError, FieldLimits, VaultConfig, MAX_INGREDIENTS, MAX_INSTRUCTIONS};
pub use document::{
    DirTemplateStore, DocumentFiller, FillCall, FillReport, PdfFormFiller, RecordingFiller,
    TemplateStore,
};
pub use draft::{Field, RecipeDraft};
pub use error::{ExportError, FillError, FormError, MissingFields, SessionError};
pub use export::{
    validate, AssembledExport, Assembler, ExportReceipt, Exporter, FieldEntry, FieldTable,
    PreparedExport,
};
pub use list::{BoundedList, ListKind};
pub use session::{
    DestinationChooser, Feedback, FixedDestination, FormSession, Intent, SaveOutcome,
};
pub use theme::{TemplateId, ThemeTable};
