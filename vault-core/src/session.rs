//! Form session: the single owner of a recipe draft.
//!
//! The presentation layer never touches the draft directly. It turns widget
//! events into [`Intent`] messages, hands them to [`FormSession::dispatch`] and
//! renders the returned [`Feedback`] or error.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{FieldLimits, VaultConfig};
use crate::document::{DirTemplateStore, DocumentFiller, PdfFormFiller, TemplateStore};
use crate::draft::{Field, RecipeDraft};
use crate::error::{ExportError, FormError, SessionError};
use crate::export::{AssembledExport, ExportReceipt, Exporter};
use crate::list::ListKind;
use crate::theme::ThemeTable;

/// A user action raised by the form surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SetField { field: Field, value: String },
    SetTheme { theme: Option<String> },
    AddIngredient { text: String },
    /// `None` when nothing is selected in the list.
    RemoveIngredient { selected: Option<String> },
    AddInstruction { text: String },
    RemoveInstruction { selected: Option<String> },
    Save,
    Reset,
    Close,
}

/// What the form surface should show after an intent succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    FieldUpdated {
        field: Field,
        length: usize,
        remaining: usize,
    },
    ThemeSelected {
        theme: Option<String>,
    },
    ListUpdated {
        list: ListKind,
        count: usize,
        message: String,
    },
    Save {
        outcome: SaveOutcome,
    },
    Reset,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved(ExportReceipt),
    /// The user dismissed the destination chooser. Not an error.
    Cancelled,
}

/// Asks the user where to write the exported document.
pub trait DestinationChooser {
    /// `None` means the user cancelled.
    fn choose(&mut self, suggested_file_name: &str) -> Option<PathBuf>;
}

impl<F> DestinationChooser for F
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    fn choose(&mut self, suggested_file_name: &str) -> Option<PathBuf> {
        self(suggested_file_name)
    }
}

/// Always answers with the same destination (or always cancels).
#[derive(Debug, Clone, Default)]
pub struct FixedDestination(pub Option<PathBuf>);

impl DestinationChooser for FixedDestination {
    fn choose(&mut self, _suggested_file_name: &str) -> Option<PathBuf> {
        self.0.clone()
    }
}

pub struct FormSession {
    draft: RecipeDraft,
    themes: ThemeTable,
    templates: Box<dyn TemplateStore>,
    filler: Box<dyn DocumentFiller>,
    closed: bool,
}

impl FormSession {
    /// Session with the standard themes, PDF filling, and templates in `template_dir`.
    pub fn new(limits: FieldLimits, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            draft: RecipeDraft::new(limits),
            themes: ThemeTable::standard(),
            templates: Box::new(DirTemplateStore::new(template_dir)),
            filler: Box::new(PdfFormFiller::new()),
            closed: false,
        }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.limits, config.template_dir.clone())
    }

    pub fn with_themes(mut self, themes: ThemeTable) -> Self {
        self.themes = themes;
        self
    }

    pub fn with_templates(mut self, templates: impl TemplateStore + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    pub fn with_filler(mut self, filler: impl DocumentFiller + 'static) -> Self {
        self.filler = Box::new(filler);
        self
    }

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn themes(&self) -> &ThemeTable {
        &self.themes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.closed {
            Err(FormError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn exporter(&self) -> Exporter<'_> {
        Exporter::new(&self.themes, self.templates.as_ref(), self.filler.as_ref())
    }

    /// Apply one intent. `chooser` is only consulted for [`Intent::Save`].
    pub fn dispatch(
        &mut self,
        intent: Intent,
        chooser: &mut dyn DestinationChooser,
    ) -> Result<Feedback, SessionError> {
        self.ensure_open()?;

        let feedback = match intent {
            Intent::SetField { field, value } => self.set_field(field, &value)?,
            Intent::SetTheme { theme } => {
                self.draft.set_theme(theme.as_deref());
                Feedback::ThemeSelected {
                    theme: self.draft.theme().map(str::to_string),
                }
            }
            Intent::AddIngredient { text } => self.add(ListKind::Ingredients, &text)?,
            Intent::RemoveIngredient { selected } => {
                self.remove(ListKind::Ingredients, selected.as_deref())?
            }
            Intent::AddInstruction { text } => self.add(ListKind::Instructions, &text)?,
            Intent::RemoveInstruction { selected } => {
                self.remove(ListKind::Instructions, selected.as_deref())?
            }
            Intent::Save => Feedback::Save {
                outcome: self.save(chooser)?,
            },
            Intent::Reset => {
                self.reset();
                Feedback::Reset
            }
            Intent::Close => {
                self.close();
                Feedback::Closed
            }
        };
        Ok(feedback)
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<Feedback, FormError> {
        self.ensure_open()?;
        let length = self.draft.set_field(field, value)?;
        Ok(Feedback::FieldUpdated {
            field,
            length,
            remaining: self.draft.remaining(field),
        })
    }

    pub fn add(&mut self, list: ListKind, text: &str) -> Result<Feedback, FormError> {
        self.ensure_open()?;
        let count = self.draft.add_to(list, text)?;
        let capacity = self.draft.list(list).capacity();
        Ok(Feedback::ListUpdated {
            list,
            count,
            message: format!("{} added ({}/{})", list.title(), count, capacity),
        })
    }

    /// Remove the selected entry; no selection is reported as `NotFound`.
    pub fn remove(
        &mut self,
        list: ListKind,
        selected: Option<&str>,
    ) -> Result<Feedback, FormError> {
        self.ensure_open()?;
        let selected = selected.ok_or(FormError::NotFound { list })?;
        let count = self.draft.remove_from(list, selected)?;
        Ok(Feedback::ListUpdated {
            list,
            count,
            message: format!("{} '{}' removed", list.title(), selected.trim()),
        })
    }

    /// Validate and assemble the current draft without writing anything.
    pub fn preview(&self) -> Result<AssembledExport, ExportError> {
        self.exporter().assemble(&self.draft)
    }

    /// Export the draft to a destination picked by `chooser`.
    ///
    /// Validation and template lookup happen before the chooser is shown. The
    /// session is mutably borrowed for the whole call, so the draft cannot be
    /// edited while the chooser is open. Cancelling leaves everything as it was.
    pub fn save(
        &mut self,
        chooser: &mut dyn DestinationChooser,
    ) -> Result<SaveOutcome, SessionError> {
        self.ensure_open()?;
        let exporter = self.exporter();
        let prepared = exporter.prepare(&self.draft)?;

        let Some(destination) = chooser.choose(prepared.file_name()) else {
            tracing::info!("Save cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        let receipt = exporter.write(&prepared, &destination)?;
        Ok(SaveOutcome::Saved(receipt))
    }

    pub fn reset(&mut self) {
        self.draft.reset();
    }

    pub fn close(&mut self) {
        self.closed = true;
        tracing::debug!("Form session closed");
    }
}
