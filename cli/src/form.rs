//! Drives a form session from recipe files and intent scripts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use vault_core::{
    DestinationChooser, FixedDestination, FormSession, Intent, SaveOutcome, SessionError,
    VaultConfig,
};

use crate::recipe_file::RecipeFile;

/// One rejected intent, kept so the user sees every problem at once.
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub intent: Intent,
    pub error: String,
}

pub fn open_session(config: &VaultConfig) -> FormSession {
    FormSession::from_config(config)
}

/// Type a recipe into a fresh session. Rejected entries are collected, not fatal.
pub fn load_recipe(session: &mut FormSession, recipe: &RecipeFile) -> Vec<Rejection> {
    let mut chooser = FixedDestination(None);
    let mut rejections = Vec::new();

    for intent in recipe.intents() {
        if let Err(e) = session.dispatch(intent.clone(), &mut chooser) {
            tracing::warn!(error = %e, "Recipe entry rejected");
            rejections.push(Rejection {
                intent,
                error: e.to_string(),
            });
        }
    }
    rejections
}

/// Type a recipe into the session and save it through `chooser`.
///
/// Rejected entries are logged by [`load_recipe`]; validation on save decides
/// whether what remains is exportable.
pub fn export_recipe(
    session: &mut FormSession,
    recipe: &RecipeFile,
    chooser: &mut dyn DestinationChooser,
) -> Result<SaveOutcome, SessionError> {
    load_recipe(session, recipe);
    session.save(chooser)
}

/// Result line for one replayed intent.
#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub step: usize,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<vault_core::Feedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn load_intents(path: &Path) -> Result<Vec<Intent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read intent script: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse intent script: {}", path.display()))
}

/// Replay intents in order, stopping after `close`.
pub fn replay(
    session: &mut FormSession,
    intents: Vec<Intent>,
    chooser: &mut dyn DestinationChooser,
) -> Vec<ReplayStep> {
    let mut steps = Vec::with_capacity(intents.len());

    for (i, intent) in intents.into_iter().enumerate() {
        let result = session.dispatch(intent.clone(), chooser);
        let (feedback, error) = match result {
            Ok(feedback) => (Some(feedback), None),
            Err(SessionError::Form(e)) => (None, Some(e.to_string())),
            Err(SessionError::Export(e)) => {
                tracing::warn!(error = %e, step = i + 1, "Save failed");
                (None, Some(e.to_string()))
            }
        };
        steps.push(ReplayStep {
            step: i + 1,
            intent,
            feedback,
            error,
        });

        if session.is_closed() {
            break;
        }
    }
    steps
}

/// Chooser for non-interactive runs: an explicit path, or the suggested name
/// inside `dir`.
pub struct PathChooser {
    pub explicit: Option<PathBuf>,
    pub dir: PathBuf,
}

impl DestinationChooser for PathChooser {
    fn choose(&mut self, suggested_file_name: &str) -> Option<PathBuf> {
        Some(
            self.explicit
                .clone()
                .unwrap_or_else(|| self.dir.join(suggested_file_name)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vault_core::{ExportError, Feedback, Field, RecordingFiller};

    fn session() -> FormSession {
        FormSession::from_config(&VaultConfig::default()).with_filler(RecordingFiller::new())
    }

    fn shortbread() -> RecipeFile {
        RecipeFile {
            name: "Shortbread".to_string(),
            category: "Dessert".to_string(),
            author: "Gran".to_string(),
            prep_time: "15 min".to_string(),
            cook_time: "20 min".to_string(),
            total_time: "35 min".to_string(),
            servings: "12".to_string(),
            theme: Some("Spring".to_string()),
            ingredients: vec!["Butter".to_string(), "Flour".to_string()],
            instructions: vec!["Rub in".to_string(), "Bake".to_string()],
            notes: String::new(),
        }
    }

    /// A template directory holding an empty Spring template. The recording
    /// filler never opens it; the directory store only checks it exists.
    fn template_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Spring_Template.pdf"), b"").unwrap();
        dir
    }

    #[test]
    fn load_recipe_collects_rejections() {
        let recipe = RecipeFile {
            name: "A name that is far too long for the card".to_string(),
            ingredients: vec!["Salt".to_string(), "Salt".to_string()],
            ..RecipeFile::default()
        };

        let mut session = session();
        let rejections = load_recipe(&mut session, &recipe);

        assert_eq!(rejections.len(), 2);
        assert_eq!(session.draft().ingredients().len(), 1);
        assert_eq!(session.draft().field(Field::Name), "");
    }

    #[test]
    fn replay_stops_after_close() {
        let intents = vec![
            Intent::AddInstruction {
                text: "Whisk".to_string(),
            },
            Intent::Close,
            Intent::Reset,
        ];
        let mut session = session();
        let steps = replay(&mut session, intents, &mut FixedDestination(None));

        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[1].feedback, Some(Feedback::Closed)));
    }

    #[test]
    fn export_writes_suggested_name_into_output_dir() {
        let templates = template_dir();
        let out_dir = TempDir::new().unwrap();
        let config = VaultConfig {
            template_dir: templates.path().to_path_buf(),
            ..VaultConfig::default()
        };
        let filler = RecordingFiller::new();
        let mut session = open_session(&config).with_filler(filler.clone());
        let mut chooser = PathChooser {
            explicit: None,
            dir: out_dir.path().to_path_buf(),
        };

        let outcome = export_recipe(&mut session, &shortbread(), &mut chooser).unwrap();

        let expected = out_dir.path().join("Shortbread_filled.pdf");
        match outcome {
            SaveOutcome::Saved(receipt) => assert_eq!(receipt.destination, expected),
            other => panic!("unexpected outcome: {other:?}"),
        }
        let call = filler.last_call().unwrap();
        assert_eq!(call.template, templates.path().join("Spring_Template.pdf"));
        assert_eq!(call.destination, expected);
        assert_eq!(call.fields.get("Ingredient2"), Some("Flour"));
    }

    #[test]
    fn export_of_incomplete_recipe_reports_missing_fields() {
        let templates = template_dir();
        let config = VaultConfig {
            template_dir: templates.path().to_path_buf(),
            ..VaultConfig::default()
        };
        let filler = RecordingFiller::new();
        let mut session = open_session(&config).with_filler(filler.clone());
        let recipe = RecipeFile {
            author: String::new(),
            ..shortbread()
        };

        let err = export_recipe(&mut session, &recipe, &mut FixedDestination(None)).unwrap_err();

        assert!(matches!(err, SessionError::Export(ExportError::Validation(_))));
        assert!(filler.calls().is_empty());
    }

    #[test]
    fn path_chooser_uses_suggested_name() {
        let mut chooser = PathChooser {
            explicit: None,
            dir: PathBuf::from("out"),
        };
        assert_eq!(
            chooser.choose("Stew_filled.pdf"),
            Some(PathBuf::from("out/Stew_filled.pdf"))
        );
    }
}
