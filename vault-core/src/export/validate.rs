//! Completeness check run before anything is exported.

use crate::draft::{Field, RecipeDraft};
use crate::error::MissingFields;

pub const THEME_LABEL: &str = "Theme";
pub const INGREDIENTS_LABEL: &str = "Ingredients";
pub const INSTRUCTIONS_LABEL: &str = "Instructions";

/// Check that every required field is filled in.
///
/// Notes are optional. Missing fields are reported together, in form order:
/// the seven scalar fields, then theme, ingredients and instructions.
pub fn validate(draft: &RecipeDraft) -> Result<(), MissingFields> {
    let mut missing: Vec<&'static str> = Field::SCALARS
        .iter()
        .filter(|field| draft.field(**field).trim().is_empty())
        .map(|field| field.label())
        .collect();

    if draft.theme().map_or(true, |t| t.trim().is_empty()) {
        missing.push(THEME_LABEL);
    }
    if draft.ingredients().is_empty() {
        missing.push(INGREDIENTS_LABEL);
    }
    if draft.instructions().is_empty() {
        missing.push(INSTRUCTIONS_LABEL);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields(missing))
    }
}
