//! Recipe files: a JSON rendering of what a user would type into the form.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vault_core::{Field, Intent};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeFile {
    pub name: String,
    pub category: String,
    pub author: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    pub theme: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub notes: String,
}

impl RecipeFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse recipe file: {}", path.display()))
    }

    /// The intents a user would raise to type this recipe into an empty form.
    pub fn intents(&self) -> Vec<Intent> {
        let scalars = [
            (Field::Name, &self.name),
            (Field::Category, &self.category),
            (Field::Author, &self.author),
            (Field::PrepTime, &self.prep_time),
            (Field::CookTime, &self.cook_time),
            (Field::TotalTime, &self.total_time),
            (Field::Servings, &self.servings),
            (Field::Notes, &self.notes),
        ];

        let mut intents: Vec<Intent> = scalars
            .into_iter()
            .map(|(field, value)| Intent::SetField {
                field,
                value: value.clone(),
            })
            .collect();

        intents.push(Intent::SetTheme {
            theme: self.theme.clone(),
        });
        intents.extend(
            self.ingredients
                .iter()
                .map(|text| Intent::AddIngredient { text: text.clone() }),
        );
        intents.extend(
            self.instructions
                .iter()
                .map(|text| Intent::AddInstruction { text: text.clone() }),
        );
        intents
    }
}
