//! Field caps and template location, loaded from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::draft::Field;

/// Maximum number of ingredients a recipe can hold.
pub const MAX_INGREDIENTS: usize = 15;

/// Maximum number of instruction steps a recipe can hold.
pub const MAX_INSTRUCTIONS: usize = 25;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' is not a valid character cap")]
    InvalidNumber { var: String, value: String },
}

/// Per-field character caps.
///
/// The printed templates have fixed-width boxes, so every cap is enforced on
/// each keystroke rather than at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub name: usize,
    pub author: usize,
    pub category: usize,
    pub prep_time: usize,
    pub cook_time: usize,
    pub total_time: usize,
    pub servings: usize,
    pub notes: usize,
    /// Cap for a single ingredient entry.
    pub ingredient: usize,
    /// Cap for a single instruction step.
    pub instruction: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            name: 18,
            author: 27,
            category: 15,
            prep_time: 15,
            cook_time: 15,
            total_time: 15,
            servings: 15,
            notes: 700,
            ingredient: 38,
            instruction: 100,
        }
    }
}

impl FieldLimits {
    /// Character cap for a field. The pending-entry buffers share the cap of
    /// the list they feed.
    pub fn cap(&self, field: Field) -> usize {
        match field {
            Field::Name => self.name,
            Field::Category => self.category,
            Field::Author => self.author,
            Field::PrepTime => self.prep_time,
            Field::CookTime => self.cook_time,
            Field::TotalTime => self.total_time,
            Field::Servings => self.servings,
            Field::Notes => self.notes,
            Field::IngredientInput => self.ingredient,
            Field::InstructionInput => self.instruction,
        }
    }

    /// Set the same cap on category, the three time fields and servings.
    pub fn with_short_fields(mut self, cap: usize) -> Self {
        self.category = cap;
        self.prep_time = cap;
        self.cook_time = cap;
        self.total_time = cap;
        self.servings = cap;
        self
    }
}

#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Directory holding `<Theme>_Template.pdf` files.
    pub template_dir: PathBuf,
    pub limits: FieldLimits,
}

impl VaultConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RECIPE_VAULT_TEMPLATE_DIR`: template directory (default: "~/.recipe-vault/templates")
    /// - `RECIPE_VAULT_MAX_NAME`: recipe name cap
    /// - `RECIPE_VAULT_MAX_AUTHOR`: author cap
    /// - `RECIPE_VAULT_MAX_SHORT_FIELD`: cap for category, times and servings
    /// - `RECIPE_VAULT_MAX_INGREDIENT`: cap for a single ingredient
    /// - `RECIPE_VAULT_MAX_INSTRUCTION`: cap for a single instruction
    /// - `RECIPE_VAULT_MAX_NOTES`: notes cap, 0 disables notes
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`VaultConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let template_dir = lookup("RECIPE_VAULT_TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_template_dir);

        // Notes is optional, so its cap may be 0; every other cap must be positive
        let number = |var: &str, min: usize| -> Result<Option<usize>, ConfigError> {
            match lookup(var) {
                None => Ok(None),
                Some(value) => match value.trim().parse::<usize>() {
                    Ok(n) if n >= min => Ok(Some(n)),
                    _ => Err(ConfigError::InvalidNumber {
                        var: var.to_string(),
                        value,
                    }),
                },
            }
        };

        let mut limits = FieldLimits::default();
        if let Some(cap) = number("RECIPE_VAULT_MAX_NAME", 1)? {
            limits.name = cap;
        }
        if let Some(cap) = number("RECIPE_VAULT_MAX_AUTHOR", 1)? {
            limits.author = cap;
        }
        if let Some(cap) = number("RECIPE_VAULT_MAX_SHORT_FIELD", 1)? {
            limits = limits.with_short_fields(cap);
        }
        if let Some(cap) = number("RECIPE_VAULT_MAX_INGREDIENT", 1)? {
            limits.ingredient = cap;
        }
        if let Some(cap) = number("RECIPE_VAULT_MAX_INSTRUCTION", 1)? {
            limits.instruction = cap;
        }
        if let Some(cap) = number("RECIPE_VAULT_MAX_NOTES", 0)? {
            limits.notes = cap;
        }

        Ok(Self {
            template_dir,
            limits,
        })
    }

    /// Get the default template directory: ~/.recipe-vault/templates
    pub fn default_template_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".recipe-vault").join("templates"))
            .unwrap_or_else(|| PathBuf::from("templates"))
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            template_dir: Self::default_template_dir(),
            limits: FieldLimits::default(),
        }
    }
}
