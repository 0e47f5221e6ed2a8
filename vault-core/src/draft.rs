//! The recipe being authored in the current session.

use serde::{Deserialize, Serialize};

use crate::config::{FieldLimits, MAX_INGREDIENTS, MAX_INSTRUCTIONS};
use crate::error::FormError;
use crate::list::{char_len, BoundedList, ListKind};

/// Editable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Category,
    Author,
    PrepTime,
    CookTime,
    TotalTime,
    Servings,
    Notes,
    /// Pending text in the "Add Ingredient" box.
    IngredientInput,
    /// Pending text in the "Add Instruction" box.
    InstructionInput,
}

impl Field {
    /// Scalar recipe fields in form order.
    pub const SCALARS: &'static [Field] = &[
        Field::Name,
        Field::Category,
        Field::Author,
        Field::PrepTime,
        Field::CookTime,
        Field::TotalTime,
        Field::Servings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Recipe Name",
            Field::Category => "Category",
            Field::Author => "Author",
            Field::PrepTime => "Prep Time",
            Field::CookTime => "Cook Time",
            Field::TotalTime => "Total Time",
            Field::Servings => "Servings",
            Field::Notes => "Notes",
            Field::IngredientInput => "Ingredient",
            Field::InstructionInput => "Instruction",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Author => "author",
            Field::PrepTime => "prep_time",
            Field::CookTime => "cook_time",
            Field::TotalTime => "total_time",
            Field::Servings => "servings",
            Field::Notes => "notes",
            Field::IngredientInput => "ingredient_input",
            Field::InstructionInput => "instruction_input",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Field::Name),
            "category" => Some(Field::Category),
            "author" => Some(Field::Author),
            "prep_time" => Some(Field::PrepTime),
            "cook_time" => Some(Field::CookTime),
            "total_time" => Some(Field::TotalTime),
            "servings" => Some(Field::Servings),
            "notes" => Some(Field::Notes),
            "ingredient_input" => Some(Field::IngredientInput),
            "instruction_input" => Some(Field::InstructionInput),
            _ => None,
        }
    }
}

/// Mutable recipe draft with a single owner.
///
/// Every mutation enforces the configured caps, so a draft never holds a value
/// longer than its field allows and never holds more list entries than the
/// export templates have room for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    limits: FieldLimits,
    name: String,
    category: String,
    author: String,
    prep_time: String,
    cook_time: String,
    total_time: String,
    servings: String,
    theme: Option<String>,
    ingredients: BoundedList,
    instructions: BoundedList,
    notes: String,
    ingredient_input: String,
    instruction_input: String,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::new(FieldLimits::default())
    }
}

impl RecipeDraft {
    /// Create an empty draft.
    pub fn new(limits: FieldLimits) -> Self {
        Self {
            limits,
            name: String::new(),
            category: String::new(),
            author: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            total_time: String::new(),
            servings: String::new(),
            theme: None,
            ingredients: BoundedList::new(
                ListKind::Ingredients,
                MAX_INGREDIENTS,
                limits.ingredient,
            ),
            instructions: BoundedList::new(
                ListKind::Instructions,
                MAX_INSTRUCTIONS,
                limits.instruction,
            ),
            notes: String::new(),
            ingredient_input: String::new(),
            instruction_input: String::new(),
        }
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    fn slot(&self, field: Field) -> &String {
        match field {
            Field::Name => &self.name,
            Field::Category => &self.category,
            Field::Author => &self.author,
            Field::PrepTime => &self.prep_time,
            Field::CookTime => &self.cook_time,
            Field::TotalTime => &self.total_time,
            Field::Servings => &self.servings,
            Field::Notes => &self.notes,
            Field::IngredientInput => &self.ingredient_input,
            Field::InstructionInput => &self.instruction_input,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Author => &mut self.author,
            Field::PrepTime => &mut self.prep_time,
            Field::CookTime => &mut self.cook_time,
            Field::TotalTime => &mut self.total_time,
            Field::Servings => &mut self.servings,
            Field::Notes => &mut self.notes,
            Field::IngredientInput => &mut self.ingredient_input,
            Field::InstructionInput => &mut self.instruction_input,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        self.slot(field)
    }

    /// Replace a field's value and return its new length.
    ///
    /// A value over the field's cap is rejected and the previous value kept.
    /// Blank values are accepted; completeness is only checked on export.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<usize, FormError> {
        let cap = self.limits.cap(field);
        let len = char_len(value);
        if len > cap {
            return Err(FormError::FieldTooLong { field, cap });
        }

        let slot = self.slot_mut(field);
        slot.clear();
        slot.push_str(value);
        tracing::debug!(field = field.as_str(), len, "Field updated");
        Ok(len)
    }

    /// Current length of a field, for the live character counters.
    pub fn field_len(&self, field: Field) -> usize {
        char_len(self.slot(field))
    }

    /// Characters left before a field hits its cap.
    pub fn remaining(&self, field: Field) -> usize {
        self.limits.cap(field).saturating_sub(self.field_len(field))
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Select a theme, or clear the selection with `None` or a blank name.
    pub fn set_theme(&mut self, theme: Option<&str>) {
        self.theme = theme
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        tracing::debug!(theme = ?self.theme, "Theme selected");
    }

    pub fn ingredients(&self) -> &BoundedList {
        &self.ingredients
    }

    pub fn instructions(&self) -> &BoundedList {
        &self.instructions
    }

    pub fn list(&self, kind: ListKind) -> &BoundedList {
        match kind {
            ListKind::Ingredients => &self.ingredients,
            ListKind::Instructions => &self.instructions,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut BoundedList {
        match kind {
            ListKind::Ingredients => &mut self.ingredients,
            ListKind::Instructions => &mut self.instructions,
        }
    }

    fn input_field(kind: ListKind) -> Field {
        match kind {
            ListKind::Ingredients => Field::IngredientInput,
            ListKind::Instructions => Field::InstructionInput,
        }
    }

    /// Append to a list, clearing its input box on success. Returns the new count.
    pub fn add_to(&mut self, kind: ListKind, text: &str) -> Result<usize, FormError> {
        let count = self.list_mut(kind).push(text)?;
        self.slot_mut(Self::input_field(kind)).clear();
        tracing::debug!(list = kind.as_str(), count, "Entry added");
        Ok(count)
    }

    /// Add whatever is currently typed into the list's input box.
    pub fn add_pending(&mut self, kind: ListKind) -> Result<usize, FormError> {
        let text = self.slot(Self::input_field(kind)).clone();
        self.add_to(kind, &text)
    }

    pub fn remove_from(&mut self, kind: ListKind, item: &str) -> Result<usize, FormError> {
        let count = self.list_mut(kind).remove(item)?;
        tracing::debug!(list = kind.as_str(), count, "Entry removed");
        Ok(count)
    }

    pub fn add_ingredient(&mut self, text: &str) -> Result<usize, FormError> {
        self.add_to(ListKind::Ingredients, text)
    }

    pub fn add_pending_ingredient(&mut self) -> Result<usize, FormError> {
        self.add_pending(ListKind::Ingredients)
    }

    pub fn remove_ingredient(&mut self, item: &str) -> Result<usize, FormError> {
        self.remove_from(ListKind::Ingredients, item)
    }

    pub fn add_instruction(&mut self, text: &str) -> Result<usize, FormError> {
        self.add_to(ListKind::Instructions, text)
    }

    pub fn add_pending_instruction(&mut self) -> Result<usize, FormError> {
        self.add_pending(ListKind::Instructions)
    }

    pub fn remove_instruction(&mut self, item: &str) -> Result<usize, FormError> {
        self.remove_from(ListKind::Instructions, item)
    }

    /// Clear everything, keeping the configured limits.
    pub fn reset(&mut self) {
        *self = Self::new(self.limits);
        tracing::debug!("Draft reset");
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new(self.limits)
    }
}
