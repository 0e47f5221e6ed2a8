//! Turns a validated draft into a template id plus an ordered field table.

use serde::Serialize;

use crate::config::{MAX_INGREDIENTS, MAX_INSTRUCTIONS};
use crate::draft::{Field, RecipeDraft};
use crate::error::ExportError;
use crate::list::{BoundedList, ListKind};
use crate::theme::{TemplateId, ThemeTable};

use super::table::FieldTable;

/// Template field names for the scalar fields, in the order they are written.
const SCALAR_FIELD_NAMES: &[(&str, Field)] = &[
    ("Recipe", Field::Name),
    ("Author", Field::Author),
    ("Prep Time", Field::PrepTime),
    ("Cook Time", Field::CookTime),
    ("Total Time", Field::TotalTime),
    ("Serves", Field::Servings),
    ("Meal Type", Field::Category),
];

const NOTES_FIELD_NAME: &str = "Notes";

/// Everything needed to fill a template, except where the result goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledExport {
    pub template: TemplateId,
    pub fields: FieldTable,
    /// Suggested destination file name, `<recipe name>_filled.pdf`.
    pub file_name: String,
}

pub struct Assembler<'a> {
    themes: &'a ThemeTable,
}

impl<'a> Assembler<'a> {
    pub fn new(themes: &'a ThemeTable) -> Self {
        Self { themes }
    }

    /// Build the field table for a draft.
    ///
    /// Expects a draft that already passed [`super::validate`]; the checks here
    /// cover configuration and internal consistency, not user input.
    pub fn assemble(&self, draft: &RecipeDraft) -> Result<AssembledExport, ExportError> {
        check_capacity(draft.ingredients(), MAX_INGREDIENTS)?;
        check_capacity(draft.instructions(), MAX_INSTRUCTIONS)?;

        let theme = draft.theme().unwrap_or_default();
        let template = self
            .themes
            .resolve(theme)
            .cloned()
            .ok_or_else(|| ExportError::InvalidTheme {
                theme: theme.to_string(),
                available: self.themes.describe(),
            })?;

        let mut fields = FieldTable::new();
        for (name, field) in SCALAR_FIELD_NAMES {
            fields.insert(*name, draft.field(*field));
        }
        numbered_fields(&mut fields, draft.ingredients());
        numbered_fields(&mut fields, draft.instructions());
        fields.insert(NOTES_FIELD_NAME, draft.field(Field::Notes));

        Ok(AssembledExport {
            template,
            fields,
            file_name: suggested_file_name(draft.field(Field::Name)),
        })
    }
}

fn check_capacity(list: &BoundedList, max: usize) -> Result<(), ExportError> {
    if list.len() > max {
        return Err(ExportError::Inconsistent(format!(
            "{} {} exceeds the limit of {}",
            list.len(),
            list.kind().as_str(),
            max
        )));
    }
    Ok(())
}

/// `Ingredient1..N` / `Direction1..N` in list order.
fn numbered_fields(fields: &mut FieldTable, list: &BoundedList) {
    for (i, item) in list.iter().enumerate() {
        fields.insert(numbered_name(list.kind(), i), item);
    }
}

fn suggested_file_name(recipe_name: &str) -> String {
    let stem = sanitize_for_filesystem(recipe_name.trim());
    let stem = if stem.is_empty() { "recipe".to_string() } else { stem };
    format!("{}_filled.pdf", stem)
}

fn sanitize_for_filesystem(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn numbered_name(kind: ListKind, index: usize) -> String {
    format!("{}{}", kind.field_prefix(), index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(theme: &str) -> RecipeDraft {
        let mut draft = RecipeDraft::default();
        draft.set_field(Field::Name, "Shortbread").unwrap();
        draft.set_field(Field::Category, "Cookies").unwrap();
        draft.set_field(Field::Author, "Morag").unwrap();
        draft.set_field(Field::PrepTime, "15 min").unwrap();
        draft.set_field(Field::CookTime, "25 min").unwrap();
        draft.set_field(Field::TotalTime, "40 min").unwrap();
        draft.set_field(Field::Servings, "24").unwrap();
        draft.set_field(Field::Notes, "Chill the dough").unwrap();
        draft.set_theme(Some(theme));
        draft.add_ingredient("Flour").unwrap();
        draft.add_ingredient("Sugar").unwrap();
        draft.add_instruction("Mix").unwrap();
        draft.add_instruction("Bake").unwrap();
        draft
    }

    #[test]
    fn builds_table_in_template_order() {
        let themes = ThemeTable::standard();
        let export = Assembler::new(&themes).assemble(&draft("winter")).unwrap();

        assert_eq!(export.template.as_str(), "Winter_Template");
        assert_eq!(
            export
                .fields
                .iter()
                .map(|e| (e.name.as_str(), e.value.as_str()))
                .collect::<Vec<_>>(),
            vec![
                ("Recipe", "Shortbread"),
                ("Author", "Morag"),
                ("Prep Time", "15 min"),
                ("Cook Time", "25 min"),
                ("Total Time", "40 min"),
                ("Serves", "24"),
                ("Meal Type", "Cookies"),
                ("Ingredient1", "Flour"),
                ("Ingredient2", "Sugar"),
                ("Direction1", "Mix"),
                ("Direction2", "Bake"),
                ("Notes", "Chill the dough"),
            ]
        );
        assert_eq!(export.file_name, "Shortbread_filled.pdf");
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let themes = ThemeTable::standard();
        let err = Assembler::new(&themes)
            .assemble(&draft("Monsoon"))
            .unwrap_err();

        match err {
            ExportError::InvalidTheme { theme, available } => {
                assert_eq!(theme, "Monsoon");
                assert_eq!(available, "Spring, Summer, Fall, or Winter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn custom_theme_table_is_honoured() {
        let themes = ThemeTable::standard().with_theme("Monsoon", TemplateId::new("Rain"));
        let export = Assembler::new(&themes).assemble(&draft("monsoon")).unwrap();
        assert_eq!(export.template.as_str(), "Rain");
    }

    #[test]
    fn file_name_is_filesystem_safe() {
        assert_eq!(suggested_file_name("Mac/Cheese"), "Mac_Cheese_filled.pdf");
        assert_eq!(suggested_file_name("   "), "recipe_filled.pdf");
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name(ListKind::Instructions, 0), "Direction1");
        assert_eq!(numbered_name(ListKind::Ingredients, 14), "Ingredient15");
    }
}
