//! Behavioural tests for the recipe form: list bounds, duplicate handling,
//! field caps, reset and export assembly.

use vault_core::{
    validate, Assembler, Field, FieldLimits, FormError, ListKind, RecipeDraft, ThemeTable,
    MAX_INGREDIENTS, MAX_INSTRUCTIONS,
};

const ALL_LABELS: [&str; 10] = [
    "Recipe Name",
    "Category",
    "Author",
    "Prep Time",
    "Cook Time",
    "Total Time",
    "Servings",
    "Theme",
    "Ingredients",
    "Instructions",
];

fn populated_draft() -> RecipeDraft {
    let mut draft = RecipeDraft::new(FieldLimits::default());
    draft.set_field(Field::Name, "Sugar Cookies").unwrap();
    draft.set_field(Field::Category, "Baking").unwrap();
    draft.set_field(Field::Author, "Grandma Lou").unwrap();
    draft.set_field(Field::PrepTime, "20 min").unwrap();
    draft.set_field(Field::CookTime, "12 min").unwrap();
    draft.set_field(Field::TotalTime, "32 min").unwrap();
    draft.set_field(Field::Servings, "36").unwrap();
    draft.set_field(Field::Notes, "Use cold butter").unwrap();
    draft.set_theme(Some("Summer"));
    draft.add_ingredient("Flour").unwrap();
    draft.add_ingredient("Sugar").unwrap();
    draft.add_instruction("Mix").unwrap();
    draft.add_instruction("Bake").unwrap();
    draft
}

#[test]
fn sixteenth_ingredient_is_rejected() {
    let mut draft = RecipeDraft::default();
    for i in 1..=MAX_INGREDIENTS {
        assert_eq!(draft.add_ingredient(&format!("Ingredient {}", i)).unwrap(), i);
    }
    let before = draft.ingredients().clone();

    let err = draft.add_ingredient("One too many").unwrap_err();

    assert_eq!(
        err,
        FormError::CapacityExceeded {
            list: ListKind::Ingredients,
            capacity: 15
        }
    );
    assert_eq!(err.to_string(), "You can only add up to 15 ingredients.");
    assert_eq!(draft.ingredients(), &before);
}

#[test]
fn twenty_sixth_instruction_is_rejected() {
    let mut draft = RecipeDraft::default();
    for i in 1..=MAX_INSTRUCTIONS {
        draft.add_instruction(&format!("Step {}", i)).unwrap();
    }

    assert!(matches!(
        draft.add_instruction("Serve"),
        Err(FormError::CapacityExceeded { capacity: 25, .. })
    ));
    assert_eq!(draft.instructions().len(), 25);
}

#[test]
fn adding_same_text_twice_keeps_one_copy() {
    for text in ["Eggs", "  Eggs", "Eggs  ", "2 cups milk"] {
        let mut draft = RecipeDraft::default();
        draft.add_ingredient(text).unwrap();

        assert_eq!(
            draft.add_ingredient(text),
            Err(FormError::DuplicateOrEmpty {
                list: ListKind::Ingredients
            })
        );
        assert_eq!(draft.ingredients().len(), 1);
        assert_eq!(draft.ingredients().as_slice(), &[text.trim().to_string()]);
    }
}

#[test]
fn removing_absent_entry_changes_nothing() {
    let mut draft = populated_draft();
    let before = draft.clone();

    assert_eq!(
        draft.remove_instruction("Frost"),
        Err(FormError::NotFound {
            list: ListKind::Instructions
        })
    );
    assert_eq!(draft, before);
}

#[test]
fn removal_keeps_remaining_order() {
    let mut draft = populated_draft();
    draft.add_ingredient("Butter").unwrap();
    draft.remove_ingredient("Sugar").unwrap();

    assert_eq!(
        draft.ingredients().iter().collect::<Vec<_>>(),
        vec!["Flour", "Butter"]
    );
}

#[test]
fn reset_then_validate_reports_every_required_field() {
    let mut draft = populated_draft();
    draft.reset();

    assert_eq!(validate(&draft).unwrap_err().labels(), &ALL_LABELS);
}

#[test]
fn overlong_value_is_a_no_op_for_every_field() {
    let mut draft = populated_draft();
    for field in Field::SCALARS.iter().chain([&Field::Notes]) {
        let before = draft.field(*field).to_string();
        let cap = draft.limits().cap(*field);
        let too_long = "x".repeat(cap + 1);

        assert_eq!(
            draft.set_field(*field, &too_long),
            Err(FormError::FieldTooLong { field: *field, cap })
        );
        assert_eq!(draft.field(*field), before);
    }
}

#[test]
fn value_at_cap_is_accepted() {
    let mut draft = RecipeDraft::default();
    let exactly = "y".repeat(draft.limits().author);
    assert!(draft.set_field(Field::Author, &exactly).is_ok());
    assert_eq!(draft.remaining(Field::Author), 0);
}

#[test]
fn missing_only_theme() {
    let mut draft = populated_draft();
    draft.set_theme(None);

    assert_eq!(validate(&draft).unwrap_err().labels(), &["Theme"]);
}

#[test]
fn assembled_table_numbers_lists_in_order() {
    let themes = ThemeTable::standard();
    let export = Assembler::new(&themes).assemble(&populated_draft()).unwrap();

    assert_eq!(export.template.as_str(), "Summer_Template");

    let names: Vec<&str> = export.fields.names().collect();
    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert!(position("Ingredient1") < position("Ingredient2"));
    assert!(position("Ingredient2") < position("Direction1"));
    assert!(position("Direction1") < position("Direction2"));

    assert_eq!(export.fields.get("Ingredient1"), Some("Flour"));
    assert_eq!(export.fields.get("Ingredient2"), Some("Sugar"));
    assert_eq!(export.fields.get("Direction1"), Some("Mix"));
    assert_eq!(export.fields.get("Direction2"), Some("Bake"));
    assert_eq!(export.fields.get("Recipe"), Some("Sugar Cookies"));
    assert_eq!(export.fields.get("Author"), Some("Grandma Lou"));
    assert_eq!(export.fields.get("Prep Time"), Some("20 min"));
    assert_eq!(export.fields.get("Cook Time"), Some("12 min"));
    assert_eq!(export.fields.get("Total Time"), Some("32 min"));
    assert_eq!(export.fields.get("Serves"), Some("36"));
    assert_eq!(export.fields.get("Meal Type"), Some("Baking"));
    assert_eq!(export.fields.get("Notes"), Some("Use cold butter"));
    assert_eq!(export.fields.get("Ingredient3"), None);
}

#[test]
fn assembling_twice_is_identical() {
    let themes = ThemeTable::standard();
    let assembler = Assembler::new(&themes);
    let draft = populated_draft();

    let first = assembler.assemble(&draft).unwrap();
    let second = assembler.assemble(&draft).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first.fields).unwrap(),
        serde_json::to_vec(&second.fields).unwrap()
    );
    assert_eq!(first.fields.fingerprint(), second.fields.fingerprint());
}

#[test]
fn each_theme_selects_its_template() {
    let themes = ThemeTable::standard();
    for (theme, expected) in [
        ("spring", "Spring_Template"),
        ("Summer", "Summer_Template"),
        ("FALL", "Fall_Template"),
        ("winter", "Winter_Template"),
    ] {
        let mut draft = populated_draft();
        draft.set_theme(Some(theme));
        let export = Assembler::new(&themes).assemble(&draft).unwrap();
        assert_eq!(export.template.as_str(), expected);
    }
}
