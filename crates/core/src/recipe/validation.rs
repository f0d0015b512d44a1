//! Field validation and normalization for recipe writes.

use thiserror::Error;

use super::types::RecipeChanges;

/// Validation errors for recipe writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Title is blank.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Description is blank.
    #[error("description must not be empty")]
    EmptyDescription,

    /// No ingredients given.
    #[error("at least one ingredient is required")]
    NoIngredients,

    /// An ingredient entry is blank.
    #[error("ingredient #{position} must not be empty")]
    EmptyIngredient {
        /// One-based position in the list.
        position: usize,
    },
}

/// Canonical form of an ingredient: trimmed and lower-cased.
#[must_use]
pub fn normalize_ingredient(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates a change set and returns it normalized.
///
/// Title and description are trimmed; ingredients are normalized with
/// [`normalize_ingredient`] and keep their order.
///
/// # Errors
///
/// Returns an error if any field is blank or there are no ingredients.
pub fn validate_changes(changes: RecipeChanges) -> Result<RecipeChanges, RecipeValidationError> {
    let title = changes.title.trim();
    if title.is_empty() {
        return Err(RecipeValidationError::EmptyTitle);
    }

    let description = changes.description.trim();
    if description.is_empty() {
        return Err(RecipeValidationError::EmptyDescription);
    }

    if changes.ingredients.is_empty() {
        return Err(RecipeValidationError::NoIngredients);
    }

    let ingredients = changes
        .ingredients
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let ingredient = normalize_ingredient(raw);
            if ingredient.is_empty() {
                Err(RecipeValidationError::EmptyIngredient { position: index + 1 })
            } else {
                Ok(ingredient)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecipeChanges {
        title: title.to_string(),
        description: description.to_string(),
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_valid_changes_are_trimmed_and_lowercased() {
        let changes = RecipeChanges::new("  Soup ", "Hot soup\n", ["Water", " SALT "]);
        let validated = validate_changes(changes).unwrap();

        assert_eq!(validated.title, "Soup");
        assert_eq!(validated.description, "Hot soup");
        assert_eq!(validated.ingredients, vec!["water", "salt"]);
    }

    #[rstest]
    #[case::blank_title(RecipeChanges::new("  ", "d", ["a"]), RecipeValidationError::EmptyTitle)]
    #[case::blank_description(RecipeChanges::new("t", "", ["a"]), RecipeValidationError::EmptyDescription)]
    #[case::no_ingredients(RecipeChanges::new("t", "d", Vec::<String>::new()), RecipeValidationError::NoIngredients)]
    #[case::blank_ingredient(
        RecipeChanges::new("t", "d", ["a", " "]),
        RecipeValidationError::EmptyIngredient { position: 2 }
    )]
    fn test_invalid_changes_are_rejected(
        #[case] changes: RecipeChanges,
        #[case] expected: RecipeValidationError,
    ) {
        assert_eq!(validate_changes(changes), Err(expected));
    }

    proptest! {
        // Already-normalized ingredients come back exactly as given.
        #[test]
        fn prop_normalized_ingredients_roundtrip(
            ingredients in prop::collection::vec("[a-z]{1,12}( [a-z]{1,12})?", 1..10),
        ) {
            let changes = RecipeChanges::new("Title", "Description", ingredients.clone());
            let validated = validate_changes(changes).unwrap();
            prop_assert_eq!(validated.ingredients, ingredients);
        }

        // Normalization keeps order and length.
        #[test]
        fn prop_normalization_preserves_order(
            ingredients in prop::collection::vec("[A-Za-z]{1,12}", 1..10),
        ) {
            let changes = RecipeChanges::new("Title", "Description", ingredients.clone());
            let validated = validate_changes(changes).unwrap();

            prop_assert_eq!(validated.ingredients.len(), ingredients.len());
            for (normalized, raw) in validated.ingredients.iter().zip(&ingredients) {
                prop_assert_eq!(normalized, &raw.to_lowercase());
            }
        }
    }
}
