use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{AvailableSet, Recipe, SubstitutionTable};

/// Gap analysis for one recipe (or, aggregated, for a whole plan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Ingredients the cook already has, in recipe order.
    pub covered: Vec<String>,
    /// Ingredients neither on hand nor substitutable, in recipe order.
    pub missing: Vec<String>,
    /// Missing ingredient -> the available alternative standing in for it.
    pub substitutions: BTreeMap<String, String>,
}

impl MatchResult {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }
}

/// Matches a single recipe against the pantry.
///
/// Each ingredient lands in exactly one bucket: `covered` when it is on hand,
/// `substitutions` when `allow_substitutions` is set and one of its listed
/// alternatives is on hand (the first one in table order wins), `missing`
/// otherwise.
pub fn match_recipe(
    recipe: &Recipe,
    available: &AvailableSet,
    substitutions: &SubstitutionTable,
    allow_substitutions: bool,
) -> MatchResult {
    let mut result = MatchResult::default();

    for ingredient in &recipe.ingredients {
        if available.contains(ingredient) {
            result.covered.push(ingredient.clone());
            continue;
        }

        let alternative = if allow_substitutions {
            substitutions
                .alternatives(ingredient)
                .iter()
                .find(|alt| available.contains(alt))
        } else {
            None
        };

        match alternative {
            Some(alt) => {
                result.substitutions.insert(ingredient.clone(), alt.clone());
            }
            None => result.missing.push(ingredient.clone()),
        }
    }

    result
}
