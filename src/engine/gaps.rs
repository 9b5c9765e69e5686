use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::matcher::match_recipe;
use crate::catalog::{AvailableSet, Catalog};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeGap {
    pub title: String,
    pub covered: Vec<String>,
    pub missing: Vec<String>,
    pub substitutions: BTreeMap<String, String>,
    /// Every listed alternative for each missing ingredient, handy as a
    /// shopping list. Empty when the table has nothing for it.
    pub substitution_candidates: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub gaps: BTreeMap<String, RecipeGap>,
}

/// Gap analysis for specific recipes, always with substitutions enabled.
/// Unknown ids are skipped.
pub fn analyze_gaps<S: AsRef<str>>(catalog: &Catalog, recipe_ids: &[S], available: &AvailableSet) -> GapReport {
    let mut report = GapReport::default();

    for id in recipe_ids {
        let Some(recipe) = catalog.recipe(id.as_ref().trim()) else {
            continue;
        };
        let result = match_recipe(recipe, available, catalog.substitutions(), true);
        let substitution_candidates = result
            .missing
            .iter()
            .map(|ingredient| {
                (
                    ingredient.clone(),
                    catalog.substitutions().alternatives(ingredient).to_vec(),
                )
            })
            .collect();

        report.gaps.insert(
            recipe.id.clone(),
            RecipeGap {
                title: recipe.title.clone(),
                covered: result.covered,
                missing: result.missing,
                substitutions: result.substitutions,
                substitution_candidates,
            },
        );
    }

    report
}
