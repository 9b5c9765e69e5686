use std::cmp::Ordering;
use tracing::debug;

use super::matcher::{match_recipe, MatchResult};
use crate::catalog::{AvailableSet, Catalog, Recipe};

/// A recipe that fits on its own, with its gap analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecipe<'a> {
    pub recipe: &'a Recipe,
    pub result: MatchResult,
}

impl RankedRecipe<'_> {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.result
            .missing_count()
            .cmp(&other.result.missing_count())
            .then_with(|| other.result.covered_count().cmp(&self.result.covered_count()))
            .then_with(|| self.recipe.id.cmp(&other.recipe.id))
    }
}

/// Greedy single-recipe ranking.
///
/// Every recipe is matched, those missing more than `max_missing` ingredients are
/// dropped, and the rest are ordered best first: fewest missing, then most
/// covered, then by id. Ids are unique, so the order is total.
pub fn rank_recipes<'a>(
    catalog: &'a Catalog,
    available: &AvailableSet,
    allow_substitutions: bool,
    max_missing: usize,
) -> Vec<RankedRecipe<'a>> {
    let mut ranked: Vec<RankedRecipe<'a>> = catalog
        .recipes()
        .map(|recipe| RankedRecipe {
            recipe,
            result: match_recipe(recipe, available, catalog.substitutions(), allow_substitutions),
        })
        .filter(|candidate| candidate.result.missing_count() <= max_missing)
        .collect();

    ranked.sort_by(RankedRecipe::rank_cmp);
    debug!(
        considered = catalog.len(),
        kept = ranked.len(),
        max_missing,
        "ranked recipes"
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SubstitutionTable;
    use std::collections::HashMap;

    fn catalog(recipes: Vec<Recipe>) -> Catalog {
        Catalog::new(recipes, SubstitutionTable::default(), HashMap::new()).unwrap()
    }

    fn ids(ranked: &[RankedRecipe<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.recipe.id.clone()).collect()
    }

    #[test]
    fn test_filters_by_max_missing() {
        let catalog = catalog(vec![
            Recipe::new("a", "Two missing", ["egg", "saffron", "truffle"]),
            Recipe::new("b", "None missing", ["egg", "flour"]),
        ]);
        let available: AvailableSet = ["egg", "flour"].into_iter().collect();

        let ranked = rank_recipes(&catalog, &available, false, 1);
        assert_eq!(ids(&ranked), vec!["b"]);
    }

    #[test]
    fn test_orders_by_missing_then_coverage_then_id() {
        let catalog = catalog(vec![
            Recipe::new("d", "One missing", ["egg", "milk"]),
            Recipe::new("c", "Small", ["egg"]),
            Recipe::new("b", "Large", ["egg", "flour"]),
            Recipe::new("a", "Also small", ["flour"]),
        ]);
        let available: AvailableSet = ["egg", "flour"].into_iter().collect();

        let ranked = rank_recipes(&catalog, &available, false, 3);
        assert_eq!(ids(&ranked), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_max_missing_zero_keeps_only_complete_recipes() {
        let catalog = catalog(vec![
            Recipe::new("a", "Complete", ["egg"]),
            Recipe::new("b", "Incomplete", ["egg", "milk"]),
        ]);
        let available: AvailableSet = ["egg"].into_iter().collect();

        assert_eq!(ids(&rank_recipes(&catalog, &available, true, 0)), vec!["a"]);
    }

    #[test]
    fn test_empty_pantry_is_not_an_error() {
        let catalog = catalog(vec![Recipe::new("a", "Toast", ["bread", "butter"])]);
        let ranked = rank_recipes(&catalog, &AvailableSet::default(), false, 10);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].result.missing, vec!["bread", "butter"]);
    }
}
