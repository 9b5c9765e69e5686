use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::planner::Plan;

/// Response record for one suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionView {
    pub recipe_ids: Vec<String>,
    pub title: String,
    pub tags: Vec<String>,
    pub covered: Vec<String>,
    pub missing: Vec<String>,
    pub missing_count: usize,
    pub substitutions: BTreeMap<String, String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<SuggestionView>,
    pub plan_size: usize,
    pub max_missing: usize,
}

pub const PLAN_TITLE_SEPARATOR: &str = " + ";

fn push_unique(into: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

/// Turns one plan into its response record.
///
/// A single recipe is shown as is. A multi-recipe plan is shown as one card:
/// titles joined with `" + "`, tags and ingredients merged in first-seen order
/// without duplicates, and every member's steps in plan order, each prefixed with
/// `"[<member title>] "` so the cook knows which dish a step belongs to.
pub fn assemble_plan(plan: &Plan<'_>) -> SuggestionView {
    let mut view = SuggestionView {
        recipe_ids: plan.recipe_ids().into_iter().map(str::to_string).collect(),
        title: String::new(),
        tags: Vec::new(),
        covered: plan.result.covered.clone(),
        missing: plan.result.missing.clone(),
        missing_count: plan.result.missing_count(),
        substitutions: plan.result.substitutions.clone(),
        ingredients: Vec::new(),
        instructions: Vec::new(),
    };

    match plan.recipes.as_slice() {
        [recipe] => {
            view.title = recipe.title.clone();
            view.tags = recipe.tags.clone();
            view.ingredients = recipe.ingredients.clone();
            view.instructions = recipe.instructions.clone();
        }
        recipes => {
            view.title = recipes
                .iter()
                .map(|r| r.title.as_str())
                .collect::<Vec<_>>()
                .join(PLAN_TITLE_SEPARATOR);
            for recipe in recipes {
                push_unique(&mut view.tags, &recipe.tags);
                push_unique(&mut view.ingredients, &recipe.ingredients);
                view.instructions.extend(
                    recipe
                        .instructions
                        .iter()
                        .map(|step| format!("[{}] {}", recipe.title, step)),
                );
            }
        }
    }

    view
}

/// Formats already ordered plans, keeping at most `max_suggestions`.
pub fn assemble(plans: &[Plan<'_>], max_suggestions: usize) -> Vec<SuggestionView> {
    plans.iter().take(max_suggestions).map(assemble_plan).collect()
}
