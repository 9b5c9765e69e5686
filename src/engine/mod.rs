pub mod assembler;
pub mod gaps;
pub mod matcher;
pub mod planner;
pub mod ranker;
pub mod request;

pub use assembler::{assemble, assemble_plan, SuggestionResponse, SuggestionView};
pub use gaps::{analyze_gaps, GapReport, RecipeGap};
pub use matcher::{match_recipe, MatchResult};
pub use planner::{plan_recipes, Plan};
pub use ranker::{rank_recipes, RankedRecipe};
pub use request::{SuggestionParams, SuggestionRequest};

use tracing::info;

use crate::catalog::Catalog;

/// Runs a request end to end: clamp, rank, plan when more than one recipe may be
/// combined, then format.
pub fn suggest(catalog: &Catalog, request: &SuggestionRequest) -> SuggestionResponse {
    suggest_with(catalog, &request.clamped())
}

pub fn suggest_with(catalog: &Catalog, params: &SuggestionParams) -> SuggestionResponse {
    let ranked = rank_recipes(
        catalog,
        &params.available,
        params.allow_substitutions,
        params.max_missing,
    );

    let plans: Vec<Plan<'_>> = if params.plan_size > 1 {
        plan_recipes(&ranked, params.plan_size, params.max_missing, params.max_suggestions)
    } else {
        ranked.into_iter().take(params.max_suggestions).map(Plan::from).collect()
    };

    let suggestions = assemble(&plans, params.max_suggestions);
    info!(
        available = params.available.len(),
        plan_size = params.plan_size,
        max_missing = params.max_missing,
        suggestions = suggestions.len(),
        "suggestions computed"
    );

    SuggestionResponse {
        suggestions,
        plan_size: params.plan_size,
        max_missing: params.max_missing,
    }
}
