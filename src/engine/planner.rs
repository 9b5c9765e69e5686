use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use super::matcher::MatchResult;
use super::ranker::RankedRecipe;
use crate::catalog::Recipe;

/// Lower bound on how many ranked candidates the search considers.
const MIN_CANDIDATE_POOL: usize = 25;

/// Number of best-ranked candidates the planner searches over. Larger catalogs
/// are cut down to this so the subset search stays small.
pub fn candidate_pool_size(max_suggestions: usize) -> usize {
    MIN_CANDIDATE_POOL.max(max_suggestions.saturating_mul(3))
}

/// One suggestion: a single recipe or several recipes cooked together, with the
/// gap analysis over everything they need.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<'a> {
    /// Members in the order they were picked (ranker order).
    pub recipes: Vec<&'a Recipe>,
    pub result: MatchResult,
}

impl<'a> Plan<'a> {
    pub fn recipe_ids(&self) -> Vec<&'a str> {
        self.recipes.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Output order: fewest missing, most covered, fewest recipes, then ids.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.result
            .missing_count()
            .cmp(&other.result.missing_count())
            .then_with(|| other.result.covered_count().cmp(&self.result.covered_count()))
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.recipe_ids().cmp(&other.recipe_ids()))
    }
}

impl<'a> From<RankedRecipe<'a>> for Plan<'a> {
    fn from(ranked: RankedRecipe<'a>) -> Self {
        Self {
            recipes: vec![ranked.recipe],
            result: ranked.result,
        }
    }
}

fn push_unique(into: &mut Vec<String>, ingredient: &str) {
    if !into.iter().any(|i| i == ingredient) {
        into.push(ingredient.to_string());
    }
}

/// Gap analysis of a set of recipes cooked together.
///
/// Requirements are unioned. An ingredient one member lacks is supplied when a
/// different member yields it. A recipe never supplies itself, so an ingredient
/// stays missing while any member that needs it has no other member yielding
/// it; covered and missing never overlap.
pub(crate) fn aggregate(members: &[&RankedRecipe<'_>]) -> MatchResult {
    let mut result = MatchResult::default();

    for member in members {
        for ingredient in &member.result.covered {
            push_unique(&mut result.covered, ingredient);
        }
        for (ingredient, alternative) in &member.result.substitutions {
            result
                .substitutions
                .entry(ingredient.clone())
                .or_insert_with(|| alternative.clone());
        }
    }

    for (i, member) in members.iter().enumerate() {
        for ingredient in &member.result.missing {
            let supplied = members
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.recipe.yields(ingredient));
            if supplied {
                push_unique(&mut result.covered, ingredient);
            } else {
                push_unique(&mut result.missing, ingredient);
            }
        }
    }

    // Supplied to one member but still lacking for another: missing wins.
    result.covered.retain(|c| !result.missing.contains(c));
    result
}

/// Whether some candidate yields an ingredient another candidate is missing.
/// Only then can adding a recipe lower a plan's missing count.
fn pool_can_supply(pool: &[RankedRecipe<'_>]) -> bool {
    pool.iter().enumerate().any(|(i, producer)| {
        pool.iter()
            .enumerate()
            .any(|(j, consumer)| j != i && consumer.result.missing.iter().any(|m| producer.recipe.yields(m)))
    })
}

struct Search<'c, 'a> {
    candidates: &'c [RankedRecipe<'a>],
    plan_size: usize,
    max_missing: usize,
    max_suggestions: usize,
    // missing counts only grow along a branch; bounds are sound
    prune: bool,
    // kept sorted best first, never longer than max_suggestions
    best: Vec<Plan<'a>>,
    seen: HashSet<Vec<&'a str>>,
}

impl<'c, 'a> Search<'c, 'a> {
    /// True once the result list is full and a plan missing `missing_count`
    /// ingredients would rank below every retained plan.
    fn cannot_improve(&self, missing_count: usize) -> bool {
        self.prune
            && self.best.len() >= self.max_suggestions
            && self
                .best
                .last()
                .is_some_and(|worst| missing_count > worst.result.missing_count())
    }

    fn record(&mut self, members: &[usize], result: MatchResult) {
        let recipes: Vec<&'a Recipe> = members.iter().map(|&i| self.candidates[i].recipe).collect();

        let mut key: Vec<&'a str> = recipes.iter().map(|r| r.id.as_str()).collect();
        key.sort_unstable();
        if !self.seen.insert(key) {
            return;
        }

        let plan = Plan { recipes, result };
        let pos = self
            .best
            .binary_search_by(|kept| kept.cmp_rank(&plan))
            .unwrap_or_else(|insert_at| insert_at);
        if pos < self.max_suggestions {
            self.best.insert(pos, plan);
            self.best.truncate(self.max_suggestions);
        }
    }

    fn extend(&mut self, start: usize, members: &mut Vec<usize>) {
        let candidates = self.candidates;
        for idx in start..candidates.len() {
            // Candidates are ranked by standalone missing count, so once the
            // first pick can no longer beat the retained plans nothing after
            // it can either.
            if members.is_empty() && self.cannot_improve(candidates[idx].result.missing_count()) {
                break;
            }

            members.push(idx);
            let picked: Vec<&RankedRecipe<'a>> = members.iter().map(|&i| &candidates[i]).collect();
            let result = aggregate(&picked);
            let missing = result.missing_count();

            let over_budget = missing > self.max_missing;
            if !over_budget && !self.cannot_improve(missing) {
                self.record(members, result);
            }
            // Without suppliers in the pool an over-budget or hopeless branch
            // only gets worse.
            let dead_end = self.prune && (over_budget || self.cannot_improve(missing));
            if !dead_end && members.len() < self.plan_size {
                self.extend(idx + 1, members);
            }
            members.pop();
        }
    }
}

/// Backtracking search for the best combinations of up to `plan_size` recipes.
///
/// # Arguments
/// * `candidates`: output of the ranker, best first. Only the first
///   [`candidate_pool_size`] entries are searched.
/// * `plan_size`: most recipes a single plan may combine.
/// * `max_missing`: no returned plan misses more ingredients than this.
/// * `max_suggestions`: most plans returned.
///
/// # Returns
/// Distinct plans ordered by [`Plan::cmp_rank`], exactly the first
/// `max_suggestions` of every feasible plan over the pool. Empty when no
/// candidate fits on its own.
pub fn plan_recipes<'a>(
    candidates: &[RankedRecipe<'a>],
    plan_size: usize,
    max_missing: usize,
    max_suggestions: usize,
) -> Vec<Plan<'a>> {
    if plan_size == 0 || max_suggestions == 0 {
        return Vec::new();
    }

    let pool = &candidates[..candidates.len().min(candidate_pool_size(max_suggestions))];
    let mut search = Search {
        candidates: pool,
        plan_size,
        max_missing,
        max_suggestions,
        prune: !pool_can_supply(pool),
        best: Vec::with_capacity(max_suggestions),
        seen: HashSet::new(),
    };
    search.extend(0, &mut Vec::with_capacity(plan_size));

    debug!(
        pool = pool.len(),
        pruned = search.prune,
        explored = search.seen.len(),
        kept = search.best.len(),
        plan_size,
        "plan search finished"
    );
    search.best
}
