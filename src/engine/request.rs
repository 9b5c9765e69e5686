use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::AvailableSet;

pub const MAX_MISSING_LIMIT: usize = 10;
pub const MAX_PLAN_SIZE: usize = 4;
pub const MAX_SUGGESTIONS_LIMIT: usize = 12;

const DEFAULT_MAX_MISSING: i64 = 3;
const DEFAULT_PLAN_SIZE: i64 = 1;
const DEFAULT_MAX_SUGGESTIONS: i64 = 8;

fn default_max_missing() -> i64 {
    DEFAULT_MAX_MISSING
}

fn default_plan_size() -> i64 {
    DEFAULT_PLAN_SIZE
}

fn default_max_suggestions() -> i64 {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_true() -> bool {
    true
}

// Clients send whatever their chip input produced; keep the strings, skip the rest.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect())
}

/// A suggestion request as it arrives from a client. Numbers are taken as given
/// and only brought into range by [`SuggestionRequest::clamped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub available_ingredients: Vec<String>,
    #[serde(default = "default_max_missing")]
    pub max_missing: i64,
    #[serde(default = "default_true")]
    pub allow_substitutions: bool,
    #[serde(default = "default_plan_size")]
    pub plan_size: i64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: i64,
    /// Accepted for compatibility. Ranking always puts fewest missing first.
    #[serde(default = "default_true")]
    pub prioritize_min_missing: bool,
}

impl Default for SuggestionRequest {
    fn default() -> Self {
        Self {
            available_ingredients: Vec::new(),
            max_missing: DEFAULT_MAX_MISSING,
            allow_substitutions: true,
            plan_size: DEFAULT_PLAN_SIZE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            prioritize_min_missing: true,
        }
    }
}

/// In-range parameters the engine runs on.
///
/// * `max_missing` in `0..=10`
/// * `plan_size` in `1..=4`
/// * `max_suggestions` in `1..=12`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionParams {
    pub available: AvailableSet,
    pub max_missing: usize,
    pub allow_substitutions: bool,
    pub plan_size: usize,
    pub max_suggestions: usize,
}

fn clamp(value: i64, min: usize, max: usize) -> usize {
    value.clamp(min as i64, max as i64) as usize
}

impl SuggestionRequest {
    pub fn clamped(&self) -> SuggestionParams {
        SuggestionParams {
            available: self.available_ingredients.iter().collect(),
            max_missing: clamp(self.max_missing, 0, MAX_MISSING_LIMIT),
            allow_substitutions: self.allow_substitutions,
            plan_size: clamp(self.plan_size, 1, MAX_PLAN_SIZE),
            max_suggestions: clamp(self.max_suggestions, 1, MAX_SUGGESTIONS_LIMIT),
        }
    }
}
