use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Canonical form used for every ingredient comparison: trimmed and lowercased.
pub fn normalize_ingredient(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalizes a list of names, dropping blanks and later duplicates while keeping
/// the first-seen order.
pub(crate) fn normalize_unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for name in names {
        let key = normalize_ingredient(name.as_ref());
        if !key.is_empty() && seen.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    /// Normalized, duplicates removed, in the order the dataset lists them.
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn new<I, S>(id: impl Into<String>, title: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: id.into().trim().to_string(),
            title: title.into().trim().to_string(),
            ingredients: normalize_unique(ingredients),
            instructions: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether this recipe, prepared as part of a plan, yields `ingredient`.
    /// A "pesto" recipe yields the `pesto` another recipe asks for.
    pub fn yields(&self, ingredient: &str) -> bool {
        normalize_ingredient(&self.id) == ingredient || normalize_ingredient(&self.title) == ingredient
    }
}

/// Ingredient -> acceptable alternatives, in preference order. Lookups are not
/// transitive: an alternative's own alternatives are never consulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionTable {
    entries: HashMap<String, Vec<String>>,
}

impl SubstitutionTable {
    pub fn new<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (ingredient, alternatives) in raw {
            let key = normalize_ingredient(ingredient.as_ref());
            if key.is_empty() {
                continue;
            }
            let slot = entries.entry(key.clone()).or_default();
            for alt in normalize_unique(alternatives) {
                // An ingredient is never its own substitute.
                if alt != key && !slot.contains(&alt) {
                    slot.push(alt);
                }
            }
        }
        Self { entries }
    }

    /// Alternatives for an already-normalized ingredient; empty when unknown.
    pub fn alternatives(&self, ingredient: &str) -> &[String] {
        self.entries.get(ingredient).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The caller's pantry. Entries are normalized on the way in so membership checks
/// line up with recipe ingredients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableSet {
    items: BTreeSet<String>,
}

impl AvailableSet {
    pub fn contains(&self, ingredient: &str) -> bool {
        self.items.contains(ingredient)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AvailableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|s| normalize_ingredient(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
