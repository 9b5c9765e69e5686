pub mod loader;
pub mod model;

pub use loader::{load_catalog, load_ingredient_tags, load_recipes, load_substitutions};
pub use model::{normalize_ingredient, AvailableSet, Recipe, SubstitutionTable};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::CatalogError;
use model::normalize_unique;

/// Everything the engine reads: recipes, the substitution table and the
/// ingredient tags. Built once at startup and never mutated afterwards, so a
/// single instance can be shared by any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: BTreeMap<String, Recipe>,
    substitutions: SubstitutionTable,
    ingredient_tags: HashMap<String, Vec<String>>,
    // ingredient -> ids of recipes that need it
    ingredient_index: HashMap<String, BTreeSet<String>>,
}

impl Catalog {
    /// Validates the recipes and assembles the catalog.
    ///
    /// Fails when a recipe has an empty id or title, lists no ingredients, or
    /// shares its id with another recipe.
    pub fn new(
        recipes: Vec<Recipe>,
        substitutions: SubstitutionTable,
        ingredient_tags: HashMap<String, Vec<String>>,
    ) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        let mut ingredient_index: HashMap<String, BTreeSet<String>> = HashMap::new();

        for mut recipe in recipes {
            recipe.id = recipe.id.trim().to_string();
            recipe.title = recipe.title.trim().to_string();
            recipe.ingredients = normalize_unique(&recipe.ingredients);

            if recipe.id.is_empty() {
                return Err(CatalogError::InvalidRecipe {
                    id: recipe.title.clone(),
                    reason: "recipe id is empty".to_string(),
                });
            }
            if recipe.title.is_empty() {
                return Err(CatalogError::InvalidRecipe {
                    id: recipe.id.clone(),
                    reason: "recipe title is empty".to_string(),
                });
            }
            if recipe.ingredients.is_empty() {
                return Err(CatalogError::InvalidRecipe {
                    id: recipe.id.clone(),
                    reason: "recipe lists no ingredients".to_string(),
                });
            }
            if by_id.contains_key(&recipe.id) {
                return Err(CatalogError::DuplicateRecipe(recipe.id));
            }

            for ingredient in &recipe.ingredients {
                ingredient_index
                    .entry(ingredient.clone())
                    .or_default()
                    .insert(recipe.id.clone());
            }
            by_id.insert(recipe.id.clone(), recipe);
        }

        let ingredient_tags = ingredient_tags
            .into_iter()
            .map(|(ingredient, tags)| (normalize_ingredient(&ingredient), tags))
            .filter(|(ingredient, _)| !ingredient.is_empty())
            .collect();

        Ok(Self {
            recipes: by_id,
            substitutions,
            ingredient_tags,
            ingredient_index,
        })
    }

    /// All recipes in id order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Every ingredient any recipe needs, sorted.
    pub fn all_ingredients(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ingredient_index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Ids of the recipes that need `ingredient`, in id order.
    pub fn recipes_using(&self, ingredient: &str) -> Vec<&str> {
        self.ingredient_index
            .get(&normalize_ingredient(ingredient))
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn ingredient_tags(&self, ingredient: &str) -> &[String] {
        self.ingredient_tags
            .get(&normalize_ingredient(ingredient))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("pancakes", "Pancakes", ["Egg", "flour", "milk"]),
            Recipe::new("omelette", "Omelette", ["egg", "butter", "EGG"]),
        ]
    }

    #[test]
    fn test_catalog_indexes_ingredients() -> Result<(), CatalogError> {
        let catalog = Catalog::new(sample_recipes(), SubstitutionTable::default(), HashMap::new())?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all_ingredients(), vec!["butter", "egg", "flour", "milk"]);
        assert_eq!(catalog.recipes_using(" EGG "), vec!["omelette", "pancakes"]);
        assert!(catalog.recipes_using("saffron").is_empty());

        let ids: Vec<&str> = catalog.recipes().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["omelette", "pancakes"]);
        assert_eq!(catalog.recipe("omelette").map(|r| r.ingredients.len()), Some(2));
        Ok(())
    }

    #[test]
    fn test_catalog_rejects_recipe_without_ingredients() {
        let recipes = vec![Recipe::new("toast", "Toast", Vec::<String>::new())];
        let result = Catalog::new(recipes, SubstitutionTable::default(), HashMap::new());
        assert!(matches!(result, Err(CatalogError::InvalidRecipe { ref id, .. }) if id == "toast"));
    }

    #[test]
    fn test_catalog_rejects_blank_ingredients_only() {
        let recipes = vec![Recipe::new("air", "Air", ["  ", ""])];
        let result = Catalog::new(recipes, SubstitutionTable::default(), HashMap::new());
        assert!(matches!(result, Err(CatalogError::InvalidRecipe { .. })));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let mut recipes = sample_recipes();
        recipes.push(Recipe::new("pancakes", "Other pancakes", ["egg"]));
        let result = Catalog::new(recipes, SubstitutionTable::default(), HashMap::new());
        assert!(matches!(result, Err(CatalogError::DuplicateRecipe(ref id)) if id == "pancakes"));
    }

    #[test]
    fn test_catalog_rejects_empty_id() {
        let recipes = vec![Recipe::new("  ", "Nameless", ["egg"])];
        let result = Catalog::new(recipes, SubstitutionTable::default(), HashMap::new());
        assert!(matches!(result, Err(CatalogError::InvalidRecipe { .. })));
    }

    #[test]
    fn test_ingredient_tags_are_normalized() -> Result<(), CatalogError> {
        let mut tags = HashMap::new();
        tags.insert("Basil ".to_string(), vec!["herb".to_string(), "fresh".to_string()]);
        let catalog = Catalog::new(sample_recipes(), SubstitutionTable::default(), tags)?;

        assert_eq!(catalog.ingredient_tags("basil"), ["herb", "fresh"]);
        assert!(catalog.ingredient_tags("egg").is_empty());
        Ok(())
    }
}
