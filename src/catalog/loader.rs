use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::model::{Recipe, SubstitutionTable};
use super::Catalog;
use crate::config::EngineConfig;
use crate::error::CatalogError;

// Shape of one entry in recipes.json. Anything beyond these fields is ignored.
#[derive(Debug, Deserialize)]
struct RecipeRecord {
    id: String,
    title: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        Recipe::new(record.id, record.title, record.ingredients)
            .with_instructions(record.instructions)
            .with_tags(record.tags)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }

    let records: Vec<RecipeRecord> = read_json(path)?;
    if records.is_empty() {
        return Err(CatalogError::EmptyCatalog(path.to_path_buf()));
    }
    debug!(count = records.len(), ?path, "parsed recipe records");

    Ok(records.into_iter().map(Recipe::from).collect())
}

/// The substitution file is optional; a missing file means no substitutions.
pub fn load_substitutions(path: &Path) -> Result<SubstitutionTable, CatalogError> {
    if !path.exists() {
        warn!(?path, "substitution file not found, continuing without substitutions");
        return Ok(SubstitutionTable::default());
    }
    let raw: HashMap<String, Vec<String>> = read_json(path)?;
    Ok(SubstitutionTable::new(raw))
}

pub fn load_ingredient_tags(path: &Path) -> Result<HashMap<String, Vec<String>>, CatalogError> {
    if !path.exists() {
        warn!(?path, "ingredient tag file not found, continuing without tags");
        return Ok(HashMap::new());
    }
    read_json(path)
}

/// Loads all three datasets named by `config` and validates them into a
/// [`Catalog`].
pub fn load_catalog(config: &EngineConfig) -> Result<Catalog, CatalogError> {
    let recipes = load_recipes(&config.recipes_path())?;
    let substitutions = load_substitutions(&config.substitutions_path())?;
    let ingredient_tags = load_ingredient_tags(&config.ingredient_tags_path())?;

    let catalog = Catalog::new(recipes, substitutions, ingredient_tags)?;
    info!(
        recipes = catalog.len(),
        substitutions = catalog.substitutions().len(),
        data_dir = ?config.data_dir,
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(content: &str) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", content)?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_recipes_success() -> anyhow::Result<()> {
        let file = json_file(
            r#"[
                {"id": "r1", "title": "Pancakes", "ingredients": ["Egg", "flour", "egg"],
                 "instructions": ["Mix", "Fry"], "tags": ["breakfast"], "servings": 4},
                {"id": "r2", "title": "Plain rice", "ingredients": ["rice"]}
            ]"#,
        )?;
        let recipes = load_recipes(file.path())?;

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].ingredients, vec!["egg", "flour"]);
        assert_eq!(recipes[0].instructions, vec!["Mix", "Fry"]);
        assert_eq!(recipes[0].tags, vec!["breakfast"]);
        assert!(recipes[1].instructions.is_empty());
        assert!(recipes[1].tags.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_recipes_file_not_found() {
        let path = Path::new("this_file_does_not_exist.json");
        let result = load_recipes(path);
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_load_recipes_empty_array() -> anyhow::Result<()> {
        let file = json_file("[]")?;
        let result = load_recipes(file.path());
        assert!(result.unwrap_err().to_string().contains("no recipes loaded"));
        Ok(())
    }

    #[test]
    fn test_load_recipes_malformed_json() -> anyhow::Result<()> {
        let file = json_file(r#"[{"id": "r1", "ingredients": ["egg"]}]"#)?; // no title
        let result = load_recipes(file.path());
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_load_substitutions_normalizes() -> anyhow::Result<()> {
        let file = json_file(r#"{"Milk": ["Butter", "oat milk"], "egg": []}"#)?;
        let table = load_substitutions(file.path())?;

        assert_eq!(table.alternatives("milk"), ["butter", "oat milk"]);
        assert!(table.alternatives("egg").is_empty());
        Ok(())
    }

    #[test]
    fn test_optional_files_may_be_missing() -> anyhow::Result<()> {
        let path = Path::new("no_substitutions_here.json");
        assert!(load_substitutions(path)?.is_empty());
        assert!(load_ingredient_tags(path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_catalog_from_data_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("recipes.json"),
            r#"[{"id": "r1", "title": "Pancakes", "ingredients": ["egg", "flour", "milk"]}]"#,
        )?;
        std::fs::write(dir.path().join("substitutions.json"), r#"{"milk": ["butter"]}"#)?;
        std::fs::write(dir.path().join("ingredient_tags.json"), r#"{"milk": ["dairy"]}"#)?;

        let catalog = load_catalog(&EngineConfig::with_data_dir(dir.path()))?;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.substitutions().alternatives("milk"), ["butter"]);
        assert_eq!(catalog.ingredient_tags("milk"), ["dairy"]);
        Ok(())
    }

    #[test]
    fn test_load_catalog_rejects_recipe_without_ingredients() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("recipes.json"),
            r#"[{"id": "r1", "title": "Nothing", "ingredients": []}]"#,
        )?;

        let result = load_catalog(&EngineConfig::with_data_dir(dir.path()));
        assert!(matches!(result, Err(CatalogError::InvalidRecipe { .. })));
        Ok(())
    }
}
