use anyhow::{Context, Result};
use flavor_graph::catalog::{load_catalog, AvailableSet, Catalog};
use flavor_graph::cli::{parse_args, Command};
use flavor_graph::config::EngineConfig;
use flavor_graph::engine::{analyze_gaps, suggest, SuggestionRequest};
use serde_json::json;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

const STDIN_MARKER: &str = "-";

fn init_tracing() {
    // Logs go to stderr so stdout carries nothing but the JSON response.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn read_request(source: &str) -> Result<SuggestionRequest> {
    let payload = if source == STDIN_MARKER {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read request payload from stdin")?;
        buf
    } else {
        fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read request file '{}'", source))?
    };

    serde_json::from_str(&payload).with_context(|| format!("Request payload from '{}' is not valid JSON", source))
}

fn ingredient_details(catalog: &Catalog) -> serde_json::Value {
    let details: Vec<serde_json::Value> = catalog
        .all_ingredients()
        .into_iter()
        .map(|name| {
            json!({
                "name": name,
                "tags": catalog.ingredient_tags(name),
                "used_by": catalog.recipes_using(name),
            })
        })
        .collect();
    json!({ "ingredients": details })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = parse_args();
    let config = match &cli.data_dir {
        Some(dir) => EngineConfig::with_data_dir(dir),
        None => EngineConfig::from_env(),
    };

    let catalog = load_catalog(&config)
        .with_context(|| format!("Failed to load recipe catalog from {:?}", config.data_dir))?;

    let output = match &cli.command {
        Command::Suggest(args) => {
            let request = match &args.request {
                Some(source) => read_request(source).await?,
                None => args.to_request(),
            };
            serde_json::to_value(suggest(&catalog, &request))?
        }
        Command::Gaps(args) => {
            let available: AvailableSet = args.available.iter().collect();
            serde_json::to_value(analyze_gaps(&catalog, args.recipe_ids.as_slice(), &available))?
        }
        Command::Recipes => {
            let recipes: Vec<_> = catalog.recipes().collect();
            json!({ "recipes": recipes })
        }
        Command::Ingredients { details: true } => ingredient_details(&catalog),
        Command::Ingredients { details: false } => json!({ "ingredients": catalog.all_ingredients() }),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize response")?
    );
    Ok(())
}
