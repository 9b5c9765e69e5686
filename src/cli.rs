use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::SuggestionRequest;

#[derive(Parser, Debug)]
#[command(author, version, about = "Suggests recipes for the ingredients you already have", long_about = None)]
pub struct Cli {
    /// Directory holding recipes.json, substitutions.json and ingredient_tags.json
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest recipes, or plans combining several recipes, for a pantry
    Suggest(SuggestArgs),
    /// Show what is missing for specific recipes and what could replace it
    Gaps(GapsArgs),
    /// List every recipe in the catalog
    Recipes,
    /// List every ingredient used by the catalog
    Ingredients {
        /// Include ingredient tags and the recipes using each ingredient
        #[arg(long)]
        details: bool,
    },
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// JSON request payload file, `-` for stdin. When given, the other flags are ignored.
    #[arg(short, long)]
    pub request: Option<String>,

    /// Ingredients on hand, comma separated
    #[arg(long = "have", value_delimiter = ',')]
    pub available: Vec<String>,

    #[arg(long, default_value_t = 3)]
    pub max_missing: i64,

    /// Do not use the substitution table
    #[arg(long)]
    pub no_substitutions: bool,

    /// How many recipes a single suggestion may combine
    #[arg(long, default_value_t = 1)]
    pub plan_size: i64,

    #[arg(long, default_value_t = 8)]
    pub max_suggestions: i64,
}

impl SuggestArgs {
    pub fn to_request(&self) -> SuggestionRequest {
        SuggestionRequest {
            available_ingredients: self.available.clone(),
            max_missing: self.max_missing,
            allow_substitutions: !self.no_substitutions,
            plan_size: self.plan_size,
            max_suggestions: self.max_suggestions,
            prioritize_min_missing: true,
        }
    }
}

#[derive(Args, Debug)]
pub struct GapsArgs {
    /// Recipe id to analyze, repeatable
    #[arg(short, long = "recipe", required = true)]
    pub recipe_ids: Vec<String>,

    /// Ingredients on hand, comma separated
    #[arg(long = "have", value_delimiter = ',')]
    pub available: Vec<String>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
