pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;

pub use catalog::{load_catalog, AvailableSet, Catalog, Recipe, SubstitutionTable};
pub use config::EngineConfig;
pub use engine::{analyze_gaps, suggest, SuggestionRequest, SuggestionResponse};
pub use error::CatalogError;
