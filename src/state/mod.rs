mod persistence;
mod recipes;
mod worksheet;

pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
pub use recipes::{find_recipe, next_recipe_id, now_millis, RecipeBook, RecipeStore};
pub use worksheet::{evaluate, CostTable, Worksheet, WorksheetSummary};
