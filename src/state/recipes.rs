use std::time::{SystemTime, UNIX_EPOCH};

use strsim::jaro_winkler;
use tracing::{debug, info, warn};

use crate::error::{HppError, Result};
use crate::models::{LineItem, ProductionParameters, Recipe};
use crate::pricing::constants::{FUZZY_MATCH_THRESHOLD, RECIPES_KEY};
use crate::state::persistence::KeyValueStore;

/// The narrow storage interface the worksheet needs for recipes.
pub trait RecipeStore {
    /// All saved recipes in creation order. Never fails; unreadable data is empty.
    fn list_recipes(&self) -> Vec<Recipe>;

    /// Append a new recipe. Rejects a blank name before writing anything.
    fn save_recipe(
        &mut self,
        name: &str,
        materials: &[LineItem],
        operations: &[LineItem],
        production: ProductionParameters,
    ) -> Result<Recipe>;

    /// Remove a recipe by id. Unknown ids are ignored.
    fn delete_recipe(&mut self, id: u64) -> Result<()>;

    /// Fetch a stored snapshot by id.
    fn load_recipe(&self, id: u64) -> Result<Recipe>;
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Pick a recipe id that sorts after every existing one.
///
/// Uses the clock when it has moved past the newest id, otherwise the newest
/// id plus one, so two saves within the same millisecond never collide.
pub fn next_recipe_id(now: u64, existing: &[Recipe]) -> u64 {
    let newest = existing.iter().map(|r| r.id).max();
    match newest {
        Some(newest) if newest >= now => newest.saturating_add(1),
        _ => now,
    }
}

/// Recipe collection kept as a single JSON array under one key.
pub struct RecipeBook<K: KeyValueStore> {
    store: K,
    clock: fn() -> u64,
}

impl<K: KeyValueStore> RecipeBook<K> {
    pub fn new(store: K) -> Self {
        Self::with_clock(store, now_millis)
    }

    /// Use a custom millisecond clock for id generation.
    pub fn with_clock(store: K, clock: fn() -> u64) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Read the collection for a rewrite. Store errors propagate so a failed
    /// read never turns into an overwrite; malformed JSON still reads as empty.
    fn read_all(&self) -> Result<Vec<Recipe>> {
        let Some(content) = self.store.get(RECIPES_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(parse_recipes(&content))
    }

    fn write_all(&mut self, recipes: &[Recipe]) -> Result<()> {
        let json = serde_json::to_string_pretty(recipes)?;
        self.store.set(RECIPES_KEY, &json)
    }
}

fn parse_recipes(content: &str) -> Vec<Recipe> {
    match serde_json::from_str::<Vec<Recipe>>(content) {
        Ok(recipes) => {
            debug!(count = recipes.len(), "loaded saved recipes");
            recipes
        }
        Err(e) => {
            warn!(error = %e, "saved recipes are malformed, treating as empty");
            Vec::new()
        }
    }
}

impl<K: KeyValueStore> RecipeStore for RecipeBook<K> {
    fn list_recipes(&self) -> Vec<Recipe> {
        let content = match self.store.get(RECIPES_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read saved recipes, treating as empty");
                return Vec::new();
            }
        };

        parse_recipes(&content)
    }

    fn save_recipe(
        &mut self,
        name: &str,
        materials: &[LineItem],
        operations: &[LineItem],
        production: ProductionParameters,
    ) -> Result<Recipe> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HppError::EmptyRecipeName);
        }

        let mut recipes = self.read_all()?;
        let recipe = Recipe {
            id: next_recipe_id((self.clock)(), &recipes),
            name: name.to_string(),
            materials: materials.to_vec(),
            operations: operations.to_vec(),
            production,
        };
        recipes.push(recipe.clone());
        self.write_all(&recipes)?;

        info!(id = recipe.id, name = %recipe.name, "saved recipe");
        Ok(recipe)
    }

    fn delete_recipe(&mut self, id: u64) -> Result<()> {
        let mut recipes = self.read_all()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            debug!(id, "delete requested for unknown recipe");
            return Ok(());
        }

        self.write_all(&recipes)?;
        info!(id, "deleted recipe");
        Ok(())
    }

    fn load_recipe(&self, id: u64) -> Result<Recipe> {
        self.list_recipes()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(HppError::RecipeNotFound(id))
    }
}

/// Resolve a recipe by id, exact name (case-insensitive), or fuzzy name.
///
/// When several recipes share a name the newest wins.
pub fn find_recipe<'a>(recipes: &'a [Recipe], query: &str) -> Option<&'a Recipe> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Ok(id) = query.parse::<u64>() {
        if let Some(recipe) = recipes.iter().find(|r| r.id == id) {
            return Some(recipe);
        }
    }

    let needle = query.to_lowercase();
    let exact = recipes
        .iter()
        .filter(|r| r.name.to_lowercase() == needle)
        .max_by_key(|r| r.id);
    if exact.is_some() {
        return exact;
    }

    recipes
        .iter()
        .map(|r| (r, jaro_winkler(&r.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(r, _)| r)
}
