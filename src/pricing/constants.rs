/// Default desired margin, in percent of unit cost.
pub const DEFAULT_MARGIN_PERCENT: f64 = 30.0;

/// Prices below this use the small rounding step; at or above it, the large step.
pub const ROUNDING_THRESHOLD: f64 = 1000.0;

/// Rounding step for prices below `ROUNDING_THRESHOLD`.
pub const SMALL_ROUNDING_STEP: f64 = 100.0;

/// Rounding step for prices at or above `ROUNDING_THRESHOLD`.
pub const LARGE_ROUNDING_STEP: f64 = 500.0;

// ─────────────────────────────────────────────────────────────────────────────
// Row defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Unit assigned to a freshly added material row.
pub const DEFAULT_MATERIAL_UNIT: &str = "gram";

/// Package content assigned to a freshly added material row.
pub const DEFAULT_MATERIAL_CONTENT: f64 = 1000.0;

/// Unit assigned to a freshly added operation row.
pub const DEFAULT_OPERATION_UNIT: &str = "hour";

/// Package content assigned to a freshly added operation row.
pub const DEFAULT_OPERATION_CONTENT: f64 = 1.0;

/// Units offered for material rows.
pub const MATERIAL_UNITS: [&str; 5] = ["gram", "kg", "ml", "liter", "piece"];

/// Units offered for operation rows.
pub const OPERATION_UNITS: [&str; 3] = ["hour", "day", "month"];

/// Name given to a fresh worksheet.
pub const DEFAULT_RECIPE_NAME: &str = "New Recipe";

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

/// Key under which the recipe collection is stored.
pub const RECIPES_KEY: &str = "hpp_recipes";

/// Minimum Jaro-Winkler similarity for a fuzzy recipe name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
