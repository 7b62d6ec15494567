use serde::Serialize;
use tracing::debug;

use crate::error::{HppError, Result};
use crate::models::{ItemField, ItemKind, LineItem, ProductionParameters, Recipe};
use crate::pricing::calculations::{quote_price, sanitize, total_cost};
use crate::pricing::constants::DEFAULT_RECIPE_NAME;
use crate::pricing::reverse::analyze_market_price;
use crate::pricing::{CostTotals, MarginAnalysis, PriceQuote, RoundingPolicy};
use crate::state::recipes::RecipeStore;

/// An ordered list of line items of one kind. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    kind: ItemKind,
    rows: Vec<LineItem>,
}

impl CostTable {
    /// A table holding one default row.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            rows: vec![LineItem::new(1, kind)],
        }
    }

    /// Build a table from stored rows, recomputing every cost.
    ///
    /// An empty list gets a single default row.
    pub fn from_rows(kind: ItemKind, mut rows: Vec<LineItem>) -> Self {
        if rows.is_empty() {
            return Self::new(kind);
        }
        for row in &mut rows {
            row.recompute_cost();
        }
        Self { kind, rows }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a table keeps at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&LineItem> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn total(&self) -> f64 {
        total_cost(&self.rows)
    }

    /// Append a default row and return its id.
    pub fn add_row(&mut self) -> u64 {
        let id = self
            .rows
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.rows.push(LineItem::new(id, self.kind));
        id
    }

    /// Remove the first row with this id. Returns false if the id is unknown
    /// or it is the last row.
    pub fn remove_row(&mut self, id: u64) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        match self.rows.iter().position(|r| r.id == id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Edit one field of one row; only that row's cost is recomputed.
    pub fn update_row(&mut self, id: u64, field: ItemField) -> Result<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(HppError::RowNotFound(id))?;
        row.apply(field);
        debug!(kind = ?self.kind, id, cost = row.cost, "row updated");
        Ok(())
    }
}

/// The mutable working set of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub recipe_name: String,
    materials: CostTable,
    operations: CostTable,
    production: ProductionParameters,
    market_price: f64,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Worksheet {
    pub fn new() -> Self {
        Self {
            recipe_name: DEFAULT_RECIPE_NAME.to_string(),
            materials: CostTable::new(ItemKind::Material),
            operations: CostTable::new(ItemKind::Operation),
            production: ProductionParameters::default(),
            market_price: 0.0,
        }
    }

    pub fn materials(&self) -> &CostTable {
        &self.materials
    }

    pub fn operations(&self) -> &CostTable {
        &self.operations
    }

    pub fn table(&self, kind: ItemKind) -> &CostTable {
        match kind {
            ItemKind::Material => &self.materials,
            ItemKind::Operation => &self.operations,
        }
    }

    pub fn table_mut(&mut self, kind: ItemKind) -> &mut CostTable {
        match kind {
            ItemKind::Material => &mut self.materials,
            ItemKind::Operation => &mut self.operations,
        }
    }

    pub fn production(&self) -> ProductionParameters {
        self.production
    }

    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    pub fn set_yield(&mut self, yield_quantity: f64) {
        self.production.yield_quantity = sanitize(yield_quantity);
    }

    pub fn set_margin(&mut self, margin_percent: f64) {
        self.production.margin_percent = sanitize(margin_percent);
    }

    pub fn set_market_price(&mut self, market_price: f64) {
        self.market_price = sanitize(market_price);
    }

    /// Back to a fresh worksheet.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replace tables, production parameters and name with a recipe's.
    ///
    /// The market price is left as is.
    pub fn apply_recipe(&mut self, recipe: Recipe) {
        self.recipe_name = recipe.name;
        self.materials = CostTable::from_rows(ItemKind::Material, recipe.materials);
        self.operations = CostTable::from_rows(ItemKind::Operation, recipe.operations);
        self.production = ProductionParameters {
            yield_quantity: sanitize(recipe.production.yield_quantity),
            margin_percent: sanitize(recipe.production.margin_percent),
        };
    }

    /// Save the current inputs under the worksheet's recipe name.
    pub fn save_to<S: RecipeStore + ?Sized>(&self, store: &mut S) -> Result<Recipe> {
        store.save_recipe(
            &self.recipe_name,
            self.materials.rows(),
            self.operations.rows(),
            self.production,
        )
    }

    /// Load a recipe from the store, overwriting the current inputs.
    pub fn load_from<S: RecipeStore + ?Sized>(&mut self, store: &S, id: u64) -> Result<()> {
        let recipe = store.load_recipe(id)?;
        self.apply_recipe(recipe);
        Ok(())
    }

    /// Derive every display value from the current inputs.
    pub fn evaluate(&self, policy: &RoundingPolicy) -> WorksheetSummary {
        evaluate(
            self.materials.rows(),
            self.operations.rows(),
            &self.production,
            self.market_price,
            policy,
        )
    }
}

/// All derived values for one input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorksheetSummary {
    pub totals: CostTotals,
    pub quote: PriceQuote,
    /// `None` when there is no market price or no unit cost to compare.
    pub market: Option<MarginAnalysis>,
}

/// Pure pricing pipeline: line items to totals, quote and market analysis.
pub fn evaluate(
    materials: &[LineItem],
    operations: &[LineItem],
    production: &ProductionParameters,
    market_price: f64,
    policy: &RoundingPolicy,
) -> WorksheetSummary {
    let totals = CostTotals::from_items(materials, operations);
    let quote = quote_price(totals.grand, production, policy);
    let market = analyze_market_price(market_price, quote.unit_cost);

    WorksheetSummary {
        totals,
        quote,
        market,
    }
}
