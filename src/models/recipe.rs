use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::models::LineItem;
use crate::pricing::constants::DEFAULT_MARGIN_PERCENT;

/// Batch-level inputs to the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionParameters {
    /// Finished units produced by one batch.
    #[serde(alias = "yield", default)]
    pub yield_quantity: f64,

    /// Desired margin as a percent of unit cost. May be zero or negative.
    #[serde(alias = "margin", default = "default_margin")]
    pub margin_percent: f64,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN_PERCENT
}

impl Default for ProductionParameters {
    fn default() -> Self {
        Self {
            yield_quantity: 0.0,
            margin_percent: DEFAULT_MARGIN_PERCENT,
        }
    }
}

/// A named snapshot of every cost input for one product.
///
/// Totals are never stored; they are re-derived from the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub materials: Vec<LineItem>,
    #[serde(default)]
    pub operations: Vec<LineItem>,
    #[serde(default)]
    pub production: ProductionParameters,
}

impl Recipe {
    /// Local creation time derived from the id.
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        let millis = i64::try_from(self.id).ok()?;
        DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&Local))
    }

    /// Creation date formatted for listings.
    pub fn created_date(&self) -> String {
        self.created_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
