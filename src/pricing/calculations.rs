use serde::Serialize;

use crate::models::{LineItem, ProductionParameters};
use crate::pricing::constants::*;

/// Map non-finite numbers to zero so they never reach the arithmetic below.
#[inline]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Parse user-entered text as a number, falling back to zero.
pub fn coerce_number(input: &str) -> f64 {
    input.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
}

/// Consumed cost of one line item.
///
/// A zero package content is a "not yet configured" row and costs nothing.
pub fn compute_cost(unit_price: f64, package_content: f64, usage_amount: f64) -> f64 {
    if package_content == 0.0 || !package_content.is_finite() {
        return 0.0;
    }
    sanitize((unit_price / package_content) * usage_amount)
}

/// Sum of the `cost` field over a table.
pub fn total_cost(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.cost).sum()
}

/// Category totals for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostTotals {
    pub material: f64,
    pub operational: f64,
    pub grand: f64,
}

impl CostTotals {
    pub fn from_items(materials: &[LineItem], operations: &[LineItem]) -> Self {
        let material = total_cost(materials);
        let operational = total_cost(operations);
        Self {
            material,
            operational,
            grand: material + operational,
        }
    }

    /// Share of the grand total spent on materials, in percent.
    pub fn material_share(&self) -> f64 {
        share_percent(self.material, self.grand)
    }

    /// Share of the grand total spent on operations, in percent.
    pub fn operational_share(&self) -> f64 {
        share_percent(self.operational, self.grand)
    }
}

fn share_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Production cost per finished unit (HPP). Zero yield gives zero.
pub fn unit_cost(total_production_cost: f64, yield_quantity: f64) -> f64 {
    if yield_quantity > 0.0 {
        total_production_cost / yield_quantity
    } else {
        0.0
    }
}

/// Profit added on top of the unit cost for a given margin.
pub fn profit_amount(unit_cost: f64, margin_percent: f64) -> f64 {
    unit_cost * (margin_percent / 100.0)
}

/// Step sizes used by smart rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingPolicy {
    /// Prices at or above this use `large_step`.
    pub threshold: f64,
    pub small_step: f64,
    pub large_step: f64,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            threshold: ROUNDING_THRESHOLD,
            small_step: SMALL_ROUNDING_STEP,
            large_step: LARGE_ROUNDING_STEP,
        }
    }
}

/// Round a price up to a cash-friendly denomination.
///
/// Below 1000 the price goes up to the next multiple of 100, otherwise to the
/// next multiple of 500. Exactly 1000 takes the 500 branch.
pub fn round_up_price(price: f64) -> f64 {
    round_up_price_with(price, &RoundingPolicy::default())
}

/// Smart rounding with explicit step sizes.
pub fn round_up_price_with(price: f64, policy: &RoundingPolicy) -> f64 {
    let step = if price < policy.threshold {
        policy.small_step
    } else {
        policy.large_step
    };
    if step <= 0.0 {
        return price;
    }
    // -0.0 shows up as "-0" in formatting
    (price / step).ceil() * step + 0.0
}

/// Everything the pricing panel shows for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceQuote {
    pub unit_cost: f64,
    pub profit_amount: f64,
    /// Unrounded unit cost plus profit.
    pub raw_selling_price: f64,
    /// `raw_selling_price` after smart rounding.
    pub smart_price: f64,
}

/// Derive unit cost and prices from a batch total and production parameters.
pub fn quote_price(
    total_production_cost: f64,
    production: &ProductionParameters,
    policy: &RoundingPolicy,
) -> PriceQuote {
    let unit_cost = unit_cost(total_production_cost, production.yield_quantity);
    let profit_amount = profit_amount(unit_cost, production.margin_percent);
    let raw_selling_price = unit_cost + profit_amount;

    PriceQuote {
        unit_cost,
        profit_amount,
        raw_selling_price,
        smart_price: round_up_price_with(raw_selling_price, policy),
    }
}
