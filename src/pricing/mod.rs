pub mod calculations;
pub mod constants;
pub mod reverse;

pub use calculations::{
    coerce_number, compute_cost, profit_amount, quote_price, round_up_price, round_up_price_with,
    sanitize, total_cost, unit_cost, CostTotals, PriceQuote, RoundingPolicy,
};
pub use constants::*;
pub use reverse::{analyze_market_price, real_margin, MarginAnalysis, MarginVerdict};
