use serde::Serialize;

/// Whether selling at the market price makes money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarginVerdict {
    Favorable,
    Unfavorable,
}

/// Margin and per-unit profit implied by an observed market price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginAnalysis {
    pub market_price: f64,
    pub unit_cost: f64,
    /// Realized margin as a percent of unit cost. Negative below cost.
    pub real_margin: f64,
    /// Cash profit per produced unit. Negative below cost.
    pub cash_profit: f64,
    pub verdict: MarginVerdict,
}

/// Realized margin in percent, or 0 when either price is not positive.
pub fn real_margin(market_price: f64, unit_cost: f64) -> f64 {
    if market_price <= 0.0 || unit_cost <= 0.0 {
        return 0.0;
    }
    (market_price - unit_cost) / unit_cost * 100.0
}

/// Analyze a market price against the unit cost.
///
/// Returns `None` when there is nothing to analyze (no market price or no
/// unit cost); the analysis panel should be hidden rather than show 0%.
pub fn analyze_market_price(market_price: f64, unit_cost: f64) -> Option<MarginAnalysis> {
    if market_price <= 0.0 || unit_cost <= 0.0 {
        return None;
    }

    let real_margin = real_margin(market_price, unit_cost);
    let verdict = if real_margin > 0.0 {
        MarginVerdict::Favorable
    } else {
        MarginVerdict::Unfavorable
    };

    Some(MarginAnalysis {
        market_price,
        unit_cost,
        real_margin,
        cash_profit: market_price - unit_cost,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_margin_suppressed() {
        assert_eq!(real_margin(0.0, 550.0), 0.0);
        assert_eq!(real_margin(-10.0, 550.0), 0.0);
        assert_eq!(real_margin(450.0, 0.0), 0.0);
        assert!(analyze_market_price(0.0, 550.0).is_none());
        assert!(analyze_market_price(450.0, 0.0).is_none());
    }

    #[test]
    fn test_break_even_is_unfavorable() {
        let analysis = analyze_market_price(550.0, 550.0).unwrap();
        assert_eq!(analysis.real_margin, 0.0);
        assert_eq!(analysis.cash_profit, 0.0);
        assert_eq!(analysis.verdict, MarginVerdict::Unfavorable);
    }

    #[test]
    fn test_below_cost() {
        let analysis = analyze_market_price(450.0, 550.0).unwrap();
        assert!((analysis.real_margin - (-18.1818)).abs() < 0.001);
        assert!((analysis.cash_profit - (-100.0)).abs() < 1e-9);
        assert_eq!(analysis.verdict, MarginVerdict::Unfavorable);
    }

    #[test]
    fn test_above_cost() {
        let analysis = analyze_market_price(1000.0, 500.0).unwrap();
        assert!((analysis.real_margin - 100.0).abs() < 1e-9);
        assert_eq!(analysis.verdict, MarginVerdict::Favorable);
    }
}
