use crate::models::{LineItem, Recipe};
use crate::pricing::{MarginVerdict, RoundingPolicy};
use crate::state::{CostTable, Worksheet, WorksheetSummary};

/// Format an amount as whole Rupiah with `.` thousands separators.
///
/// Rounds to the nearest unit; only for display, never for stored values.
pub fn format_currency(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Format a percentage with one decimal and an explicit sign.
pub fn format_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// Display one cost table with its total.
pub fn display_table(table: &CostTable) {
    println!();
    println!("=== {} ===", table.kind().title());
    println!();

    let max_label_len = table
        .rows()
        .iter()
        .map(|r| r.display_label().len())
        .max()
        .unwrap_or(10);

    for item in table.rows() {
        println!("{}", format_row(item, max_label_len));
    }

    println!("  Total: {}", format_currency(table.total()));
}

fn format_row(item: &LineItem, width: usize) -> String {
    format!(
        "  #{:<3} {:<width$}  {:>12} / {} {}  use {}  => {}",
        item.id,
        item.display_label(),
        format_currency(item.unit_price),
        item.package_content,
        item.unit,
        item.usage_amount,
        format_currency(item.cost),
        width = width
    )
}

/// Display the cost composition, pricing and market analysis panels.
pub fn display_summary(sheet: &Worksheet, summary: &WorksheetSummary, policy: &RoundingPolicy) {
    let totals = &summary.totals;
    let quote = &summary.quote;
    let production = sheet.production();

    println!();
    println!("=== {} ===", sheet.recipe_name);
    println!();
    println!("--- Cost Composition ---");
    println!(
        "Materials:  {} ({:.0}%)",
        format_currency(totals.material),
        totals.material_share()
    );
    println!(
        "Operations: {} ({:.0}%)",
        format_currency(totals.operational),
        totals.operational_share()
    );
    println!("Total production cost: {}", format_currency(totals.grand));
    println!();

    println!("--- Pricing ---");
    println!(
        "HPP per unit (for {} units): {}",
        production.yield_quantity,
        format_currency(quote.unit_cost)
    );
    println!(
        "Profit at {}% margin: {}",
        production.margin_percent,
        format_currency(quote.profit_amount)
    );
    println!("Mathematical price: {}", format_currency(quote.raw_selling_price));
    println!(
        "Suggested price: {}  (rounded up to multiples of {:.0} below {:.0}, {:.0} above)",
        format_currency(quote.smart_price),
        policy.small_step,
        policy.threshold,
        policy.large_step
    );

    if let Some(market) = &summary.market {
        println!();
        println!("--- Market Check ---");
        println!("Market price: {}", format_currency(market.market_price));
        let label = match market.verdict {
            MarginVerdict::Favorable => "profit",
            MarginVerdict::Unfavorable => "loss",
        };
        println!(
            "Your margin: {} ({})",
            format_percent(market.real_margin),
            label
        );
        println!("Cash profit: {} / unit", format_currency(market.cash_profit));
    }
    println!();
}

/// Display the full worksheet: both tables and the summary.
pub fn display_worksheet(sheet: &Worksheet, policy: &RoundingPolicy) {
    display_table(sheet.materials());
    display_table(sheet.operations());
    display_summary(sheet, &sheet.evaluate(policy), policy);
}

/// Display saved recipes, oldest first.
pub fn display_recipe_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No saved recipes.");
        return;
    }

    println!();
    println!("=== Saved Recipes ({}) ===", recipes.len());
    println!();
    for recipe in recipes {
        println!(
            "  {:>14}  {}  {}",
            recipe.id,
            recipe.created_date(),
            recipe.name
        );
    }
    println!();
}
