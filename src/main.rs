use std::path::Path;

use clap::Parser;
use tracing::debug;

use hpp_calc_rs::cli::{Cli, Command};
use hpp_calc_rs::error::{HppError, Result};
use hpp_calc_rs::interface::{
    display_recipe_list, display_summary, display_worksheet, format_currency, format_percent,
    run_session, write_breakdown_csv,
};
use hpp_calc_rs::logging;
use hpp_calc_rs::models::ProductionParameters;
use hpp_calc_rs::pricing::{analyze_market_price, quote_price, MarginVerdict, RoundingPolicy};
use hpp_calc_rs::state::{find_recipe, JsonFileStore, RecipeBook, RecipeStore, Worksheet};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();
    let policy = RoundingPolicy::default();
    let mut book = RecipeBook::new(JsonFileStore::new(&cli.store_dir));
    debug!(store = %cli.store_dir.display(), "opened recipe store");

    match command {
        Command::Session => cmd_session(&mut book, &policy),
        Command::List => {
            display_recipe_list(&book.list_recipes());
            Ok(())
        }
        Command::Show {
            query,
            market_price,
        } => cmd_show(&book, &query, market_price, &policy),
        Command::Delete { id } => cmd_delete(&mut book, id),
        Command::Quote {
            total,
            yield_quantity,
            margin,
            market_price,
        } => cmd_quote(total, yield_quantity, margin, market_price, &policy),
        Command::Export { query, out } => cmd_export(&book, &query, &out, &policy),
    }
}

/// Run the interactive worksheet.
fn cmd_session<S: RecipeStore>(store: &mut S, policy: &RoundingPolicy) -> Result<()> {
    let mut sheet = Worksheet::new();
    println!("{} saved recipes available.", store.list_recipes().len());
    run_session(&mut sheet, store, policy)
}

/// Load a recipe into a fresh worksheet by id or name.
fn load_worksheet<S: RecipeStore>(store: &S, query: &str) -> Result<Worksheet> {
    let recipes = store.list_recipes();
    let recipe = find_recipe(&recipes, query)
        .ok_or_else(|| HppError::InvalidInput(format!("No recipe matches '{}'", query)))?;

    let mut sheet = Worksheet::new();
    sheet.load_from(store, recipe.id)?;
    Ok(sheet)
}

/// Print the full costing of a saved recipe.
fn cmd_show<S: RecipeStore>(
    store: &S,
    query: &str,
    market_price: Option<f64>,
    policy: &RoundingPolicy,
) -> Result<()> {
    let mut sheet = load_worksheet(store, query)?;
    if let Some(price) = market_price {
        sheet.set_market_price(price);
    }
    display_worksheet(&sheet, policy);
    Ok(())
}

/// Delete a recipe; unknown ids are not an error.
fn cmd_delete<S: RecipeStore>(store: &mut S, id: u64) -> Result<()> {
    let existed = store.list_recipes().iter().any(|r| r.id == id);
    store.delete_recipe(id)?;

    if existed {
        println!("Recipe {} deleted.", id);
    } else {
        println!("No recipe with id {}; nothing deleted.", id);
    }
    Ok(())
}

/// One-shot pricing from a batch total.
fn cmd_quote(
    total: f64,
    yield_quantity: f64,
    margin: f64,
    market_price: Option<f64>,
    policy: &RoundingPolicy,
) -> Result<()> {
    let production = ProductionParameters {
        yield_quantity,
        margin_percent: margin,
    };
    let quote = quote_price(total, &production, policy);

    println!("HPP per unit: {}", format_currency(quote.unit_cost));
    println!("Profit at {}% margin: {}", margin, format_currency(quote.profit_amount));
    println!("Mathematical price: {}", format_currency(quote.raw_selling_price));
    println!("Suggested price: {}", format_currency(quote.smart_price));

    if let Some(analysis) = market_price.and_then(|p| analyze_market_price(p, quote.unit_cost)) {
        let label = match analysis.verdict {
            MarginVerdict::Favorable => "profit",
            MarginVerdict::Unfavorable => "loss",
        };
        println!(
            "At {}: margin {} ({}), cash profit {} / unit",
            format_currency(analysis.market_price),
            format_percent(analysis.real_margin),
            label,
            format_currency(analysis.cash_profit)
        );
    }
    Ok(())
}

/// Write a recipe's breakdown to CSV and print its summary.
fn cmd_export<S: RecipeStore>(
    store: &S,
    query: &str,
    out: &Path,
    policy: &RoundingPolicy,
) -> Result<()> {
    let sheet = load_worksheet(store, query)?;
    let summary = sheet.evaluate(policy);

    write_breakdown_csv(out, sheet.materials().rows(), sheet.operations().rows(), &summary)?;
    display_summary(&sheet, &summary, policy);
    println!("Wrote breakdown to {}", out.display());
    Ok(())
}
