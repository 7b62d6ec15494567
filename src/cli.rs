use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HPP Calculator: production cost and selling price for small-batch products.
#[derive(Parser, Debug)]
#[command(name = "hpp_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding saved recipes.
    #[arg(short, long, default_value = ".hpp", global = true)]
    pub store_dir: PathBuf,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive worksheet: edit costs, price, save and load recipes.
    Session,

    /// List saved recipes.
    List,

    /// Load a saved recipe and print its costing.
    Show {
        /// Recipe id or name.
        query: String,

        /// Competitor price to check your margin against.
        #[arg(long)]
        market_price: Option<f64>,
    },

    /// Delete a saved recipe by id.
    Delete {
        id: u64,
    },

    /// Price a batch from its total cost without a recipe.
    Quote {
        /// Total production cost of one batch.
        #[arg(long)]
        total: f64,

        /// Finished units per batch.
        #[arg(long = "yield")]
        yield_quantity: f64,

        /// Desired margin in percent.
        #[arg(long, default_value = "30", allow_negative_numbers = true)]
        margin: f64,

        /// Competitor price to check your margin against.
        #[arg(long)]
        market_price: Option<f64>,
    },

    /// Export a saved recipe's cost breakdown as CSV.
    Export {
        /// Recipe id or name.
        query: String,

        /// Output CSV path.
        #[arg(short, long, default_value = "hpp_breakdown.csv")]
        out: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Session
    }
}
