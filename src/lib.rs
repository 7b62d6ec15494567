pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod state;

pub use error::{HppError, Result};
pub use models::{ItemField, ItemKind, LineItem, ProductionParameters, Recipe};
