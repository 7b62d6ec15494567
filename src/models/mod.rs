mod line_item;
mod recipe;

pub use line_item::{ItemField, ItemKind, LineItem};
pub use recipe::{ProductionParameters, Recipe};
