use dialoguer::{Confirm, Input, Select};
use tracing::warn;

use crate::error::{HppError, Result};
use crate::interface::render::{display_recipe_list, display_table, display_worksheet};
use crate::models::{ItemField, ItemKind};
use crate::pricing::{coerce_number, RoundingPolicy};
use crate::state::{RecipeStore, Worksheet};

/// Actions offered by the session menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Show,
    AddRow,
    EditRow,
    RemoveRow,
    Production,
    MarketPrice,
    Rename,
    Save,
    Load,
    Delete,
    Reset,
    Quit,
}

const MENU: [(MenuAction, &str); 12] = [
    (MenuAction::Show, "Show worksheet"),
    (MenuAction::AddRow, "Add row"),
    (MenuAction::EditRow, "Edit row"),
    (MenuAction::RemoveRow, "Remove row"),
    (MenuAction::Production, "Set yield and margin"),
    (MenuAction::MarketPrice, "Set market price"),
    (MenuAction::Rename, "Rename recipe"),
    (MenuAction::Save, "Save recipe"),
    (MenuAction::Load, "Load recipe"),
    (MenuAction::Delete, "Delete saved recipe"),
    (MenuAction::Reset, "Reset worksheet"),
    (MenuAction::Quit, "Quit"),
];

/// Prompt for a number; anything unparsable counts as zero.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    Ok(coerce_number(&input))
}

/// Prompt for free text, allowing an empty answer.
pub fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(input)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn prompt_kind() -> Result<ItemKind> {
    let selection = Select::new()
        .with_prompt("Which table?")
        .items(&["Materials", "Operations"])
        .default(0)
        .interact()?;

    Ok(if selection == 0 {
        ItemKind::Material
    } else {
        ItemKind::Operation
    })
}

fn prompt_row(sheet: &Worksheet, kind: ItemKind) -> Result<u64> {
    let table = sheet.table(kind);
    let options: Vec<String> = table
        .rows()
        .iter()
        .map(|r| format!("#{} {}", r.id, r.display_label()))
        .collect();

    let selection = Select::new()
        .with_prompt("Which row?")
        .items(&options)
        .default(0)
        .interact()?;

    table
        .rows()
        .get(selection)
        .map(|r| r.id)
        .ok_or_else(|| HppError::InvalidInput("No row selected".to_string()))
}

fn prompt_unit(kind: ItemKind, current: &str) -> Result<String> {
    let units = kind.units();
    let default = units.iter().position(|u| *u == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Unit")
        .items(units)
        .default(default)
        .interact()?;

    Ok(units[selection].to_string())
}

/// Walk through every field of one row.
fn edit_row(sheet: &mut Worksheet, kind: ItemKind, id: u64) -> Result<()> {
    let row = sheet
        .table(kind)
        .get(id)
        .cloned()
        .ok_or(HppError::RowNotFound(id))?;

    let label_prompt = match kind {
        ItemKind::Material => "Material name",
        ItemKind::Operation => "Expense type",
    };
    let label = prompt_text(label_prompt, &row.label)?;
    let price = prompt_number("Purchase price", row.unit_price)?;
    let unit = prompt_unit(kind, &row.unit)?;
    let content = prompt_number(&format!("Package content ({})", unit), row.package_content)?;
    let usage = prompt_number(&format!("Used per batch ({})", unit), row.usage_amount)?;

    let table = sheet.table_mut(kind);
    table.update_row(id, ItemField::Label(label))?;
    table.update_row(id, ItemField::UnitPrice(price))?;
    table.update_row(id, ItemField::Unit(unit))?;
    table.update_row(id, ItemField::PackageContent(content))?;
    table.update_row(id, ItemField::UsageAmount(usage))?;

    display_table(sheet.table(kind));
    Ok(())
}

fn pick_recipe<S: RecipeStore>(store: &S, prompt: &str) -> Result<Option<u64>> {
    let recipes = store.list_recipes();
    if recipes.is_empty() {
        println!("No saved recipes.");
        return Ok(None);
    }

    let mut options: Vec<String> = recipes
        .iter()
        .map(|r| format!("{}  ({})", r.name, r.created_date()))
        .collect();
    options.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&options)
        .default(0)
        .interact()?;

    Ok(recipes.get(selection).map(|r| r.id))
}

fn report_store_error(action: &str, e: &HppError) {
    warn!(action, error = %e, "store action failed");
    println!("Could not {}: {}", action, e);
}

/// Save the worksheet, reporting failures instead of ending the session.
fn save_worksheet<S: RecipeStore>(sheet: &Worksheet, store: &mut S) -> bool {
    match sheet.save_to(store) {
        Ok(recipe) => {
            println!("Recipe '{}' saved.", recipe.name);
            true
        }
        Err(HppError::EmptyRecipeName) => {
            println!("Give the recipe a name first.");
            false
        }
        Err(e) => {
            report_store_error("save recipe", &e);
            false
        }
    }
}

/// Load a recipe into the worksheet. On failure the worksheet is untouched.
fn load_worksheet<S: RecipeStore>(sheet: &mut Worksheet, store: &S, id: u64) -> bool {
    match sheet.load_from(store, id) {
        Ok(()) => true,
        Err(e) => {
            report_store_error("load recipe", &e);
            false
        }
    }
}

fn delete_saved<S: RecipeStore>(store: &mut S, id: u64) -> bool {
    match store.delete_recipe(id) {
        Ok(()) => {
            println!("Recipe deleted.");
            true
        }
        Err(e) => {
            report_store_error("delete recipe", &e);
            false
        }
    }
}

/// Run the interactive worksheet until the user quits.
pub fn run_session<S: RecipeStore>(
    sheet: &mut Worksheet,
    store: &mut S,
    policy: &RoundingPolicy,
) -> Result<()> {
    let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();

    loop {
        let selection = Select::new()
            .with_prompt(format!("[{}] What next?", sheet.recipe_name))
            .items(&labels)
            .default(0)
            .interact()?;

        match MENU[selection].0 {
            MenuAction::Show => display_worksheet(sheet, policy),
            MenuAction::AddRow => {
                let kind = prompt_kind()?;
                let id = sheet.table_mut(kind).add_row();
                edit_row(sheet, kind, id)?;
            }
            MenuAction::EditRow => {
                let kind = prompt_kind()?;
                let id = prompt_row(sheet, kind)?;
                edit_row(sheet, kind, id)?;
            }
            MenuAction::RemoveRow => {
                let kind = prompt_kind()?;
                let id = prompt_row(sheet, kind)?;
                if sheet.table_mut(kind).remove_row(id) {
                    println!("Row #{} removed.", id);
                } else {
                    println!("A table must keep at least one row.");
                }
            }
            MenuAction::Production => {
                let production = sheet.production();
                let yield_quantity =
                    prompt_number("Finished units per batch", production.yield_quantity)?;
                let margin = prompt_number("Margin (%)", production.margin_percent)?;
                sheet.set_yield(yield_quantity);
                sheet.set_margin(margin);
            }
            MenuAction::MarketPrice => {
                let price = prompt_number("Competitor market price", sheet.market_price())?;
                sheet.set_market_price(price);
            }
            MenuAction::Rename => {
                sheet.recipe_name = prompt_text("Recipe name", &sheet.recipe_name)?;
            }
            MenuAction::Save => {
                save_worksheet(sheet, store);
            }
            MenuAction::Load => {
                if let Some(id) = pick_recipe(store, "Load which recipe?")? {
                    if load_worksheet(sheet, store, id) {
                        display_worksheet(sheet, policy);
                    }
                }
            }
            MenuAction::Delete => {
                display_recipe_list(&store.list_recipes());
                if let Some(id) = pick_recipe(store, "Delete which recipe?")? {
                    if prompt_yes_no("Delete this recipe?", false)? {
                        delete_saved(store, id);
                    }
                }
            }
            MenuAction::Reset => {
                if prompt_yes_no("Reset all data?", false)? {
                    sheet.reset();
                }
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, ProductionParameters, Recipe};

    /// Accepts nothing: every save and delete fails, every load misses.
    struct BrokenStore;

    impl RecipeStore for BrokenStore {
        fn list_recipes(&self) -> Vec<Recipe> {
            Vec::new()
        }

        fn save_recipe(
            &mut self,
            _name: &str,
            _materials: &[LineItem],
            _operations: &[LineItem],
            _production: ProductionParameters,
        ) -> Result<Recipe> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
        }

        fn delete_recipe(&mut self, _id: u64) -> Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
        }

        fn load_recipe(&self, id: u64) -> Result<Recipe> {
            Err(HppError::RecipeNotFound(id))
        }
    }

    fn edited_sheet() -> Worksheet {
        let mut sheet = Worksheet::new();
        sheet.recipe_name = "Cookies".to_string();
        sheet.set_yield(12.0);
        let id = sheet.table_mut(ItemKind::Material).add_row();
        sheet
            .table_mut(ItemKind::Material)
            .update_row(id, ItemField::UnitPrice(9000.0))
            .unwrap();
        sheet
    }

    #[test]
    fn test_failed_save_keeps_session() {
        let sheet = edited_sheet();
        let mut store = BrokenStore;
        assert!(!save_worksheet(&sheet, &mut store));
        assert_eq!(sheet, edited_sheet());
    }

    #[test]
    fn test_failed_load_leaves_worksheet_unchanged() {
        let mut sheet = edited_sheet();
        let store = BrokenStore;
        assert!(!load_worksheet(&mut sheet, &store, 42));
        assert_eq!(sheet, edited_sheet());
    }

    #[test]
    fn test_failed_delete_is_reported() {
        let mut store = BrokenStore;
        assert!(!delete_saved(&mut store, 42));
    }
}
