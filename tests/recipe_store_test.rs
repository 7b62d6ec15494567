use std::fs;

use tempfile::tempdir;

use hpp_calc_rs::error::HppError;
use hpp_calc_rs::models::{ItemField, ItemKind, LineItem, ProductionParameters};
use hpp_calc_rs::pricing::RECIPES_KEY;
use hpp_calc_rs::state::{JsonFileStore, KeyValueStore, MemoryStore, RecipeBook, RecipeStore};

fn sample_materials() -> Vec<LineItem> {
    let mut flour = LineItem::new(3, ItemKind::Material);
    flour.apply(ItemField::Label("Flour".to_string()));
    flour.apply(ItemField::UnitPrice(14000.0));
    flour.apply(ItemField::UsageAmount(250.0));

    let mut eggs = LineItem::new(9, ItemKind::Material);
    eggs.apply(ItemField::Label("Eggs".to_string()));
    eggs.apply(ItemField::Unit("piece".to_string()));
    eggs.apply(ItemField::UnitPrice(28000.0));
    eggs.apply(ItemField::PackageContent(16.0));
    eggs.apply(ItemField::UsageAmount(3.0));

    vec![flour, eggs]
}

fn sample_operations() -> Vec<LineItem> {
    let mut gas = LineItem::new(1, ItemKind::Operation);
    gas.apply(ItemField::Label("Gas".to_string()));
    gas.apply(ItemField::UnitPrice(22000.0));
    gas.apply(ItemField::PackageContent(20.0));
    gas.apply(ItemField::UsageAmount(1.5));
    vec![gas]
}

fn sample_production() -> ProductionParameters {
    ProductionParameters {
        yield_quantity: 24.0,
        margin_percent: 35.0,
    }
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBook::new(JsonFileStore::new(dir.path()));

    let saved = book
        .save_recipe(
            "Brownies",
            &sample_materials(),
            &sample_operations(),
            sample_production(),
        )
        .unwrap();

    let loaded = book.load_recipe(saved.id).unwrap();
    assert_eq!(loaded.name, "Brownies");
    assert_eq!(loaded.materials, sample_materials());
    assert_eq!(loaded.operations, sample_operations());
    assert_eq!(loaded.production, sample_production());
    assert_eq!(loaded.materials[1].id, 9);
}

#[test]
fn test_collection_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut book = RecipeBook::new(JsonFileStore::new(dir.path()));
        book.save_recipe("A", &sample_materials(), &[], sample_production())
            .unwrap();
        book.save_recipe("B", &[], &sample_operations(), sample_production())
            .unwrap();
    }

    let book = RecipeBook::new(JsonFileStore::new(dir.path()));
    let recipes = book.list_recipes();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].name, "A");
    assert_eq!(recipes[1].name, "B");
    assert!(recipes[0].id < recipes[1].id);
}

#[test]
fn test_empty_name_rejected_without_write() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let path = store.path_for(RECIPES_KEY);
    let mut book = RecipeBook::new(store);

    let result = book.save_recipe("", &sample_materials(), &[], sample_production());
    assert!(matches!(result, Err(HppError::EmptyRecipeName)));
    assert!(!path.exists());
}

#[test]
fn test_delete_unknown_id_leaves_collection_unchanged() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let path = store.path_for(RECIPES_KEY);
    let mut book = RecipeBook::new(store);

    book.save_recipe("Keep", &sample_materials(), &[], sample_production())
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    book.delete_recipe(12345).unwrap();

    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
    assert_eq!(book.list_recipes().len(), 1);
}

#[test]
fn test_delete_removes_only_target() {
    let mut book = RecipeBook::new(MemoryStore::new());
    let first = book
        .save_recipe("First", &[], &[], sample_production())
        .unwrap();
    let second = book
        .save_recipe("Second", &[], &[], sample_production())
        .unwrap();

    book.delete_recipe(first.id).unwrap();

    let recipes = book.list_recipes();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, second.id);
    assert!(matches!(
        book.load_recipe(first.id),
        Err(HppError::RecipeNotFound(_))
    ));
}

#[test]
fn test_corrupt_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store.set(RECIPES_KEY, "[{\"id\": \"oops\"").unwrap();

    let mut book = RecipeBook::new(store);
    assert!(book.list_recipes().is_empty());

    // saving over corrupt data starts a fresh collection
    book.save_recipe("Fresh", &[], &[], sample_production())
        .unwrap();
    assert_eq!(book.list_recipes().len(), 1);
}

#[test]
fn test_reads_legacy_layout() {
    let legacy = r#"[
        {
            "id": 1717000000000,
            "name": "Kue Lapis",
            "materials": [
                {"id": 1, "name": "Tepung", "price": 12000, "unit": "gram", "content": 1000, "usage": 500, "cost": 6000}
            ],
            "operations": [
                {"id": 1, "type": "Gas", "price": 20000, "unit": "jam", "content": 10, "usage": 2, "cost": 4000}
            ],
            "production": {"yield": 20, "margin": 40}
        }
    ]"#;

    let mut store = MemoryStore::new();
    store.set(RECIPES_KEY, legacy).unwrap();
    let book = RecipeBook::new(store);

    let recipe = book.load_recipe(1717000000000).unwrap();
    assert_eq!(recipe.materials[0].label, "Tepung");
    assert_eq!(recipe.operations[0].label, "Gas");
    assert_eq!(recipe.production.yield_quantity, 20.0);
    assert_eq!(recipe.production.margin_percent, 40.0);
}

#[test]
fn test_persisted_layout_field_names() {
    let mut book = RecipeBook::new(MemoryStore::new());
    book.save_recipe("Layout", &sample_materials(), &sample_operations(), sample_production())
        .unwrap();

    let raw = book.store().get(RECIPES_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let recipe = &json[0];

    assert!(recipe["id"].is_u64());
    assert_eq!(recipe["name"], "Layout");
    assert_eq!(recipe["production"]["yieldQuantity"], 24.0);
    assert_eq!(recipe["materials"][0]["unitPrice"], 14000.0);
    assert_eq!(recipe["materials"][0]["packageContent"], 1000.0);
    assert_eq!(recipe["operations"][0]["usageAmount"], 1.5);
}
