use serde::{Deserialize, Serialize};

use crate::pricing::calculations::{compute_cost, sanitize};
use crate::pricing::constants::{
    DEFAULT_MATERIAL_CONTENT, DEFAULT_MATERIAL_UNIT, DEFAULT_OPERATION_CONTENT,
    DEFAULT_OPERATION_UNIT, MATERIAL_UNITS, OPERATION_UNITS,
};

/// Which cost table a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Raw material or ingredient.
    Material,
    /// Operational expense (labour, gas, electricity, ...).
    Operation,
}

impl ItemKind {
    /// Unit given to a new row of this kind.
    pub fn default_unit(self) -> &'static str {
        match self {
            ItemKind::Material => DEFAULT_MATERIAL_UNIT,
            ItemKind::Operation => DEFAULT_OPERATION_UNIT,
        }
    }

    /// Package content given to a new row of this kind.
    pub fn default_content(self) -> f64 {
        match self {
            ItemKind::Material => DEFAULT_MATERIAL_CONTENT,
            ItemKind::Operation => DEFAULT_OPERATION_CONTENT,
        }
    }

    /// Units offered when editing a row of this kind.
    pub fn units(self) -> &'static [&'static str] {
        match self {
            ItemKind::Material => &MATERIAL_UNITS,
            ItemKind::Operation => &OPERATION_UNITS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ItemKind::Material => "Materials",
            ItemKind::Operation => "Operations",
        }
    }
}

/// A single edit to one field of a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Label(String),
    UnitPrice(f64),
    Unit(String),
    PackageContent(f64),
    UsageAmount(f64),
}

/// One purchased item and how much of it a batch consumes.
///
/// `cost` is derived from the other numeric fields and is refreshed by every
/// call to [`LineItem::apply`]. It is persisted for readability only; loaders
/// recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: u64,

    #[serde(alias = "name", alias = "type", default)]
    pub label: String,

    #[serde(alias = "price", default)]
    pub unit_price: f64,

    #[serde(default)]
    pub unit: String,

    #[serde(alias = "content", default)]
    pub package_content: f64,

    #[serde(alias = "usage", default)]
    pub usage_amount: f64,

    #[serde(default)]
    pub cost: f64,
}

impl LineItem {
    /// Create an empty row with the defaults for its kind.
    pub fn new(id: u64, kind: ItemKind) -> Self {
        Self {
            id,
            label: String::new(),
            unit_price: 0.0,
            unit: kind.default_unit().to_string(),
            package_content: kind.default_content(),
            usage_amount: 0.0,
            cost: 0.0,
        }
    }

    /// Set one field and recompute this row's cost.
    pub fn apply(&mut self, field: ItemField) {
        match field {
            ItemField::Label(label) => self.label = label,
            ItemField::UnitPrice(v) => self.unit_price = sanitize(v),
            ItemField::Unit(unit) => self.unit = unit,
            ItemField::PackageContent(v) => self.package_content = sanitize(v),
            ItemField::UsageAmount(v) => self.usage_amount = sanitize(v),
        }
        self.recompute_cost();
    }

    /// Refresh `cost` from price, content and usage.
    pub fn recompute_cost(&mut self) {
        self.cost = compute_cost(self.unit_price, self.package_content, self.usage_amount);
    }

    /// Label for display, with a placeholder for unnamed rows.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            "(unnamed)"
        } else {
            &self.label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_material_defaults() {
        let item = LineItem::new(1, ItemKind::Material);
        assert_eq!(item.unit, "gram");
        assert_eq!(item.package_content, 1000.0);
        assert_eq!(item.cost, 0.0);
    }

    #[test]
    fn test_new_operation_defaults() {
        let item = LineItem::new(1, ItemKind::Operation);
        assert_eq!(item.unit, "hour");
        assert_eq!(item.package_content, 1.0);
    }

    #[test]
    fn test_apply_recomputes_cost() {
        let mut item = LineItem::new(1, ItemKind::Material);
        item.apply(ItemField::UnitPrice(10000.0));
        item.apply(ItemField::UsageAmount(50.0));
        assert!((item.cost - 500.0).abs() < 1e-9);

        item.apply(ItemField::Label("Flour".to_string()));
        item.apply(ItemField::Unit("kg".to_string()));
        assert!((item.cost - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_zero_content_yields_zero_cost() {
        let mut item = LineItem::new(1, ItemKind::Material);
        item.apply(ItemField::UnitPrice(10000.0));
        item.apply(ItemField::UsageAmount(50.0));
        item.apply(ItemField::PackageContent(0.0));
        assert_eq!(item.cost, 0.0);
    }

    #[test]
    fn test_apply_nan_is_coerced() {
        let mut item = LineItem::new(1, ItemKind::Material);
        item.apply(ItemField::UnitPrice(f64::NAN));
        assert_eq!(item.unit_price, 0.0);
        assert!(!item.cost.is_nan());
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{"id": 7, "type": "Gas", "price": 25000, "unit": "jam", "content": 10, "usage": 2, "cost": 0}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label, "Gas");
        assert_eq!(item.unit_price, 25000.0);
        assert_eq!(item.package_content, 10.0);
        assert_eq!(item.usage_amount, 2.0);
    }
}
