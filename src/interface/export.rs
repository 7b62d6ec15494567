use std::path::Path;

use crate::error::Result;
use crate::models::LineItem;
use crate::state::WorksheetSummary;

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    section: &str,
    items: &[LineItem],
) -> Result<()> {
    for item in items {
        wtr.write_record([
            section.to_string(),
            item.id.to_string(),
            item.label.clone(),
            format!("{:.2}", item.unit_price),
            item.unit.clone(),
            format!("{}", item.package_content),
            format!("{}", item.usage_amount),
            format!("{:.2}", item.cost),
        ])?;
    }
    Ok(())
}

/// Write a cost breakdown: one record per line item, then the summary figures.
pub fn write_breakdown<W: std::io::Write>(
    writer: W,
    materials: &[LineItem],
    operations: &[LineItem],
    summary: &WorksheetSummary,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "section",
        "id",
        "label",
        "unit_price",
        "unit",
        "package_content",
        "usage_amount",
        "cost",
    ])?;

    write_rows(&mut wtr, "material", materials)?;
    write_rows(&mut wtr, "operation", operations)?;

    let figures = [
        ("material_total", summary.totals.material),
        ("operational_total", summary.totals.operational),
        ("production_total", summary.totals.grand),
        ("unit_cost", summary.quote.unit_cost),
        ("profit_amount", summary.quote.profit_amount),
        ("raw_selling_price", summary.quote.raw_selling_price),
        ("smart_price", summary.quote.smart_price),
    ];
    for (name, value) in figures {
        wtr.write_record([
            "summary".to_string(),
            String::new(),
            name.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.2}", value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a cost breakdown to a CSV file.
pub fn write_breakdown_csv(
    path: &Path,
    materials: &[LineItem],
    operations: &[LineItem],
    summary: &WorksheetSummary,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_breakdown(file, materials, operations, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemField, ItemKind, ProductionParameters};
    use crate::pricing::RoundingPolicy;
    use crate::state::evaluate;

    #[test]
    fn test_breakdown_layout() {
        let mut flour = LineItem::new(1, ItemKind::Material);
        flour.apply(ItemField::Label("Flour".to_string()));
        flour.apply(ItemField::UnitPrice(10000.0));
        flour.apply(ItemField::UsageAmount(50.0));
        let mut labour = LineItem::new(1, ItemKind::Operation);
        labour.apply(ItemField::UnitPrice(5000.0));
        labour.apply(ItemField::UsageAmount(1.0));

        let production = ProductionParameters {
            yield_quantity: 10.0,
            margin_percent: 30.0,
        };
        let materials = vec![flour];
        let operations = vec![labour];
        let summary = evaluate(
            &materials,
            &operations,
            &production,
            0.0,
            &RoundingPolicy::default(),
        );

        let mut buf = Vec::new();
        write_breakdown(&mut buf, &materials, &operations, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 2 + 7);
        assert!(lines[1].starts_with("material,1,Flour,10000.00,gram"));
        assert!(lines[1].ends_with(",500.00"));
        assert_eq!(lines[9], "summary,,smart_price,,,,,800.00");
    }
}
