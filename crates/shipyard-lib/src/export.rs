//! Flat tabular export of a design's components.

use std::io::Write;

use serde::Serialize;

use crate::calc::{calculate_cost, calculate_mass, component_lines};
use crate::design::ShipDesign;
use crate::error::Result;

/// One CSV row: a component group, or the trailing total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub category: String,
    pub item: String,
    pub mass: f64,
    pub cost: f64,
}

/// Component rows for `design` followed by a `Total` row.
///
/// The total row matches [`calculate_mass`]'s `used` and
/// [`calculate_cost`]'s `total`.
pub fn export_rows(design: &ShipDesign) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = component_lines(design)
        .into_iter()
        .map(|line| ExportRow {
            category: line.category.to_string(),
            item: line.item,
            mass: line.mass,
            cost: line.cost,
        })
        .collect();

    rows.push(ExportRow {
        category: "Total".to_string(),
        item: design.name.clone(),
        mass: calculate_mass(design).used,
        cost: calculate_cost(design).total,
    });
    rows
}

/// Write the export rows as CSV with a `category,item,mass,cost` header.
pub fn write_csv<W: Write>(design: &ShipDesign, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in export_rows(design) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Item;
    use crate::reference::Cargo;

    #[test]
    fn total_row_matches_calculations() {
        let mut design = ShipDesign::new("Trader");
        design.cargo.push(Item::new(Cargo::Standard, 20));
        let rows = export_rows(&design);
        let total = rows.last().unwrap();
        assert_eq!(total.category, "Total");
        assert!((total.mass - calculate_mass(&design).used).abs() < 1e-9);
        assert!((total.cost - calculate_cost(&design).total).abs() < 1e-9);
        assert!(rows.iter().any(|row| row.item == "Standard Cargo x20"));
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let design = ShipDesign::new("Scout");
        let mut buffer = Vec::new();
        write_csv(&design, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("category,item,mass,cost"));
        assert_eq!(lines.count(), export_rows(&design).len());
        assert!(text.contains("Total,Scout,41.0,10.5"));
    }
}
