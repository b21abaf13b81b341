//! Example: Using chataudit as a library
//!
//! This example walks through the audit pipeline on an in-memory export.
//!
//! Run with: cargo run --example library_usage

use chataudit::core::filter::author_options;
use chataudit::prelude::*;

const EXPORT: &str = "\
01/02/2024, 09:15 - Ana: anular factura 123
01/02/2024, 09:16 - Luis: hay que anular el recibo
01/02/2024, 09:17 - Ana: el monto está mal
por favor revisar
[02/02/2024 10:00] Eva: buen día
32/13/2024, 12:00 - Luis: fecha rota";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chataudit Library Usage Examples ===\n");

    // Example 1: Parse and classify
    println!("1. Parsing with custom rules:");
    let rules = RuleSet::parse(
        "Anular Factura: anular factura\nAnulación: anular\nMontos: monto, importe\nOtros:",
    );
    let export = ExportParser::new(rules).parse_str(EXPORT);

    for msg in &export.records {
        println!(
            "   [{} {}] {}: {} -> {}",
            msg.display_date(),
            msg.time(),
            msg.author(),
            msg.body(),
            msg.category()
        );
    }
    println!(
        "   ({} messages, {} undated)",
        export.stats.messages, export.stats.undated_messages
    );

    // Example 2: Count tables
    println!("\n2. Messages per category:");
    for row in category_counts(&export.records) {
        println!("   {:<16} {}", row.name, row.count);
    }

    // Example 3: Filter by author
    println!("\n3. Filtering by author (Ana only):");
    let spec = FilterSpec::new().with_author("Ana");
    let view = apply_filters(&export.records, &spec);
    for msg in &view {
        println!("   {}", msg.body());
    }
    println!(
        "   Categories available for Ana: {}",
        category_options(&export.records, &spec).join(", ")
    );

    // Example 4: Date filters skip undated messages
    println!("\n4. Filtering by month (febrero):");
    let spec = FilterSpec::new().with_month("febrero")?;
    let view = apply_filters(&export.records, &spec);
    println!("   {} of {} messages", view.len(), export.records.len());

    // Example 5: Dropdown values
    println!("\n5. Authors: {}", author_options(&export.records).join(", "));

    // Example 6: Export
    println!("\n6. CSV export:");
    print!("{}", to_csv(&export.records)?);

    println!("\n=== Done ===");
    Ok(())
}
