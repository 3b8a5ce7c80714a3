use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use denial_model::{DenialCount, DenialReport};

pub fn print_report(report: &DenialReport, model_status: &str) {
    println!("File: {}", report.source);
    if report.header_offset > 0 {
        println!("Header row: {}", report.header_offset + 1);
    }
    println!(
        "Claims: {} total, {} denied",
        report.total_claims, report.denied_claims
    );
    println!("{model_status}");
    let defaulted = report.cleaning.total_defaulted();
    if defaulted > 0 {
        println!(
            "Non-numeric amounts counted as 0: {} (Payment_Amount {}, Balance {})",
            defaulted, report.cleaning.payment_amount_defaulted, report.cleaning.balance_defaulted
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CPT_Code"),
        header_cell("Total_Claims"),
        header_cell("Denied_Claims"),
        header_cell("Denial_Rate"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in &report.cpt_analysis {
        table.add_row(vec![
            Cell::new(&row.cpt_code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.total_claims),
            count_cell(row.denied_claims),
            Cell::new(format!("{:.2}%", row.denial_rate)),
        ]);
    }
    println!();
    println!("CPT codes:");
    println!("{table}");

    print_count_table("Payers:", &report.payer_denials);
    print_count_table("Providers:", &report.provider_denials);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Root Cause"),
        header_cell("Count"),
        header_cell("Logical Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &report.root_causes {
        table.add_row(vec![
            Cell::new(&row.root_cause),
            count_cell(row.count),
            Cell::new(&row.logical_reason),
        ]);
    }
    println!();
    println!("Root causes:");
    println!("{table}");
}

fn print_count_table<R: DenialCount>(title: &str, rows: &[R]) {
    println!();
    println!("{title}");
    if rows.is_empty() {
        println!("  no denied claims");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(R::KEY_COLUMN.as_str()),
        header_cell("Denied_Claims_Count"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![Cell::new(row.key()), count_cell(row.denied_claims_count())]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
