//! Basic Table Example
//!
//! This example demonstrates:
//! - Defining columns over dynamic `Row` records
//! - Searching, filtering and sorting
//! - Paging through the result
//! - Selecting rows across pages

use datatable::{ColumnSchema, ColumnValue, DataTable, FilterOption, Row, TableConfig};

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== DataTable Basic Example ===\n");

    // 1. Build some player rows
    println!("1. Creating player rows...");
    let players = [
        ("Anna", "EU", 1840),
        ("Bob", "NA", 1720),
        ("Fran", "EU", 1990),
        ("Dan", "APAC", 1650),
        ("Hana", "APAC", 2010),
        ("Ivan", "EU", 1500),
        ("Jana", "NA", 1880),
    ];

    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .map(|(i, (name, region, rating))| {
            let mut row = Row::new();
            row.insert("id".to_string(), ColumnValue::Int32(i as i32 + 1));
            row.insert("name".to_string(), ColumnValue::from(*name));
            row.insert("region".to_string(), ColumnValue::from(*region));
            row.insert("rating".to_string(), ColumnValue::Int32(*rating));
            row
        })
        .collect();
    println!("   Added {} players\n", rows.len());

    // 2. Define the table
    println!("2. Defining columns and configuration...");
    let columns = vec![
        ColumnSchema::new("name", "Player").sortable(),
        ColumnSchema::new("region", "Region"),
        ColumnSchema::new("rating", "Rating")
            .sortable()
            .with_formatter(|value, _| format!("{} elo", value)),
    ];
    let config = TableConfig {
        searchable: true,
        search_key: Some("name".to_string()),
        filter_options: vec![FilterOption::from_collection("region", "Region", &rows)],
        pagination: true,
        page_size: 3,
        selectable: true,
        ..TableConfig::default()
    };
    let table = match DataTable::new(columns, config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("   Invalid table: {}", e);
            return;
        }
    };
    let mut state = table.initial_state();
    println!("   Region choices: {:?}\n", table.config().filter_options[0].choices);

    // 3. First page, insertion order
    println!("3. First page:");
    print_view(&table, &rows, &state);

    // 4. Sort by rating (click the header twice for descending)
    println!("4. Sorting by rating, descending...");
    table.click_header(&mut state, "rating");
    table.click_header(&mut state, "rating");
    print_view(&table, &rows, &state);

    // 5. Search and filter
    println!("5. Searching 'an' within EU...");
    table.set_search(&mut state, "an");
    table.set_filter(&mut state, "region", "EU");
    print_view(&table, &rows, &state);

    // 6. Select across pages
    println!("6. Selecting rows...");
    table.set_search(&mut state, "");
    table.set_filter(&mut state, "region", "all");
    table.toggle_all_visible(&rows, &mut state);
    table.set_page(&rows, &mut state, 2);
    let selected = table.toggle_all_visible(&rows, &mut state);
    println!("   Selected {} players:", selected.len());
    for row in selected {
        println!("      - {}", row.get("name").and_then(|v| v.as_string()).unwrap_or("?"));
    }

    println!("\n=== Example completed successfully! ===");
}

fn print_view(table: &DataTable<Row>, rows: &[Row], state: &datatable::TableState) {
    let view = table.view(rows, state);
    if view.is_empty() {
        println!("   {}\n", view.empty_message);
        return;
    }

    for row in &view.rows {
        let marker = if row.selected { "[x]" } else { "[ ]" };
        println!("   {} {}", marker, table.cell_text(row.record).join(" | "));
    }
    println!(
        "   Showing {}-{} of {} (page {}/{})\n",
        view.range.0, view.range.1, view.filtered_count, view.current_page, view.total_pages
    );
}
