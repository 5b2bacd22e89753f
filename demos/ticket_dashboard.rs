//! Ticket Dashboard Example
//!
//! This example demonstrates:
//! - Loading records and table configuration from JSON
//! - Browsing JSON records with a custom row identity
//! - Header checkbox state while selecting

use datatable::{ColumnSchema, DataTable, TableConfig, TableError};
use serde_json::Value;

const TICKETS: &str = r#"[
    {"ticket": "T-101", "subject": "Login page times out", "status": "open", "priority": 1, "assignee": "kim"},
    {"ticket": "T-102", "subject": "Invoice totals wrong", "status": "pending", "priority": 2, "assignee": null},
    {"ticket": "T-103", "subject": "Cannot reset password", "status": "open", "priority": 1, "assignee": "lee"},
    {"ticket": "T-104", "subject": "Export to CSV", "status": "closed", "priority": 3, "assignee": "kim"},
    {"ticket": "T-105", "subject": "Login via SSO", "status": "open", "priority": null, "assignee": "ari"},
    {"ticket": "T-106", "subject": "Dark mode request", "status": "closed", "priority": 3, "assignee": null}
]"#;

const CONFIG: &str = r#"{
    "searchable": true,
    "searchKey": "subject",
    "filterOptions": [
        {"key": "status", "label": "Status", "choices": [
            {"value": "all", "label": "All"},
            {"value": "open", "label": "Open"},
            {"value": "pending", "label": "Pending"},
            {"value": "closed", "label": "Closed"}
        ]}
    ],
    "pagination": true,
    "pageSize": 4,
    "selectable": true,
    "emptyMessage": "No tickets match"
}"#;

fn main() -> Result<(), TableError> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== DataTable Ticket Dashboard Example ===\n");

    let tickets: Vec<Value> = serde_json::from_str(TICKETS)?;
    let config = TableConfig::from_json(CONFIG)?;

    let columns = vec![
        ColumnSchema::new("ticket", "Ticket"),
        ColumnSchema::new("subject", "Subject"),
        ColumnSchema::new("status", "Status"),
        ColumnSchema::new("priority", "Priority")
            .sortable()
            .with_formatter(|value, _| {
                if value.is_null() {
                    "-".to_string()
                } else {
                    format!("P{}", value)
                }
            }),
        ColumnSchema::new("assignee", "Assignee").with_formatter(|value, _| {
            value.as_string().unwrap_or("unassigned").to_string()
        }),
    ];

    let table = DataTable::new(columns, config)?
        .with_row_id(|ticket: &Value| ticket["ticket"].as_str().unwrap_or_default().to_string());
    let mut state = table.initial_state();

    println!("1. Open tickets by priority:");
    table.set_filter(&mut state, "status", "open");
    table.click_header(&mut state, "priority");
    show(&table, &tickets, &state);

    println!("2. Selecting one ticket, then the whole page:");
    let view = table.view(&tickets, &state);
    let first = view.rows[0].record;
    table.toggle_row(&tickets, &mut state, first);
    println!("   Header checkbox: {:?}", table.view(&tickets, &state).selection_state);
    let selected = table.toggle_all_visible(&tickets, &mut state);
    println!("   Header checkbox: {:?}", table.view(&tickets, &state).selection_state);
    println!("   Selected: {:?}\n", selected.iter().map(|t| &t["ticket"]).collect::<Vec<_>>());

    println!("3. Searching for 'refund':");
    table.set_search(&mut state, "refund");
    show(&table, &tickets, &state);

    println!("4. Selection is kept while hidden: {} tickets", table.selected_records(&tickets, &state).len());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

fn show(table: &DataTable<Value>, tickets: &[Value], state: &datatable::TableState) {
    let view = table.view(tickets, state);
    if view.is_empty() {
        println!("   {}\n", view.empty_message);
        return;
    }
    for row in &view.rows {
        println!("   {}", table.cell_text(row.record).join(" | "));
    }
    println!("   {} of {} tickets\n", view.filtered_count, view.total_count);
}
