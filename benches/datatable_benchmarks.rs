use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datatable::*;

fn make_rows(size: usize) -> Vec<Row> {
    let statuses = ["open", "closed", "pending"];
    (0..size)
        .map(|i| {
            let mut row = Row::new();
            row.insert("id".to_string(), ColumnValue::Int64(i as i64));
            row.insert("name".to_string(), ColumnValue::String(format!("user_{}", i)));
            row.insert("status".to_string(), ColumnValue::from(statuses[i % 3]));
            row.insert("score".to_string(), ColumnValue::Int32(((i * 7919) % 1000) as i32));
            row
        })
        .collect()
}

fn make_table() -> DataTable<Row> {
    let columns = vec![
        ColumnSchema::new("name", "Name").sortable(),
        ColumnSchema::new("status", "Status"),
        ColumnSchema::new("score", "Score").sortable(),
    ];
    let config = TableConfig {
        searchable: true,
        search_key: Some("name".to_string()),
        pagination: true,
        page_size: 25,
        selectable: true,
        ..TableConfig::default()
    };
    DataTable::new(columns, config).unwrap()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply_search(black_box(&rows), Some("name"), black_box("user_1")));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let state = SortState::descending("score");

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply_sort(black_box(&rows), &state));
        });
    }
    group.finish();
}

fn bench_full_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_view");
    let table = make_table();

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        let mut state = table.initial_state();
        table.set_search(&mut state, "user_");
        table.set_filter(&mut state, "status", "open");
        table.click_header(&mut state, "score");
        table.set_page(&rows, &mut state, 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| table.view(black_box(&rows), &state));
        });
    }
    group.finish();
}

fn bench_toggle_all_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_all_visible");
    let table = make_table();

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut state = table.initial_state();
                table.toggle_all_visible(black_box(&rows), &mut state).len()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_search,
    bench_sort,
    bench_full_view,
    bench_toggle_all_visible
);
criterion_main!(benches);
