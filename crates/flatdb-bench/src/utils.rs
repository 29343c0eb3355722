//! Benchmark utilities and helpers.

use flatdb_common::DbResult;
use flatdb_storage::{Column, ColumnType, StorageEngine};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Generates random string data for benchmarks.
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Columns of the benchmark `users` table.
pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
        Column::new("age", ColumnType::Integer),
        Column::new("active", ColumnType::Boolean),
    ]
}

/// Generates random user rows matching [`user_columns`].
pub fn generate_user_rows(count: usize) -> Vec<[String; 4]> {
    let mut rng = StdRng::seed_from_u64(42);
    let names = [
        "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry",
    ];

    (0..count)
        .map(|i| {
            let name_idx = rng.gen_range(0..names.len());
            let suffix = random_string(&mut rng, 4);
            let age: u32 = rng.gen_range(18..80);
            [
                (i + 1).to_string(),
                format!("{}_{}", names[name_idx], suffix),
                age.to_string(),
                rng.gen_bool(0.5).to_string(),
            ]
        })
        .collect()
}

/// Generates sequential table names.
pub fn generate_table_names(count: usize, prefix: &str) -> Vec<String> {
    (0..count).map(|i| format!("{}{:05}", prefix, i)).collect()
}

/// Opens a fresh engine in a temporary directory.
///
/// The directory must outlive the engine.
pub fn temp_engine() -> DbResult<(TempDir, StorageEngine)> {
    let dir = TempDir::new()?;
    let engine = StorageEngine::open_path(dir.path().join("bench.txt"))?;
    Ok((dir, engine))
}

/// Opens an engine holding a `users` table with `rows` rows.
pub fn populated_engine(rows: usize) -> DbResult<(TempDir, StorageEngine)> {
    let (dir, engine) = temp_engine()?;
    engine.create_table("users", &user_columns())?;

    // Inserts rewrite the snapshot; the primary is written once on commit.
    engine.begin_transaction()?;
    for row in generate_user_rows(rows) {
        engine.insert_data("users", &row)?;
    }
    engine.commit_transaction()?;
    Ok((dir, engine))
}
