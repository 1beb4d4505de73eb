//! `SQLite` statements for the table store.
//!
//! Table and column names come from configuration and stored headers, so
//! every statement is built with quoted identifiers. All columns are `TEXT`.

/// Quote an identifier for use in SQL.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL statement to drop a table if it exists.
#[must_use]
pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_ident(table))
}

/// SQL statement to create a table with `TEXT` columns.
#[must_use]
pub fn create_table(table: &str, columns: &[String]) -> String {
    let columns = columns
        .iter()
        .map(|c| format!("{} TEXT NOT NULL DEFAULT ''", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({columns})", quote_ident(table))
}

/// SQL statement to insert one row with positional parameters.
#[must_use]
pub fn insert_row(table: &str, columns: &[String]) -> String {
    let names = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({names}) VALUES ({placeholders})",
        quote_ident(table)
    )
}

/// SQL statement to read a table in insertion order.
#[must_use]
pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {} ORDER BY rowid", quote_ident(table))
}
