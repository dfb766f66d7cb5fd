//! Demo schema and data seeding.
//!
//! The steps run one after another with no transaction around them. A
//! failing step stops the sequence and earlier steps stay committed. Both the
//! extension and the table creation tolerate being re-run.

use crate::statement::Statement;

/// Ordered `(name, sql)` pairs executed by [`demo_statements`].
pub const DEMO_STEPS: &[(&str, &str)] = &[
    (
        "enable_extension",
        "CREATE EXTENSION IF NOT EXISTS pg_stat_statements",
    ),
    ("drop_table", "DROP TABLE IF EXISTS users"),
    (
        "create_table",
        r#"CREATE TABLE users (
            id SERIAL PRIMARY KEY,
            first_name TEXT,
            last_name TEXT,
            email TEXT UNIQUE NOT NULL,
            phone TEXT
        )"#,
    ),
    (
        "insert_row",
        r#"INSERT INTO users (first_name, last_name, email, phone)
        VALUES ('Oliver', 'Andersson', 'oliver@example.com', '123456789')"#,
    ),
    (
        "sample_select",
        "SELECT * FROM users WHERE first_name ILIKE 'O%'",
    ),
    (
        "delete_row",
        "DELETE FROM users WHERE first_name ILIKE 'O%'",
    ),
];

/// The demo steps as executable statements, paired with their names.
pub fn demo_statements() -> impl Iterator<Item = (&'static str, Statement)> {
    DEMO_STEPS
        .iter()
        .map(|(name, sql)| (*name, Statement::new(*sql)))
}
