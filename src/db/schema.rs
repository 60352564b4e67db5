//! SQL DDL for the demo table.
//! Written for TiDB; plain MySQL accepts the same statements.

/// Players table with:
/// - `id` BIGINT PRIMARY KEY AUTO_INCREMENT
/// - `name` VARCHAR(32) UNIQUE (creates an index implicitly)
/// - `coins` / `goods` balances, non-negative by convention only
/// - `created_at` server-side insertion timestamp
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    id BIGINT PRIMARY KEY AUTO_INCREMENT,
    name VARCHAR(32) NOT NULL UNIQUE,
    coins INT NOT NULL DEFAULT 0,
    goods INT NOT NULL DEFAULT 0,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Teardown counterpart of [`MYSQL_INIT`]; the demo removes its table on exit.
pub const MYSQL_DROP: &str = "DROP TABLE IF EXISTS players;";

/// Split a DDL blob into individual statements (sqlx executes one at a time).
pub fn statements(ddl: &str) -> impl Iterator<Item = &str> {
    ddl.split(';').map(str::trim).filter(|s| !s.is_empty())
}
