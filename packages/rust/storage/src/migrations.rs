//! SQL migration definitions for the campaign database.
//!
//! Migrations are applied in order on database open. Each migration has a
//! version number and a batch of SQL statements.

/// A database migration with a version and SQL statements.
pub(crate) struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// All migrations, in ascending version order.
pub(crate) fn all_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Initial schema: records keyed by collection",
        sql: r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version    INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One JSON document per row, grouped by collection name (e.g. campaignBrief)
CREATE TABLE IF NOT EXISTS records (
    id         TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    body_json  TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection, created_at);

INSERT INTO schema_migrations (version) VALUES (1);
"#,
    }]
}
