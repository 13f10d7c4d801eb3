//! Embedded-schema migration runner.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &str = include_str!("schema.sql");

/// Apply the embedded schema. Every statement is `IF NOT EXISTS`, so running
/// against an already-migrated database is a no-op.
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    let mut applied = 0usize;
    for chunk in SCHEMA.split(';') {
        // Strip comment lines so a chunk that is only commentary is skipped.
        let statement = chunk
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("executing schema statement: {statement}"))?;
        applied += 1;
    }
    info!(statements = applied, "schema applied");
    Ok(())
}
