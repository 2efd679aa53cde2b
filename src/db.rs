use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::PathBuf;
use tokio::fs;

pub type OrmConn = DatabaseConnection;

pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Apply every `.sql` file under `migrations/`, ordered by filename.
///
/// The schema files are idempotent (`CREATE TABLE IF NOT EXISTS`), so the
/// runner needs no applied-migrations bookkeeping table.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        tracing::debug!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        for stmt in split_statements(&sql) {
            conn.execute(Statement::from_string(backend, stmt)).await?;
        }
    }

    Ok(())
}

/// Split a migration file into single commands. Postgres rejects prepared
/// statements containing more than one command, so each `;`-terminated
/// command is executed on its own.
fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| format!("{stmt};"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_multi_command_files() {
        let sql = "CREATE TABLE a (id BIGINT);\n\nCREATE INDEX idx_a ON a (id);\n";
        let stmts = split_statements(sql);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "CREATE TABLE a (id BIGINT);");
        assert_eq!(stmts[1], "CREATE INDEX idx_a ON a (id);");
    }

    #[test]
    fn ignores_blank_trailing_segments() {
        assert!(split_statements("  \n ;; \n").is_empty());
    }
}
