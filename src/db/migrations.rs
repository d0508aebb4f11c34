use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Run all pending migrations.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    create_migration_table(pool).await?;
    let current_version = get_schema_version(pool).await?;

    if current_version < 1 {
        debug!("Running migration v1");
        run_migration_v1(pool).await?;
        set_schema_version(pool, 1).await?;
    }

    if current_version < 2 {
        debug!("Running migration v2");
        run_migration_v2(pool).await?;
        set_schema_version(pool, 2).await?;
    }

    Ok(())
}

async fn create_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS _schema_version (
            version INTEGER PRIMARY KEY
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create schema version table")?;

    Ok(())
}

async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT version FROM _schema_version LIMIT 1")
        .fetch_optional(pool)
        .await
        .context("Failed to get schema version")?;

    Ok(row.map_or(0, |(v,)| v))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("DELETE FROM _schema_version")
        .execute(pool)
        .await?;
    sqlx::query("INSERT INTO _schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}

async fn run_migration_v1(pool: &SqlitePool) -> Result<()> {
    debug!("Running migration v1: creating archive tables");

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            selftext TEXT NOT NULL DEFAULT '',
            author TEXT NOT NULL,
            subreddit TEXT NOT NULL,
            created_utc INTEGER NOT NULL,
            score INTEGER NOT NULL DEFAULT 0,
            num_comments INTEGER NOT NULL DEFAULT 0
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create submissions table")?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            submission_id TEXT NOT NULL,
            parent_id TEXT NOT NULL,
            author TEXT NOT NULL,
            body TEXT NOT NULL,
            subreddit TEXT NOT NULL,
            created_utc INTEGER NOT NULL,
            score INTEGER NOT NULL DEFAULT 0
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create comments table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_submission ON comments(submission_id)")
        .execute(pool)
        .await
        .context("Failed to create comments submission index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_author ON comments(author)")
        .execute(pool)
        .await
        .context("Failed to create comments author index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submissions_author ON submissions(author)")
        .execute(pool)
        .await
        .context("Failed to create submissions author index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submissions_created ON submissions(created_utc)")
        .execute(pool)
        .await
        .context("Failed to create submissions created index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_created ON comments(created_utc)")
        .execute(pool)
        .await
        .context("Failed to create comments created index")?;

    Ok(())
}

async fn run_migration_v2(pool: &SqlitePool) -> Result<()> {
    debug!("Running migration v2: creating FTS indexes");

    sqlx::query(
        r"
        CREATE VIRTUAL TABLE IF NOT EXISTS submissions_fts USING fts5(
            title,
            selftext,
            content='submissions',
            content_rowid='rowid'
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create submissions FTS table")?;

    sqlx::query(
        r"
        CREATE VIRTUAL TABLE IF NOT EXISTS comments_fts USING fts5(
            body,
            content='comments',
            content_rowid='rowid'
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create comments FTS table")?;

    // Keep the external-content indexes in sync with the base tables
    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS submissions_fts_ai AFTER INSERT ON submissions BEGIN
            INSERT INTO submissions_fts(rowid, title, selftext)
            VALUES (new.rowid, new.title, new.selftext);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create submissions FTS insert trigger")?;

    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS submissions_fts_ad AFTER DELETE ON submissions BEGIN
            INSERT INTO submissions_fts(submissions_fts, rowid, title, selftext)
            VALUES ('delete', old.rowid, old.title, old.selftext);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create submissions FTS delete trigger")?;

    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS submissions_fts_au AFTER UPDATE ON submissions BEGIN
            INSERT INTO submissions_fts(submissions_fts, rowid, title, selftext)
            VALUES ('delete', old.rowid, old.title, old.selftext);
            INSERT INTO submissions_fts(rowid, title, selftext)
            VALUES (new.rowid, new.title, new.selftext);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create submissions FTS update trigger")?;

    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS comments_fts_ai AFTER INSERT ON comments BEGIN
            INSERT INTO comments_fts(rowid, body) VALUES (new.rowid, new.body);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create comments FTS insert trigger")?;

    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS comments_fts_ad AFTER DELETE ON comments BEGIN
            INSERT INTO comments_fts(comments_fts, rowid, body)
            VALUES ('delete', old.rowid, old.body);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create comments FTS delete trigger")?;

    sqlx::query(
        r"
        CREATE TRIGGER IF NOT EXISTS comments_fts_au AFTER UPDATE ON comments BEGIN
            INSERT INTO comments_fts(comments_fts, rowid, body)
            VALUES ('delete', old.rowid, old.body);
            INSERT INTO comments_fts(rowid, body) VALUES (new.rowid, new.body);
        END
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create comments FTS update trigger")?;

    // Index any rows loaded before this migration ran
    sqlx::query("INSERT INTO submissions_fts(submissions_fts) VALUES ('rebuild')")
        .execute(pool)
        .await
        .context("Failed to rebuild submissions FTS index")?;

    sqlx::query("INSERT INTO comments_fts(comments_fts) VALUES ('rebuild')")
        .execute(pool)
        .await
        .context("Failed to rebuild comments FTS index")?;

    Ok(())
}
