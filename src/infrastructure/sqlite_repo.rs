use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};

use crate::domain::{
    error::TodoResult,
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

const COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> TodoResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = if is_memory_url(database_url) {
            // every connection to :memory: is its own database, so keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };
        tracing::debug!(database_url, "connected to sqlite");
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> TodoResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, input: CreateTodo) -> TodoResult<Todo> {
        let now = now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO todos (title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, 0, ?3, ?3)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(format_timestamp(now))
        .fetch_one(&*self.pool)
        .await?;
        Ok(Todo { id: TodoId(id), title: input.title, description: input.description, completed: false, created_at: now, updated_at: now })
    }

    async fn get(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(row_to_todo).transpose()?)
    }

    async fn list(&self) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"))
            .fetch_all(&*self.pool)
            .await?;
        let todos = rows.into_iter().map(row_to_todo).collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(todos)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Option<Todo>> {
        // absent fields keep their stored value; description needs a flag to tell "clear" from "keep"
        let (set_description, description) = match input.description {
            Some(d) => (true, d),
            None => (false, None),
        };
        let row = sqlx::query(&format!(
            "UPDATE todos SET
                title = COALESCE(?2, title),
                description = CASE WHEN ?3 THEN ?4 ELSE description END,
                completed = COALESCE(?5, completed),
                updated_at = ?6
             WHERE id = ?1
             RETURNING {COLUMNS}"
        ))
        .bind(id.0)
        .bind(input.title)
        .bind(set_description)
        .bind(description)
        .bind(input.completed)
        .bind(format_timestamp(now()))
        .fetch_optional(&*self.pool)
        .await?;
        Ok(row.map(row_to_todo).transpose()?)
    }

    async fn toggle(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        let row = sqlx::query(&format!(
            "UPDATE todos SET completed = NOT completed, updated_at = ?2
             WHERE id = ?1
             RETURNING {COLUMNS}"
        ))
        .bind(id.0)
        .bind(format_timestamp(now()))
        .fetch_optional(&*self.pool)
        .await?;
        Ok(row.map(row_to_todo).transpose()?)
    }

    async fn delete(&self, id: TodoId) -> TodoResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Creates the database file and its parent directory for `sqlite://` and `sqlite:` URLs.
pub fn prepare_sqlite_file(database_url: &str) -> std::io::Result<()> {
    if is_memory_url(database_url) { return Ok(()); }
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    // Windows absolute paths arrive as /C:/...
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    let p = Path::new(path);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    if !p.exists() {
        std::fs::OpenOptions::new().create(true).append(true).open(p)?;
    }
    Ok(())
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

// Microsecond precision keeps the stored text fixed-width, so ORDER BY on it is chronological.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::ColumnDecode { index: column.to_string(), source: Box::new(e) })
}

fn row_to_todo(row: SqliteRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        completed: row.try_get("completed")?,
        created_at: parse_timestamp(&row, "created_at")?,
        updated_at: parse_timestamp(&row, "updated_at")?,
    })
}
