//! SQLite [`PostStore`] backend.

use super::{
    Filter, NewPost, Order, Post, PostChanges, PostQuery, PostStore, Result, StoreError,
};
use crate::log;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{
    Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter,
    types::{Type, Value},
};
use std::{fmt::Write, fs, path::Path, time::Duration};

/// Schema of the `posts` table. Safe to run on every start.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER NOT NULL PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    tag TEXT NOT NULL DEFAULT '',
    image TEXT,
    published INTEGER NOT NULL DEFAULT 0,
    views INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT
) STRICT;
CREATE INDEX IF NOT EXISTS posts_created_at ON posts (created_at);
";

/// Column list shared by every select, in [`post_from_row`] order.
const COLUMNS: &str =
    "id, slug, title, description, content, tag, image, published, views, created_at, updated_at";

/// How long a writer waits on a locked database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed post store.
///
/// One connection, serialized by a mutex; every operation is a single
/// statement, so the lock is held only for its duration.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self::from_connection(conn)?;
        log!("store"; "{}", path.display());
        Ok(store)
    }

    /// A private in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create the schema if it does not exist yet.
    pub fn migrate(&self) -> Result<()> {
        self.conn.lock().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn get(conn: &Connection, id: i64) -> Result<Post> {
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM posts WHERE id = ?1"),
            params![id],
            post_from_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound(id))
    }
}

impl PostStore for SqliteStore {
    fn find(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let (sql, values) = compile(query);
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&sql)?;
        let posts = stmt
            .query_map(params_from_iter(values), post_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    fn increment_views(&self, id: i64) -> Result<i64> {
        self.conn
            .lock()
            .query_row(
                "UPDATE posts SET views = views + 1 WHERE id = ?1 RETURNING views",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&self, id: i64, changes: &PostChanges, updated_at: DateTime<Utc>) -> Result<()> {
        let changed = self
            .conn
            .lock()
            .execute(
                "UPDATE posts
                 SET title = ?1, description = ?2, slug = ?3, tag = ?4, published = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    changes.title,
                    changes.description,
                    changes.slug,
                    changes.tag,
                    changes.published,
                    encode_time(&updated_at),
                    id,
                ],
            )
            .map_err(|err| unique_violation(err, &changes.slug))?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn insert(&self, post: &NewPost) -> Result<Post> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO posts (slug, title, description, content, tag, image, published, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.slug,
                post.title,
                post.description,
                post.content,
                post.tag,
                post.image,
                post.published,
                encode_time(&post.created_at),
            ],
        )
        .map_err(|err| unique_violation(err, &post.slug))?;

        Self::get(&conn, conn.last_insert_rowid())
    }
}

// ============================================================================
// Query Compilation
// ============================================================================

/// Compile a typed query to a parameterised `SELECT`.
fn compile(query: &PostQuery) -> (String, Vec<Value>) {
    let mut sql = format!("SELECT {COLUMNS} FROM posts");
    let mut values = Vec::with_capacity(query.filters.len());

    for (i, filter) in query.filters.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        let (clause, value) = match filter {
            Filter::Id(id) => ("id = ?", Value::Integer(*id)),
            Filter::Slug(slug) => ("slug = ?", Value::Text(slug.clone())),
            Filter::Published(published) => ("published = ?", Value::Integer(i64::from(*published))),
            Filter::CreatedBefore(at) => ("created_at < ?", Value::Text(encode_time(at))),
            Filter::CreatedAfter(at) => ("created_at > ?", Value::Text(encode_time(at))),
        };
        sql.push_str(clause);
        values.push(value);
    }

    match query.order {
        Some(Order::CreatedAsc) => sql.push_str(" ORDER BY created_at ASC, id ASC"),
        Some(Order::CreatedDesc) => sql.push_str(" ORDER BY created_at DESC, id DESC"),
        None => {}
    }

    if let Some(limit) = query.limit {
        let _ = write!(sql, " LIMIT {limit}");
    }

    (sql, values)
}

// ============================================================================
// Row Mapping
// ============================================================================

/// Timestamps are stored as fixed-width RFC 3339 text so that string
/// comparison in SQL matches chronological order.
fn encode_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    let created_at: String = row.get(9)?;
    let updated_at: Option<String> = row.get(10)?;

    Ok(Post {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        content: row.get(4)?,
        tag: row.get(5)?,
        image: row.get(6)?,
        published: row.get(7)?,
        views: row.get(8)?,
        created_at: decode_time(9, &created_at)?,
        updated_at: updated_at
            .as_deref()
            .map(|text| decode_time(10, text))
            .transpose()?,
    })
}

/// Map a unique-constraint failure on `slug` to [`StoreError::Conflict`].
fn unique_violation(err: rusqlite::Error, slug: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::Conflict(slug.to_owned())
        }
        _ => err.into(),
    }
}
