use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use login_counter_common::UserId;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::{MetaStore, StoreError};

/// A host user account, as listed in the admin user table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    /// When the account was first seen
    pub created_at: DateTime<Utc>,
}

/// Unreadable creation times read as the Unix epoch.
fn parse_created_at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// SQLite-backed user directory and per-user metadata store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        // Parse sqlite: prefix if present
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
            }
            Connection::open(path)?
        };

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_meta (
                user_id INTEGER NOT NULL,
                meta_key TEXT NOT NULL,
                meta_value TEXT NOT NULL,
                PRIMARY KEY (user_id, meta_key)
            )",
            [],
        )?;

        tracing::info!("User store initialized with database: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Find a user by name, creating the account on first sight.
    pub fn find_or_create_user(&self, username: &str) -> Result<UserRecord, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let existing: Option<(i64, String, String)> = conn
            .query_row(
                "SELECT id, username, created_at FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        if let Some((id, username, created_at)) = existing {
            return Ok(UserRecord {
                id: UserId(id),
                username,
                created_at: parse_created_at(&created_at),
            });
        }

        let now = Utc::now();
        conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
            params![username, now.to_rfc3339()],
        )?;
        let id = UserId(conn.last_insert_rowid());

        tracing::info!("Created new user: {} ({})", username, id);

        Ok(UserRecord {
            id,
            username: username.to_string(),
            created_at: now,
        })
    }

    /// All known users, in creation order.
    pub fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut stmt = conn.prepare("SELECT id, username, created_at FROM users ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut users = Vec::new();
        for row in rows {
            let (id, username, created_at) = row?;
            users.push(UserRecord {
                id: UserId(id),
                username,
                created_at: parse_created_at(&created_at),
            });
        }
        Ok(users)
    }
}

impl MetaStore for SqliteStore {
    fn get(&self, user_id: UserId, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT meta_value FROM user_meta WHERE user_id = ?1 AND meta_key = ?2",
                params![user_id.0, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, user_id: UserId, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        conn.execute(
            "INSERT INTO user_meta (user_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value",
            params![user_id.0, key, value],
        )?;
        Ok(())
    }
}
