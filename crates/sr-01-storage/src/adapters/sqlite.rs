//! # SQLite Storage Adapter
//!
//! Production implementation of the storage ports on one SQLite file.
//!
//! ## Tables
//!
//! - `users` - accounts (`username` is UNIQUE)
//! - `inventory` - shared stock rows, `AUTOINCREMENT` ids so deleted ids are
//!   never handed out again
//!
//! The column layout matches databases created by earlier deployments, so an
//! existing `database.db` can be opened in place.

use crate::ports::outbound::{CredentialStore, InventoryStore};
use crate::StoreResult;
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use shared_types::{InventoryItem, ItemDraft, ItemId, Role, StoreError, User, UserId};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE,
        password TEXT,
        role TEXT DEFAULT 'user'
    );

    CREATE TABLE IF NOT EXISTS inventory (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        product_name TEXT,
        quantity INTEGER
    );
";

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the SQLite connection.
///
/// Cloning is cheap; all clones use the same connection. The mutex is held
/// for one statement (or one read-modify statement) at a time.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(db_error)?;
        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(db_error)?;
        info!(path = %path.display(), journal_mode, "SQLite database opened");
        Self::init(conn)
    }

    /// Create a private in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(db_error)?;
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> StoreResult<T> {
        let conn = self.conn.lock();
        f(&conn).map_err(db_error)
    }
}

fn db_error(e: rusqlite::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

/// Map a `(id, user_id, product_name, quantity)` row.
///
/// Legacy rows may hold NULL name or quantity; they read back as empty / 0.
fn item_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        user_id: row.get::<_, Option<UserId>>(1)?.unwrap_or_default(),
        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        quantity: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        role: row
            .get::<_, Option<String>>(3)?
            .map(Role::new)
            .unwrap_or_default(),
    })
}

// =============================================================================
// INVENTORY
// =============================================================================

/// SQLite-backed [`InventoryStore`].
#[derive(Clone)]
pub struct SqliteInventoryStore {
    db: Database,
}

impl SqliteInventoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl InventoryStore for SqliteInventoryStore {
    fn add(&self, owner: UserId, draft: &ItemDraft) -> StoreResult<InventoryItem> {
        let id = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inventory (user_id, product_name, quantity) VALUES (?1, ?2, ?3)",
                params![owner, draft.name, draft.quantity],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, owner, "Inventory row inserted");
        Ok(InventoryItem {
            id,
            user_id: owner,
            name: draft.name.clone(),
            quantity: draft.quantity,
        })
    }

    fn update(&self, id: ItemId, draft: &ItemDraft) -> StoreResult<InventoryItem> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    "UPDATE inventory SET product_name = ?1, quantity = ?2 WHERE id = ?3
                     RETURNING id, user_id, product_name, quantity",
                    params![draft.name, draft.quantity, id],
                    item_from_row,
                )
                .optional()
            })?
            .ok_or(StoreError::NotFound { id })
    }

    fn get(&self, id: ItemId) -> StoreResult<Option<InventoryItem>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, user_id, product_name, quantity FROM inventory WHERE id = ?1",
                params![id],
                item_from_row,
            )
            .optional()
        })
    }

    fn delete(&self, id: ItemId) -> StoreResult<InventoryItem> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    "DELETE FROM inventory WHERE id = ?1
                     RETURNING id, user_id, product_name, quantity",
                    params![id],
                    item_from_row,
                )
                .optional()
            })?
            .ok_or(StoreError::NotFound { id })
    }

    fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, product_name, quantity FROM inventory ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], item_from_row)?;
            rows.collect()
        })
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// SQLite-backed [`CredentialStore`].
#[derive(Clone)]
pub struct SqliteCredentialStore {
    db: Database,
}

impl SqliteCredentialStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn create_user(&self, username: &str, password_hash: &str, role: &Role) -> StoreResult<User> {
        let conn = self.db.conn.lock();
        let inserted = conn.execute(
            "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
            params![username, password_hash, role.as_str()],
        );

        match inserted {
            Ok(_) => Ok(User {
                id: conn.last_insert_rowid(),
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role: role.clone(),
            }),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUsername {
                username: username.to_string(),
            }),
            Err(e) => Err(db_error(e)),
        }
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, username, password, role FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            )
            .optional()
        })
    }
}
