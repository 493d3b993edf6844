//! SQL schema for the Recall SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA busy_timeout = 5000;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS concepts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    title          TEXT    NOT NULL,
    description    TEXT,
    status         TEXT    NOT NULL DEFAULT 'pending',  -- 'pending' | 'archived'
    current_cycle  INTEGER NOT NULL DEFAULT 0,          -- doubles as row version
    created_at     TEXT    NOT NULL,                    -- RFC 3339 UTC
    last_completed TEXT,                                -- RFC 3339 UTC or NULL
    next_review    TEXT    NOT NULL                     -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS concepts_next_review_idx ON concepts(next_review);

PRAGMA user_version = 1;
";
