//! Database schema and migrations for LoreLibrary.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: accounts
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    username        TEXT NOT NULL UNIQUE,   -- case-sensitive
    password_hash   TEXT NOT NULL,          -- Argon2id PHC string
    role            TEXT NOT NULL DEFAULT 'reader',
    profile_picture TEXT,
    created_at      TEXT NOT NULL
);
"#,
    // v2: server-side sessions
    r#"
CREATE TABLE sessions (
    id              TEXT PRIMARY KEY,
    user_id         INTEGER NOT NULL,
    username        TEXT NOT NULL,
    role            TEXT NOT NULL,
    profile_picture TEXT,
    created_at      INTEGER NOT NULL,       -- unix seconds
    expires_at      INTEGER NOT NULL        -- unix seconds
);

CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
    // v3: per-user manga lists
    r#"
CREATE TABLE manga_lists (
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    list        TEXT NOT NULL,              -- 'follow', 'favorite', 'reading'
    manga_id    TEXT NOT NULL,
    added_at    TEXT NOT NULL,
    PRIMARY KEY (user_id, list, manga_id)
);
"#,
    // v4: comments left on user profiles
    r#"
CREATE TABLE profile_comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    author_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_profile_comments_profile ON profile_comments(profile_id, id);
"#,
];
