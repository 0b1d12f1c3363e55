//! Per-user manga lists.
//!
//! Each account keeps three independent lists of manga ids: followed,
//! favorites and currently reading. Manga ids are opaque references into a
//! catalog this crate does not own.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{LoreError, Result};

/// Maximum manga id length.
pub const MAX_MANGA_ID_LENGTH: usize = 64;

/// One of the per-user lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MangaList {
    /// Followed manga.
    Follow,
    /// Favorite manga.
    Favorite,
    /// Manga currently being read.
    Reading,
}

impl MangaList {
    /// All lists, in display order.
    pub const ALL: [MangaList; 3] = [MangaList::Follow, MangaList::Favorite, MangaList::Reading];

    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MangaList::Follow => "follow",
            MangaList::Favorite => "favorite",
            MangaList::Reading => "reading",
        }
    }
}

impl fmt::Display for MangaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MangaList {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "follow" => Ok(MangaList::Follow),
            "favorite" => Ok(MangaList::Favorite),
            "reading" => Ok(MangaList::Reading),
            _ => Err(format!("unknown list: {s}")),
        }
    }
}

impl TryFrom<String> for MangaList {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A manga id on one of a user's lists.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LibraryEntry {
    /// List the entry belongs to.
    #[sqlx(try_from = "String")]
    pub list: MangaList,
    /// Manga id.
    pub manga_id: String,
    /// When it was added.
    pub added_at: DateTime<Utc>,
}

/// Check that a manga id is 1-64 characters of `[A-Za-z0-9_-]`.
pub fn validate_manga_id(manga_id: &str) -> Result<()> {
    if manga_id.is_empty() || manga_id.len() > MAX_MANGA_ID_LENGTH {
        return Err(LoreError::Validation(format!(
            "manga id must be 1-{MAX_MANGA_ID_LENGTH} characters"
        )));
    }
    if !manga_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(LoreError::Validation(
            "manga id can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }
    Ok(())
}

/// Repository for manga list membership.
pub struct LibraryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LibraryRepository<'a> {
    /// Create a new LibraryRepository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add the manga to the list if absent, remove it if present.
    ///
    /// Returns `true` if the manga is on the list afterwards.
    pub async fn toggle(&self, user_id: i64, list: MangaList, manga_id: &str) -> Result<bool> {
        validate_manga_id(manga_id)?;

        let removed = sqlx::query(
            "DELETE FROM manga_lists WHERE user_id = ? AND list = ? AND manga_id = ?",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(manga_id)
        .execute(self.pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT OR IGNORE INTO manga_lists (user_id, list, manga_id, added_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(manga_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(true)
    }

    /// Check whether the manga is on the list.
    pub async fn contains(&self, user_id: i64, list: MangaList, manga_id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM manga_lists WHERE user_id = ? AND list = ? AND manga_id = ?)",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(manga_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Manga ids on one list, oldest first.
    pub async fn list(&self, user_id: i64, list: MangaList) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar(
            "SELECT manga_id FROM manga_lists
             WHERE user_id = ? AND list = ?
             ORDER BY added_at, manga_id",
        )
        .bind(user_id)
        .bind(list.as_str())
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }

    /// All entries across every list for the user.
    pub async fn entries(&self, user_id: i64) -> Result<Vec<LibraryEntry>> {
        let entries = sqlx::query_as::<_, LibraryEntry>(
            "SELECT list, manga_id, added_at FROM manga_lists
             WHERE user_id = ?
             ORDER BY added_at, manga_id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(entries)
    }
}
