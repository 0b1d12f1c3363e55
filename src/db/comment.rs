//! Comments left on user profiles.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{LoreError, Result};

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// A comment on a profile, joined with its author's username.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileComment {
    /// Comment id.
    pub id: i64,
    /// Profile (account) the comment was left on.
    pub profile_id: i64,
    /// Author account id.
    pub author_id: i64,
    /// Author username at read time.
    pub author_username: String,
    /// Comment body.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Data for posting a comment.
#[derive(Debug, Clone)]
pub struct NewProfileComment {
    /// Target profile.
    pub profile_id: i64,
    /// Author account.
    pub author_id: i64,
    /// Comment body.
    pub content: String,
}

impl NewProfileComment {
    /// Create a new comment.
    pub fn new(profile_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            profile_id,
            author_id,
            content: content.into(),
        }
    }

    /// Check length and reject control characters other than line breaks and tabs.
    pub fn validate(&self) -> Result<()> {
        let length = self.content.chars().count();
        if self.content.trim().is_empty() {
            return Err(LoreError::Validation("comment is required".to_string()));
        }
        if length > MAX_COMMENT_LENGTH {
            return Err(LoreError::Validation(format!(
                "comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }
        if self
            .content
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(LoreError::Validation(
                "comment contains control characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository for profile comments.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Post a comment, returning the stored record.
    pub async fn create(&self, comment: &NewProfileComment) -> Result<ProfileComment> {
        comment.validate()?;

        let result = sqlx::query(
            "INSERT INTO profile_comments (profile_id, author_id, content, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(comment.profile_id)
        .bind(comment.author_id)
        .bind(&comment.content)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| LoreError::NotFound("comment".to_string()))
    }

    /// Get a comment by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ProfileComment>> {
        let comment = sqlx::query_as::<_, ProfileComment>(
            "SELECT c.id, c.profile_id, c.author_id, u.username AS author_username,
                    c.content, c.created_at
             FROM profile_comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(comment)
    }

    /// Comments on a profile, newest first.
    pub async fn list_for_profile(&self, profile_id: i64) -> Result<Vec<ProfileComment>> {
        let comments = sqlx::query_as::<_, ProfileComment>(
            "SELECT c.id, c.profile_id, c.author_id, u.username AS author_username,
                    c.content, c.created_at
             FROM profile_comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.profile_id = ?
             ORDER BY c.id DESC",
        )
        .bind(profile_id)
        .fetch_all(self.pool)
        .await?;
        Ok(comments)
    }
}
