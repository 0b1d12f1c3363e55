//! Response DTOs for the web API.
//!
//! Field names are camelCase to match what the browser client reads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::{Identity, Session};
use crate::db::{Account, MangaList, ProfileComment, Role};

/// Plain `{message}` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User information in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
    /// Profile picture reference; empty when unset.
    pub profile_picture: String,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
            profile_picture: account.profile_picture.clone().unwrap_or_default(),
        }
    }
}

impl From<&Session> for UserInfo {
    fn from(session: &Session) -> Self {
        let identity = &session.identity;
        Self {
            id: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            profile_picture: identity.profile_picture.clone().unwrap_or_default(),
        }
    }
}

/// Register / login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Human-readable message.
    pub message: String,
    /// The authenticated user.
    pub user: UserInfo,
}

/// Current identity as admitted by the gate.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Current role.
    pub role: Role,
}

impl From<Identity> for CurrentUser {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            role: identity.role,
        }
    }
}

/// `GET /api/auth/me` response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Current identity.
    pub user: CurrentUser,
}

/// A user's three manga lists.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListsResponse {
    /// Followed manga ids.
    pub followed_manga: Vec<String>,
    /// Favorite manga ids.
    pub favorite_manga: Vec<String>,
    /// Manga ids being read.
    pub reading_manga: Vec<String>,
}

impl MangaListsResponse {
    /// Mutable access to the vector for a list.
    pub fn list_mut(&mut self, list: MangaList) -> &mut Vec<String> {
        match list {
            MangaList::Follow => &mut self.followed_manga,
            MangaList::Favorite => &mut self.favorite_manga,
            MangaList::Reading => &mut self.reading_manga,
        }
    }
}

/// Own profile, including role and creation time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfile {
    /// Account fields.
    #[serde(flatten)]
    pub user: UserInfo,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Manga lists.
    #[serde(flatten)]
    pub manga: MangaListsResponse,
}

/// Profile visible to anyone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Profile picture reference; empty when unset.
    pub profile_picture: String,
    /// Manga lists.
    #[serde(flatten)]
    pub manga: MangaListsResponse,
}

/// Wrapper for profile responses.
#[derive(Debug, Serialize)]
pub struct ProfileResponse<T: Serialize> {
    /// The profile.
    pub profile: T,
}

/// Result of toggling a manga on a list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Human-readable message.
    pub message: String,
    /// List that was changed.
    pub list: MangaList,
    /// Manga id.
    pub manga_id: String,
    /// Whether the manga is on the list afterwards.
    pub added: bool,
}

/// Comment author.
#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
}

/// A profile comment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInfo {
    /// Comment id.
    pub id: i64,
    /// Profile the comment is on.
    pub profile_id: i64,
    /// Author.
    pub author: CommentAuthor,
    /// Comment body.
    pub content: String,
    /// When it was posted.
    pub created_at: DateTime<Utc>,
}

impl From<ProfileComment> for CommentInfo {
    fn from(comment: ProfileComment) -> Self {
        Self {
            id: comment.id,
            profile_id: comment.profile_id,
            author: CommentAuthor {
                id: comment.author_id,
                username: comment.author_username,
            },
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Response for a newly posted comment.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Human-readable message.
    pub message: String,
    /// The stored comment.
    pub comment: CommentInfo,
}

/// Comments on a profile.
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    /// Comments, newest first.
    pub comments: Vec<CommentInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_serialization() {
        let info = UserInfo {
            id: 1,
            username: "alice123".to_string(),
            role: Role::Reader,
            profile_picture: String::new(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "alice123");
        assert_eq!(json["role"], "reader");
        assert_eq!(json["profilePicture"], "");
    }

    #[test]
    fn test_public_profile_flattens_lists() {
        let mut manga = MangaListsResponse::default();
        manga.list_mut(MangaList::Follow).push("berserk".to_string());

        let profile = PublicProfile {
            id: 3,
            username: "reader1".to_string(),
            profile_picture: "uploads/r.png".to_string(),
            manga,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["followedManga"][0], "berserk");
        assert_eq!(json["favoriteManga"].as_array().unwrap().len(), 0);
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_toggle_response_serialization() {
        let resp = ToggleResponse {
            message: "Added to favorite".to_string(),
            list: MangaList::Favorite,
            manga_id: "berserk".to_string(),
            added: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["list"], "favorite");
        assert_eq!(json["mangaId"], "berserk");
        assert_eq!(json["added"], true);
    }
}
