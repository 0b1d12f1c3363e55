//! Profile, manga list and profile comment handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::CredentialStore;
use crate::db::{Account, CommentRepository, LibraryRepository, MangaList, NewProfileComment};
use crate::web::dto::{
    CommentInfo, CommentResponse, CommentsResponse, CreateCommentRequest, MangaListsResponse,
    MessageResponse, OwnProfile, ProfilePictureRequest, ProfileResponse, PublicProfile,
    ToggleResponse, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Fetch an account or fail with 404.
async fn find_account(state: &AppState, id: i64) -> Result<Account, ApiError> {
    state
        .auth
        .credentials()
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = id, error = %e, "Failed to load account");
            ApiError::internal("Server error")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Load all three manga lists for a user.
async fn load_manga_lists(state: &AppState, user_id: i64) -> Result<MangaListsResponse, ApiError> {
    let entries = LibraryRepository::new(state.db.pool())
        .entries(user_id)
        .await?;

    let mut lists = MangaListsResponse::default();
    for entry in entries {
        lists.list_mut(entry.list).push(entry.manga_id);
    }
    Ok(lists)
}

/// GET /api/users/profile - The caller's own profile.
pub async fn get_own_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ProfileResponse<OwnProfile>>, ApiError> {
    let account = find_account(&state, identity.id).await?;
    let manga = load_manga_lists(&state, account.id).await?;

    Ok(Json(ProfileResponse {
        profile: OwnProfile {
            user: UserInfo::from(&account),
            created_at: account.created_at,
            manga,
        },
    }))
}

/// POST /api/users/profile/picture - Point the profile at already-stored media.
pub async fn update_profile_picture(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<ProfilePictureRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = state
        .auth
        .credentials()
        .update_profile_picture(identity.id, &req.profile_picture)
        .await
        .map_err(|e| {
            tracing::error!(user_id = identity.id, error = %e, "Failed to update profile picture");
            ApiError::internal("Server error")
        })?;

    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!(user_id = identity.id, "Profile picture updated");
    Ok(Json(MessageResponse::new(
        "Profile picture updated successfully",
    )))
}

/// GET /api/users/profile/:id - Public profile.
pub async fn get_public_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProfileResponse<PublicProfile>>, ApiError> {
    let account = find_account(&state, id).await?;
    let manga = load_manga_lists(&state, account.id).await?;

    Ok(Json(ProfileResponse {
        profile: PublicProfile {
            id: account.id,
            username: account.username,
            profile_picture: account.profile_picture.unwrap_or_default(),
            manga,
        },
    }))
}

/// GET /api/users/:id/manga - A user's manga lists.
pub async fn get_user_manga(
    State(state): State<Arc<AppState>>,
    AuthUser(_identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MangaListsResponse>, ApiError> {
    let account = find_account(&state, id).await?;
    Ok(Json(load_manga_lists(&state, account.id).await?))
}

async fn toggle_manga(
    state: &AppState,
    caller: i64,
    user_id: i64,
    list: MangaList,
    manga_id: String,
) -> Result<Json<ToggleResponse>, ApiError> {
    if caller != user_id {
        return Err(ApiError::forbidden("You can only change your own lists"));
    }

    let added = LibraryRepository::new(state.db.pool())
        .toggle(user_id, list, &manga_id)
        .await?;

    tracing::debug!(user_id, list = %list, manga_id = %manga_id, added, "Manga list toggled");

    let message = if added {
        format!("Added to {list} list")
    } else {
        format!("Removed from {list} list")
    };

    Ok(Json(ToggleResponse {
        message,
        list,
        manga_id,
        added,
    }))
}

/// POST /api/users/:id/follow/:manga_id - Toggle a followed manga.
pub async fn toggle_follow(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path((id, manga_id)): Path<(i64, String)>,
) -> Result<Json<ToggleResponse>, ApiError> {
    toggle_manga(&state, identity.id, id, MangaList::Follow, manga_id).await
}

/// POST /api/users/:id/favorite/:manga_id - Toggle a favorite manga.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path((id, manga_id)): Path<(i64, String)>,
) -> Result<Json<ToggleResponse>, ApiError> {
    toggle_manga(&state, identity.id, id, MangaList::Favorite, manga_id).await
}

/// POST /api/users/:id/reading/:manga_id - Toggle a manga being read.
pub async fn toggle_reading(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path((id, manga_id)): Path<(i64, String)>,
) -> Result<Json<ToggleResponse>, ApiError> {
    toggle_manga(&state, identity.id, id, MangaList::Reading, manga_id).await
}

/// GET /api/users/profile/:id/comments - Comments on a profile, newest first.
pub async fn list_profile_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let account = find_account(&state, id).await?;

    let comments = CommentRepository::new(state.db.pool())
        .list_for_profile(account.id)
        .await?
        .into_iter()
        .map(CommentInfo::from)
        .collect();

    Ok(Json(CommentsResponse { comments }))
}

/// POST /api/users/profile/:id/comments - Leave a comment on a profile.
pub async fn create_profile_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let profile = find_account(&state, id).await?;

    let comment = CommentRepository::new(state.db.pool())
        .create(&NewProfileComment::new(profile.id, identity.id, req.content))
        .await?;

    tracing::info!(
        profile_id = profile.id,
        author_id = identity.id,
        comment_id = comment.id,
        "Profile comment posted"
    );

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            message: "Comment added successfully".to_string(),
            comment: comment.into(),
        }),
    ))
}
