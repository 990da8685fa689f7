use tracing::{info, instrument, warn};

use crate::datalayer::CRUD::helper::password::PasswordHash;
use crate::datalayer::CRUD::helper::token_generator::{generate_session_token, hash_token};
use crate::datalayer::CRUD::types::{NewSession, User};
use crate::datalayer::Store;
use crate::errors::{ServiceError, ServiceResult};

/// Check a password and open a new session.
///
/// Returns the raw bearer token. Only its digest is persisted, so this is the
/// one time the token exists outside the client.
#[instrument(skip(store, password), fields(backend = store.backend_name()))]
pub async fn authenticate(store: &dyn Store, email: &str, password: &str) -> ServiceResult<String> {
    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ServiceError::UserNotFound(email.to_string()))?;

    if !verify_password(&user, password).await? {
        warn!(user_id = %user.id, "Sign-in with wrong password");
        return Err(ServiceError::InvalidCredentials);
    }

    let (token, token_hash) = generate_session_token();
    let session = store
        .insert_session(NewSession {
            token_hash,
            user_id: user.id,
        })
        .await?;

    info!(user_id = %user.id, session_id = %session.id, "Session opened");

    Ok(token)
}

/// Resolve an `Authorization` header value to the user owning the session.
#[instrument(skip_all, fields(backend = store.backend_name()))]
pub async fn resolve(store: &dyn Store, authorization: Option<&str>) -> ServiceResult<User> {
    let token = authorization
        .and_then(bearer_token)
        .ok_or(ServiceError::MissingToken)?;

    let session = store
        .find_session_by_token_hash(&hash_token(token))
        .await?
        .ok_or(ServiceError::InvalidToken)?;

    store
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(|| ServiceError::OrphanedSession(session.user_id.to_string()))
}

/// Strip an optional `Bearer ` prefix and surrounding whitespace.
///
/// Returns `None` when nothing is left.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let trimmed = header_value.trim();
    let token = trimmed.strip_prefix("Bearer ").unwrap_or(trimmed).trim();

    if token.is_empty() { None } else { Some(token) }
}

async fn verify_password(user: &User, password: &str) -> ServiceResult<bool> {
    let stored = PasswordHash::from_stored(&user.password_hash);
    let password = password.to_string();

    tokio::task::spawn_blocking(move || stored.verify(&password))
        .await
        .map_err(|e| ServiceError::InternalServerError(format!("verify task failed: {}", e)))?
        .map_err(|e| {
            ServiceError::InternalServerError(format!("stored password hash is unusable: {}", e))
        })
}
