use tracing::{info, instrument};

use crate::datalayer::CRUD::helper::password::PasswordHash;
use crate::datalayer::CRUD::types::{NewUser, User};
use crate::datalayer::Store;
use crate::errors::{ServiceError, ServiceResult};

/// Register a new user.
///
/// The caller has already validated the payload, including the password
/// confirmation. The email is not checked for uniqueness.
#[instrument(skip(store, password), fields(backend = store.backend_name()))]
pub async fn register(
    store: &dyn Store,
    password_cost: u32,
    name: &str,
    email: &str,
    password: &str,
) -> ServiceResult<User> {
    let password_hash = hash_password(password, password_cost).await?;

    let user = store
        .insert_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.into_string(),
        })
        .await?;

    info!(user_id = %user.id, "User registered");

    Ok(user)
}

/// bcrypt is CPU bound, keep it off the async workers.
async fn hash_password(password: &str, cost: u32) -> ServiceResult<PasswordHash> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || PasswordHash::from_raw_password(&password, cost))
        .await
        .map_err(|e| ServiceError::InternalServerError(format!("hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::InternalServerError(format!("failed to hash password: {}", e)))
}
