use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::controllayer::auth::resolve;
use crate::datalayer::CRUD::types::User;
use crate::errors::ServiceError;
use crate::middleware::request_id::get_request_id;
use crate::state::AppState;

/// User resolved from the bearer token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Bearer token authentication middleware
///
/// Resolves the `Authorization` header to a session and its user. Any failure
/// short-circuits with 401 before the handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let request_id = get_request_id(&request);

    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let user = resolve(state.store.as_ref(), authorization.as_deref()).await?;

    tracing::debug!(
        request_id = ?request_id,
        user_id = %user.id,
        "Bearer token authenticated"
    );

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}
