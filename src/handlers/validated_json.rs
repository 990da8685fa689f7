use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::errors::ServiceError;

/// JSON object body that has been mapped onto `T` and then passed `Validate`.
///
/// The body is read as a plain JSON value first, so field types are checked by
/// `Validate` alongside everything else. Every failure becomes a 422 carrying
/// the list of messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_message(rejection: &JsonRejection) -> String {
    tracing::debug!(rejection = %rejection.body_text(), "Unreadable JSON body");

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "\"value\" must be sent as application/json".to_string()
        }
        _ => "\"value\" must be valid JSON".to_string(),
    }
}

fn not_an_object() -> ServiceError {
    ServiceError::Validation(vec!["\"value\" must be of type object".to_string()])
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::Validation(vec![rejection_message(&rejection)]))?;

        if !body.is_object() {
            return Err(not_an_object());
        }

        let value: T = serde_json::from_value(body).map_err(|err| {
            tracing::debug!(error = %err, "JSON object did not map onto the request type");
            not_an_object()
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
