use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;
use validator::{Validate, ValidationErrors};

use super::validated_json::ValidatedJson;
use super::validation::{
    finish, into_text, no_unknown_keys, parse_amount, required_amount, required_text,
};
use crate::controllayer::transactions::ledger;
use crate::datalayer::CRUD::types::Transaction;
use crate::errors::{ServiceError, ServiceResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;

// ===== REQUEST DTOs =====

/// Body of `POST /transactions`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub tipo: Option<Value>,
    pub descricao: Option<Value>,
    /// Number, or a string holding one.
    pub valor: Option<Value>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl Validate for CreateTransactionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "tipo", &self.tipo);
        required_text(&mut errors, "descricao", &self.descricao);
        required_amount(&mut errors, "valor", &self.valor);
        no_unknown_keys(&mut errors, &self.unknown);
        finish(errors)
    }
}

// ===== HANDLERS =====

/// GET /transactions
/// List the caller's transactions.
#[instrument(skip_all, fields(service = "/transactions", user_id = %user.id))]
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ServiceResult<Json<Vec<Transaction>>> {
    let transactions = ledger::list(state.store.as_ref(), &user).await?;
    Ok(Json(transactions))
}

/// POST /transactions
/// Record a transaction for the caller. Responds 201 with an empty body.
#[instrument(skip(state, user), fields(service = "/transactions", user_id = %user.id))]
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> ServiceResult<StatusCode> {
    let amount = payload
        .valor
        .as_ref()
        .and_then(parse_amount)
        .ok_or_else(|| ServiceError::Validation(vec!["\"valor\" must be a number".to_string()]))?;
    let kind = into_text(payload.tipo);
    let description = into_text(payload.descricao);

    ledger::append(state.store.as_ref(), &user, &kind, &description, amount).await?;

    Ok(StatusCode::CREATED)
}
