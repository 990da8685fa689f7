use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};
use validator::{Validate, ValidationErrors};

use super::validated_json::ValidatedJson;
use super::validation::{
    finish, into_text, matches_field, no_unknown_keys, required_email, required_text,
};
use crate::controllayer::auth;
use crate::errors::ServiceResult;
use crate::state::AppState;

// ===== REQUEST DTOs =====

/// Body of `POST /sign-up`.
///
/// Fields stay raw JSON so that every missing or mistyped one is reported,
/// and keys outside the schema are collected for rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub nome: Option<Value>,
    pub email: Option<Value>,
    pub senha: Option<Value>,
    pub confirmacao_de_senha: Option<Value>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

/// Body of `POST /sign-in`.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: Option<Value>,
    pub senha: Option<Value>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

// Passwords stay out of logs and instrument spans.
impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("nome", &self.nome)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "nome", &self.nome);
        required_email(&mut errors, "email", &self.email);
        required_text(&mut errors, "senha", &self.senha);
        matches_field(
            &mut errors,
            "confirmacaoDeSenha",
            &self.confirmacao_de_senha,
            "senha",
            &self.senha,
        );
        no_unknown_keys(&mut errors, &self.unknown);
        finish(errors)
    }
}

impl Validate for SignInRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_email(&mut errors, "email", &self.email);
        required_text(&mut errors, "senha", &self.senha);
        no_unknown_keys(&mut errors, &self.unknown);
        finish(errors)
    }
}

// ===== HANDLERS =====

/// POST /sign-up
/// Register a user. Responds 201 with an empty body.
#[instrument(skip(state), fields(service = "/sign-up"))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> ServiceResult<StatusCode> {
    // Presence was checked by validate()
    let name = into_text(payload.nome);
    let email = into_text(payload.email);
    let password = into_text(payload.senha);

    auth::register(
        state.store.as_ref(),
        state.password_cost,
        &name,
        &email,
        &password,
    )
    .await?;

    info!(email = %email, "Sign-up completed");

    Ok(StatusCode::CREATED)
}

/// POST /sign-in
/// Exchange email and password for a bearer token, returned as plain text.
#[instrument(skip(state), fields(service = "/sign-in"))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> ServiceResult<impl IntoResponse> {
    let email = into_text(payload.email);
    let password = into_text(payload.senha);

    let token = auth::authenticate(state.store.as_ref(), &email, &password).await?;

    Ok((StatusCode::OK, token))
}
