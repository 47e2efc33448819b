//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use marketplace_app::{
    auth::hash_password,
    domain::{
        accounts::data::NewAccount,
        lists::records::{ListKind, Snapshot},
    },
};

use crate::{
    auth::{
        errors::{from_accounts_error, from_password_error},
        handlers::session::{SessionResponse, normalise_email, open_session},
    },
    extensions::*,
    state::State,
};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub email: String,

    /// At least eight characters
    pub password: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub street: Option<String>,
    pub state: Option<String>,

    /// Defaults to Nigeria
    pub country: Option<String>,
}

fn check_request(request: &SignupRequest) -> Result<(), StatusError> {
    if !request.email.contains('@') {
        return Err(StatusError::bad_request().brief("A valid email address is required"));
    }

    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("First and last name are required"));
    }

    Ok(())
}

/// Signup Handler
///
/// Registers a customer account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    check_request(&request)?;

    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .or_500("password hashing task failed")?
        .map_err(|source| from_password_error(&source))?;

    let account = state
        .app
        .accounts
        .create_account(NewAccount {
            email: normalise_email(&request.email),
            password_hash,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone: request.phone,
            address: request.address,
            street: request.street,
            state: request.state,
            country: request.country,
        })
        .await
        .map_err(from_accounts_error)?;

    info!(user_id = %account.id, "account created");

    let session = open_session(
        state.app.auth.as_ref(),
        account,
        Snapshot::empty(ListKind::Wishlist),
        Snapshot::empty(ListKind::Cart),
    )
    .await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session))
}
