//! Signin Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use marketplace_app::{auth::verify_password, domain::accounts::AccountsServiceError};

use crate::{
    auth::{
        errors::{from_accounts_error, from_password_error, invalid_credentials},
        handlers::session::{SessionResponse, normalise_email, open_session},
    },
    extensions::*,
    state::State,
};

/// Signin Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signin Handler
///
/// Checks the password and returns the account with its wishlist, cart and a
/// new bearer token.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SigninRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = match state
        .app
        .accounts
        .find_by_email_with_lists(&normalise_email(&request.email))
        .await
    {
        Ok(session) => session,
        Err(AccountsServiceError::NotFound) => return Err(invalid_credentials()),
        Err(source) => return Err(from_accounts_error(source)),
    };

    let password = request.password;
    let password_hash = session.credentials.password_hash;

    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .or_500("password verification task failed")?
        .map_err(|source| from_password_error(&source))?;

    let account = session.credentials.account;

    info!(user_id = %account.id, "account signed in");

    let response =
        open_session(state.app.auth.as_ref(), account, session.wishlist, session.cart).await?;

    Ok(Json(response))
}
