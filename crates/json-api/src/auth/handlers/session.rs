//! Session payloads shared by signup and signin.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use marketplace_app::{
    auth::AuthService,
    domain::{accounts::records::AccountRecord, lists::records::Snapshot},
};

use crate::{auth::errors::from_auth_error, lists::get::ListResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub street: Option<String>,
    pub state: Option<String>,
    pub country: String,

    /// `customer` or `admin`
    pub role: String,
}

impl From<AccountRecord> for AccountResponse {
    fn from(account: AccountRecord) -> Self {
        AccountResponse {
            id: account.id.into_i64(),
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            phone: account.phone,
            address: account.address,
            street: account.street,
            state: account.state,
            country: account.country,
            role: account.role.as_str().to_string(),
        }
    }
}

/// A signed-in account with its lists and a fresh bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub account: AccountResponse,
    pub wishlist: ListResponse,
    pub cart: ListResponse,

    /// Bearer token; shown only once
    pub token: String,

    /// When the token stops being accepted, if ever
    pub expires_at: Option<String>,
}

pub(super) async fn open_session(
    auth: &dyn AuthService,
    account: AccountRecord,
    wishlist: Snapshot,
    cart: Snapshot,
) -> Result<SessionResponse, StatusError> {
    let issued = auth
        .issue_session_token(account.id)
        .await
        .map_err(from_auth_error)?;

    Ok(SessionResponse {
        account: account.into(),
        wishlist: wishlist.into(),
        cart: cart.into(),
        token: issued.token,
        expires_at: issued.metadata.expires_at.map(|at| at.to_string()),
    })
}

/// Emails are compared case-insensitively.
pub(super) fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}
