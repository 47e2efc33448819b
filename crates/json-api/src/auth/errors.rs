//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::{
    auth::{AuthServiceError, PasswordError},
    domain::accounts::AccountsServiceError,
};

pub(crate) fn invalid_credentials() -> StatusError {
    StatusError::unauthorized().brief("Invalid email or password")
}

pub(crate) fn from_accounts_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AccountsServiceError::NotFound => invalid_credentials(),
        AccountsServiceError::MissingRequiredData | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account details")
        }
        AccountsServiceError::InvalidReference => {
            error!("account refers to a missing record");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn from_auth_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session token")
        }
        AuthServiceError::InvalidTtl => {
            error!("session token lifetime is misconfigured");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("session token storage failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn from_password_error(error: &PasswordError) -> StatusError {
    match error {
        PasswordError::TooShort => StatusError::bad_request().brief(error.to_string()),
        PasswordError::InvalidCredentials => invalid_credentials(),
        PasswordError::Hash => {
            error!("failed to hash password");

            StatusError::internal_server_error()
        }
    }
}
