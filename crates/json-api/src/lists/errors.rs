//! List Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::lists::ListsServiceError;

pub(crate) fn into_status_error(error: ListsServiceError) -> StatusError {
    match error {
        ListsServiceError::MissingQuantity => {
            StatusError::bad_request().brief("A quantity is required")
        }
        ListsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        ListsServiceError::MissingRequiredData | ListsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid list payload")
        }
        ListsServiceError::AlreadyExists => StatusError::conflict(),
        ListsServiceError::NotFound => StatusError::not_found(),
        ListsServiceError::InvalidReference => {
            error!("list entry refers to a missing product");

            StatusError::internal_server_error()
        }
        ListsServiceError::MissingEntry => {
            error!("attempted to remove a product that is not in the list");

            StatusError::internal_server_error()
        }
        ListsServiceError::Sql(source) => {
            error!("list storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
