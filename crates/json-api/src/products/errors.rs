//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("You may not modify this product")
        }
        ProductsServiceError::InvalidPage => {
            StatusError::bad_request().brief("Page numbers start at 1")
        }
        ProductsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Media(source) if source.is_invalid_image() => {
            StatusError::bad_request().brief(source.to_string())
        }
        ProductsServiceError::Media(source) => {
            error!("media store failed: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::InvalidReference => {
            error!("product refers to a missing record");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use marketplace_app::{domain::products::data::ProductValidationError, media::MediaError};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (ProductsServiceError::NotFound, StatusCode::NOT_FOUND),
            (ProductsServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ProductsServiceError::AlreadyExists, StatusCode::CONFLICT),
            (ProductsServiceError::InvalidPage, StatusCode::BAD_REQUEST),
            (
                ProductsServiceError::Validation(ProductValidationError::Title),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductsServiceError::Media(MediaError::TooLarge(3_000_000)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductsServiceError::Media(MediaError::UnexpectedResponse("status 500".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProductsServiceError::InvalidReference,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let label = format!("{error:?}");

            assert_eq!(into_status_error(error).code, expected, "{label}");
        }
    }
}
