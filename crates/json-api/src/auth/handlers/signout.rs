//! Signout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{errors::from_auth_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Signout Handler
///
/// Revokes the bearer token used for this request.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    state
        .app
        .auth
        .revoke_session_token(token)
        .await
        .map_err(from_auth_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::MockApp;

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.authenticated_service(Router::with_path("auth/signout").post(handler))
    }

    #[tokio::test]
    async fn test_signout_revokes_presented_token() -> TestResult {
        let mut app = MockApp::default();

        app.auth
            .expect_revoke_session_token()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(true));

        let res = TestClient::post("http://example.com/auth/signout")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
