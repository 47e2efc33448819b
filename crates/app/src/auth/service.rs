//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    auth::{
        AuthServiceError, IssuedSessionToken, SessionToken, models::NewSessionToken,
        repository::PgAuthRepository,
    },
    domain::accounts::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    ttl: SignedDuration,
}

impl PgAuthService {
    /// `ttl_hours` of zero issues tokens that never expire.
    #[must_use]
    pub fn new(pool: PgPool, ttl_hours: u32) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            ttl: SignedDuration::from_hours(i64::from(ttl_hours)),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn issue_session_token(
        &self,
        user: UserId,
    ) -> Result<IssuedSessionToken, AuthServiceError> {
        let token = SessionToken::generate();

        let expires_at = if self.ttl.is_zero() {
            None
        } else {
            Some(
                Timestamp::now()
                    .checked_add(self.ttl)
                    .map_err(|_ignored| AuthServiceError::InvalidTtl)?,
            )
        };

        let metadata = self
            .repository
            .create_session_token(&NewSessionToken {
                uuid: token.uuid(),
                user_id: user,
                token_hash: token.verifier(user),
                expires_at,
            })
            .await?;

        Ok(IssuedSessionToken {
            token: token.to_string(),
            metadata,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError> {
        let presented: SessionToken = bearer_token
            .parse()
            .map_err(|_ignored| AuthServiceError::NotFound)?;

        let stored = self
            .repository
            .find_active_session_token(presented.uuid())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if presented.verifier(stored.user_id) != stored.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_session_token(presented.uuid())
            .await
        {
            debug!(error = %error, "failed to record session token use");
        }

        Ok(stored.user_id)
    }

    async fn revoke_session_token(&self, bearer_token: &str) -> Result<bool, AuthServiceError> {
        let presented: SessionToken = bearer_token.parse()?;

        Ok(self
            .repository
            .revoke_session_token(presented.uuid())
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a new session token for `user`.
    async fn issue_session_token(
        &self,
        user: UserId,
    ) -> Result<IssuedSessionToken, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError>;

    /// Revoke a token. Returns `true` if the token was active.
    async fn revoke_session_token(&self, bearer_token: &str) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_customer};

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "ada@example.com").await?;

        let issued = ctx.auth.issue_session_token(user).await?;
        let resolved = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(resolved, user);
        assert_eq!(issued.metadata.user_id, user);
        assert!(issued.metadata.expires_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "ada@example.com").await?;

        let issued = ctx.auth.issue_session_token(user).await?;
        let (id, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "A".repeat(43));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "ada@example.com").await?;

        let issued = ctx.auth.issue_session_token(user).await?;

        assert!(ctx.auth.revoke_session_token(&issued.token).await?);
        assert!(!ctx.auth.revoke_session_token(&issued.token).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_bearer_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("definitely-not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
