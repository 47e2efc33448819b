//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{ActiveSessionToken, NewSessionToken, SessionTokenMetadata},
    domain::accounts::records::UserId,
};

const CREATE_SESSION_TOKEN_SQL: &str = include_str!("sql/create_session_token.sql");
const FIND_ACTIVE_SESSION_TOKEN_SQL: &str = include_str!("sql/find_active_session_token.sql");
const TOUCH_SESSION_TOKEN_SQL: &str = include_str!("sql/touch_session_token.sql");
const REVOKE_SESSION_TOKEN_SQL: &str = include_str!("sql/revoke_session_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_session_token(
        &self,
        token: &NewSessionToken,
    ) -> Result<SessionTokenMetadata, sqlx::Error> {
        query_as::<Postgres, SessionTokenMetadata>(CREATE_SESSION_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_id.into_i64())
            .bind(&token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    /// Find a token that is neither revoked nor expired.
    pub(crate) async fn find_active_session_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveSessionToken>, sqlx::Error> {
        query_as::<Postgres, ActiveSessionToken>(FIND_ACTIVE_SESSION_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_session_token(&self, token_uuid: Uuid) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns `true` when an active token was revoked.
    pub(crate) async fn revoke_session_token(&self, token_uuid: Uuid) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(REVOKE_SESSION_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
            .map(|revoked| revoked.is_some())
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSessionToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: UserId::from_i64(row.try_get("user_id")?),
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_id: UserId::from_i64(row.try_get("user_id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
