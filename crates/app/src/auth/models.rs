//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::accounts::records::UserId;

/// Session token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSessionToken {
    pub user_id: UserId,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// Session token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionTokenMetadata {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewSessionToken {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSessionToken {
    pub token: String,
    pub metadata: SessionTokenMetadata,
}
