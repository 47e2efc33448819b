//! Bearer session tokens.
//!
//! A token reads `mk_v1_<uuid>.<secret>`, where the secret is 32 random bytes
//! in unpadded base64url. Storage only ever sees the token id and a SHA-256
//! verifier bound to the owning user.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::accounts::records::UserId;

/// Prefix shared by every session token, including the format version.
pub const SESSION_TOKEN_PREFIX: &str = "mk_v1_";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[derive(Clone)]
pub struct SessionToken {
    uuid: Uuid,
    secret: Zeroizing<[u8; SECRET_BYTES]>,
}

impl SessionToken {
    /// Mint a token with a time-ordered id and a random secret.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = Zeroizing::new([0_u8; SECRET_BYTES]);

        OsRng.fill_bytes(secret.as_mut_slice());

        Self {
            uuid: Uuid::now_v7(),
            secret,
        }
    }

    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Hex SHA-256 over the token id, the owner and the secret.
    #[must_use]
    pub fn verifier(&self, user: UserId) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.uuid.as_bytes());
        hasher.update(user.into_i64().to_be_bytes());
        hasher.update(self.secret.as_slice());

        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SESSION_TOKEN_PREFIX}{}.{}",
            self.uuid.simple(),
            URL_SAFE_NO_PAD.encode(self.secret.as_slice())
        )
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("uuid", &self.uuid)
            .field("secret", &"**redacted**")
            .finish()
    }
}

impl FromStr for SessionToken {
    type Err = SessionTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (uuid, secret) = token
            .strip_prefix(SESSION_TOKEN_PREFIX)
            .and_then(|rest| rest.split_once('.'))
            .ok_or(SessionTokenError::InvalidFormat)?;

        let uuid = Uuid::try_parse(uuid).map_err(|_ignored| SessionTokenError::InvalidFormat)?;

        let decoded = Zeroizing::new(
            URL_SAFE_NO_PAD
                .decode(secret)
                .map_err(|_ignored| SessionTokenError::InvalidSecretEncoding)?,
        );

        let secret = <[u8; SECRET_BYTES]>::try_from(decoded.as_slice())
            .map_err(|_ignored| SessionTokenError::InvalidSecretEncoding)?;

        Ok(Self {
            uuid,
            secret: Zeroizing::new(secret),
        })
    }
}
