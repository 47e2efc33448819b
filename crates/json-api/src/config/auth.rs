//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a session token stays valid; 0 disables expiry
    #[arg(long, env = "SESSION_TOKEN_TTL_HOURS", default_value_t = 24_u32)]
    pub session_token_ttl_hours: u32,
}
