use clap::Args;
use marketplace_app::{
    auth::{AuthService, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Raw session token to revoke
    #[arg(long, env = "SESSION_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool, 0);

    let revoked = service
        .revoke_session_token(&args.token)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked session token");
    } else {
        println!("session token was not active");
    }

    Ok(())
}
