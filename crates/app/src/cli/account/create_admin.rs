use clap::Args;
use marketplace_app::{
    auth::hash_password,
    database::{self, Db},
    domain::accounts::{AccountsService, PgAccountsService, data::NewAccount},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    #[arg(long)]
    email: String,

    /// Plain-text password; stored as an Argon2id hash
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    phone: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let password_hash =
        hash_password(&args.password).map_err(|error| format!("invalid password: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(Db::new(pool));

    let account = service
        .create_admin(NewAccount {
            email: args.email.trim().to_lowercase(),
            password_hash,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            address: None,
            street: None,
            state: None,
            country: None,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_id: {}", account.id);
    println!("email: {}", account.email);
    println!("role: {}", account.role);

    Ok(())
}
