use bazaar_app::auth::UserUuid;
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Database connection string (`postgres://...` or `sqlite:...`)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User that should own the token
    #[arg(long)]
    user: UserUuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let ctx = super::super::connect(&args.database_url).await?;

    let issued = ctx
        .auth
        .issue_api_token(args.user)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user);
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
