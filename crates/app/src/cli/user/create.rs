use bazaar_app::auth::{NewUser, Role, UserUuid};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    Store,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Self::Admin,
            RoleArg::Store => Self::Store,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Database connection string (`postgres://...` or `sqlite:...`)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    #[arg(long, value_enum)]
    role: RoleArg,

    /// Also issue an API token for the new user
    #[arg(long)]
    with_token: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let ctx = super::super::connect(&args.database_url).await?;

    let user = ctx
        .auth
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            role: args.role.into(),
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("user_role: {}", user.role);

    if args.with_token {
        let issued = ctx
            .auth
            .issue_api_token(user.uuid)
            .await
            .map_err(|error| format!("failed to create token: {error}"))?;

        println!("token_uuid: {}", issued.metadata.uuid);
        println!("api_token: {}", issued.token);
        println!("store this token now; it is only shown once");
    }

    Ok(())
}
