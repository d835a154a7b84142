use clap::Args;
use serde_json::json;

use crate::auth::TokenManager;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Id of the user the token is issued for, e.g. user-123
    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub username: String,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let tokens = TokenManager::from_config(&config().security);
    let access_token = tokens.create_access_token(&args.user_id, &args.username)?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "accessToken": access_token })),
        OutputFormat::Text => println!("{}", access_token),
    }
    Ok(())
}
