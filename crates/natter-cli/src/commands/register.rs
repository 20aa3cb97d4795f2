//! Register command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::{Credentials, Sessions};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username, letters and digits only
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "NATTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let credentials = Credentials::new(args.username, args.password);
    let user = ctx
        .sessions()
        .register(credentials)
        .await
        .context("Failed to register user")?;

    output::success("User registered");
    output::field("Username", &user.username);
    Ok(())
}
