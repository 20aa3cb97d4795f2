//! Login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use natter_core::{LoginForm, LoginSubmission};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "NATTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let mut form = LoginForm::new(args.username, args.password);
    match form.submit(&ctx.sessions()).await {
        LoginSubmission::Navigate(landing) => {
            output::success("Logged in successfully");
            println!();
            output::field("User", &form.username);
            output::field("Landing page", landing.as_str());
            Ok(())
        }
        LoginSubmission::Failed(status) => {
            output::status(&status);
            bail!("login failed");
        }
    }
}
