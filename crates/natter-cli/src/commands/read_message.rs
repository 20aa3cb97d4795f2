//! Read-message command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::Spaces;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ReadMessageArgs {
    /// Space holding the message
    pub space_id: u64,

    /// Message id
    pub msg_id: u64,

    /// Print the message as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: ReadMessageArgs) -> Result<()> {
    let message = ctx
        .spaces()
        .read_message(args.space_id, args.msg_id)
        .await
        .context("Failed to read message")?;

    if args.json {
        return output::json(&message);
    }

    output::field("URI", &message.path());
    output::field("Author", &message.author);
    if let Some(time) = message.msg_time {
        output::field("Time", &time.to_rfc3339());
    }
    println!();
    println!("{}", message.msg_text);
    Ok(())
}
