//! Post-message command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::{MessageRequest, Spaces};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct PostMessageArgs {
    /// Space to post to
    pub space_id: u64,

    /// Message text
    pub message: String,

    /// Username of the author
    #[arg(long)]
    pub author: String,
}

pub async fn run(ctx: &Context, args: PostMessageArgs) -> Result<()> {
    let message = MessageRequest::new(args.author, args.message).context("Invalid message")?;
    let created = ctx
        .spaces()
        .post_message(args.space_id, &message)
        .await
        .context("Failed to post message")?;

    output::success("Message posted");
    output::field("URI", &created.uri);
    Ok(())
}
