//! List-messages command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::{Message, Spaces};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListMessagesArgs {
    /// Space to read from
    pub space_id: u64,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: ListMessagesArgs) -> Result<()> {
    let messages = ctx
        .spaces()
        .list_messages(args.space_id)
        .await
        .context("Failed to list messages")?;

    for message in &messages {
        if args.json {
            output::json(message)?;
        } else {
            println!("{}", line(message));
        }
    }
    if messages.is_empty() && !args.json {
        output::error("No messages");
    }
    Ok(())
}

/// One tab-separated line: id, time, author, text.
pub(crate) fn line(message: &Message) -> String {
    let time = message
        .msg_time
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}\t{}\t{}\t{}",
        message.msg_id, time, message.author, message.msg_text
    )
}
