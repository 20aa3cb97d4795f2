//! List-spaces command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::Spaces;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListSpacesArgs {
    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: ListSpacesArgs) -> Result<()> {
    let spaces = ctx
        .spaces()
        .list_spaces()
        .await
        .context("Failed to list spaces")?;

    for space in &spaces {
        if args.json {
            output::json(space)?;
        } else {
            println!("{}\t{}\t{}", space.space_id, space.name, space.owner);
        }
    }
    if spaces.is_empty() && !args.json {
        output::error("No spaces");
    }
    Ok(())
}
