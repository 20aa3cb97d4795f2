//! Create-space command implementation.

use anyhow::{Result, bail};
use clap::Args;

use natter_core::{SpaceForm, Tone};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateSpaceArgs {
    /// Name of the new space
    pub name: String,

    /// Username of the space owner
    #[arg(long)]
    pub owner: String,
}

pub async fn run(ctx: &Context, args: CreateSpaceArgs) -> Result<()> {
    let mut form = SpaceForm::new(args.name, args.owner);
    let status = form.submit(&ctx.spaces()).await;
    output::status(&status);

    if status.tone == Tone::Error {
        bail!("space was not created (run with -v for details)");
    }
    Ok(())
}
