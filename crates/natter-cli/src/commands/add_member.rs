//! Add-member command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use natter_core::{AddMemberRequest, Permissions, Spaces};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct AddMemberArgs {
    /// Space to grant access to
    pub space_id: u64,

    /// User to add
    pub username: String,

    /// Any of r (read), w (write) and d (delete), in that order
    #[arg(long, short, default_value = "r")]
    pub permissions: Permissions,
}

pub async fn run(ctx: &Context, args: AddMemberArgs) -> Result<()> {
    let member = AddMemberRequest::new(args.username, args.permissions)
        .context("Invalid member")?;
    let added = ctx
        .spaces()
        .add_member(args.space_id, &member)
        .await
        .context("Failed to add member")?;

    output::success("Member added");
    output::field("User", &added.username);
    output::field("Permissions", &added.permissions);
    Ok(())
}
