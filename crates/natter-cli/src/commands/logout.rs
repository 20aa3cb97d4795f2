//! Logout command implementation.

use anyhow::{Context as _, Result};

use natter_core::Sessions;

use crate::commands::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    ctx.sessions().logout().await.context("Failed to log out")?;
    output::success("Logged out");
    Ok(())
}
