//! Status command implementation.

use anyhow::{Context as _, Result};

use natter_core::storage::TOKEN_KEY;

use crate::commands::Context;
use crate::output;

pub fn run(ctx: &Context) -> Result<()> {
    let data = ctx.state.read().context("Failed to read state file")?;

    output::field("API", ctx.client.api().as_str());
    output::field("Auth", ctx.policy.as_str());
    output::field("State", &ctx.state.path().display().to_string());
    let token = if data.storage.contains_key(TOKEN_KEY) {
        "stored"
    } else {
        "none"
    };
    output::field("Token", token);
    let cookies = data.cookies.names();
    let cookies = if cookies.is_empty() {
        "none".to_string()
    } else {
        cookies.join(", ")
    };
    output::field("Cookies", &cookies);
    Ok(())
}
