//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use natter_core::{Status, Tone};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a form status in its tone's colour.
pub fn status(status: &Status) {
    match status.tone {
        Tone::Success => println!("{}", status.message.green()),
        Tone::Error => eprintln!("{}", status.message.red()),
    }
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}
