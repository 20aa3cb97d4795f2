//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use natter_core::AuthPolicy;

use crate::commands::{
    add_member::AddMemberArgs, create_space::CreateSpaceArgs, list_messages::ListMessagesArgs,
    list_spaces::ListSpacesArgs, login::LoginArgs, post_message::PostMessageArgs,
    read_message::ReadMessageArgs, register::RegisterArgs,
};

/// Natter spaces client.
#[derive(Parser, Debug)]
#[command(name = "natter")]
#[command(author, version = env!("NATTER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Natter API base URL
    #[arg(
        long,
        env = "NATTER_API_URL",
        default_value = "https://localhost:4567",
        global = true
    )]
    pub api_url: String,

    /// How requests prove who sent them: cookie, csrf or bearer
    #[arg(long, env = "NATTER_AUTH", default_value = "bearer", global = true)]
    pub auth: AuthPolicy,

    /// Directory holding the token and cookie state
    #[arg(long, env = "NATTER_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, global = true)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session cookie and bearer token
    Login(LoginArgs),

    /// End the session and forget stored credentials
    Logout,

    /// Register a new user
    Register(RegisterArgs),

    /// Create a new space
    CreateSpace(CreateSpaceArgs),

    /// List spaces
    ListSpaces(ListSpacesArgs),

    /// Post a message to a space
    PostMessage(PostMessageArgs),

    /// List the messages in a space
    ListMessages(ListMessagesArgs),

    /// Show one message
    ReadMessage(ReadMessageArgs),

    /// Grant a user access to a space
    AddMember(AddMemberArgs),

    /// Show the stored client state
    Status,
}
