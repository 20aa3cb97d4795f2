//! Subcommand implementations.

pub mod add_member;
pub mod create_space;
pub mod list_messages;
pub mod list_spaces;
pub mod login;
mod logout;
pub mod post_message;
pub mod read_message;
pub mod register;
mod status;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use tracing::debug;

use natter_core::cookie::CookieJar;
use natter_core::storage::TokenStore;
use natter_core::{ApiUrl, AuthPolicy, CredentialProvider};
use natter_file::{FileCookieJar, FileTokenStore, StateFile};
use natter_http::{ApiClient, ClientConfig, HttpSessions, HttpSpaces};

use crate::cli::{Cli, Commands};
use crate::state;

/// Everything a command needs to talk to the API.
pub struct Context {
    pub policy: AuthPolicy,
    pub state: StateFile,
    pub client: ApiClient,
    pub storage: Arc<dyn TokenStore>,
}

impl Context {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let api = ApiUrl::new(&cli.api_url).context("Invalid API URL")?;
        let state = state::open(cli.state_dir.as_deref())?;

        let jar: Arc<dyn CookieJar> = Arc::new(FileCookieJar::from_state(state.clone()));
        let storage: Arc<dyn TokenStore> = Arc::new(FileTokenStore::from_state(state.clone()));

        let mut config = ClientConfig::new(api).accept_invalid_certs(cli.insecure);
        if let Some(secs) = cli.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        let client = ApiClient::new(config, jar).context("Failed to build HTTP client")?;
        debug!(
            api = %client.api(),
            policy = %cli.auth,
            state = %state.path().display(),
            "client ready"
        );

        Ok(Self {
            policy: cli.auth,
            state,
            client,
            storage,
        })
    }

    pub fn sessions(&self) -> HttpSessions {
        HttpSessions::new(self.client.clone(), self.storage.clone(), self.provider())
    }

    pub fn spaces(&self) -> HttpSpaces {
        HttpSpaces::new(self.client.clone(), self.provider())
    }

    fn provider(&self) -> Arc<dyn CredentialProvider> {
        self.policy
            .provider(self.client.jar().clone(), self.storage.clone())
    }
}

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Login(args) => login::run(&ctx, args).await,
        Commands::Logout => logout::run(&ctx).await,
        Commands::Register(args) => register::run(&ctx, args).await,
        Commands::CreateSpace(args) => create_space::run(&ctx, args).await,
        Commands::ListSpaces(args) => list_spaces::run(&ctx, args).await,
        Commands::PostMessage(args) => post_message::run(&ctx, args).await,
        Commands::ListMessages(args) => list_messages::run(&ctx, args).await,
        Commands::ReadMessage(args) => read_message::run(&ctx, args).await,
        Commands::AddMember(args) => add_member::run(&ctx, args).await,
        Commands::Status => status::run(&ctx),
    }
}
