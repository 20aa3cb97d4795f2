//! The spaces resource over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use natter_core::model::{MemberAdded, Message, MessageCreated, SpaceCreated, SpaceSummary};
use natter_core::provider::{AuthPolicy, CredentialProvider};
use natter_core::request;
use natter_core::traits::Spaces;
use natter_core::types::{AddMemberRequest, MessageRequest, SpaceRequest};
use natter_core::Result;

use crate::client::ApiClient;

/// Spaces client bound to one credential policy for its whole life.
#[derive(Clone)]
pub struct HttpSpaces {
    client: ApiClient,
    provider: Arc<dyn CredentialProvider>,
}

impl HttpSpaces {
    pub fn new(client: ApiClient, provider: Arc<dyn CredentialProvider>) -> Self {
        Self { client, provider }
    }
}

impl std::fmt::Debug for HttpSpaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSpaces")
            .field("client", &self.client)
            .field("policy", &self.provider.policy())
            .finish()
    }
}

#[async_trait]
impl Spaces for HttpSpaces {
    fn policy(&self) -> AuthPolicy {
        self.provider.policy()
    }

    #[instrument(skip(self), fields(policy = %self.provider.policy()))]
    async fn create_space(&self, input: &SpaceRequest) -> Result<SpaceCreated> {
        let request = request::create_space(self.client.api(), input, self.provider.as_ref())?;
        let created: SpaceCreated = self.client.send_json(request).await?;
        debug!(uri = %created.uri, "space created");
        Ok(created)
    }

    #[instrument(skip(self), fields(policy = %self.provider.policy()))]
    async fn list_spaces(&self) -> Result<Vec<SpaceSummary>> {
        let request = request::list_spaces(self.client.api(), self.provider.as_ref())?;
        self.client.send_json(request).await
    }

    #[instrument(skip(self, message), fields(policy = %self.provider.policy()))]
    async fn post_message(
        &self,
        space_id: u64,
        message: &MessageRequest,
    ) -> Result<MessageCreated> {
        let request =
            request::post_message(self.client.api(), space_id, message, self.provider.as_ref())?;
        self.client.send_json(request).await
    }

    #[instrument(skip(self), fields(policy = %self.provider.policy()))]
    async fn list_messages(&self, space_id: u64) -> Result<Vec<Message>> {
        let request = request::list_messages(self.client.api(), space_id, self.provider.as_ref())?;
        let messages: Vec<Message> = self.client.send_json(request).await?;
        debug!(count = messages.len(), "messages listed");
        Ok(messages
            .into_iter()
            .map(|message| message.with_ids(space_id))
            .collect())
    }

    #[instrument(skip(self), fields(policy = %self.provider.policy()))]
    async fn read_message(&self, space_id: u64, msg_id: u64) -> Result<Message> {
        let request =
            request::read_message(self.client.api(), space_id, msg_id, self.provider.as_ref())?;
        let message: Message = self.client.send_json(request).await?;
        Ok(message.with_ids(space_id))
    }

    #[instrument(skip(self, member), fields(policy = %self.provider.policy(), username = member.username()))]
    async fn add_member(&self, space_id: u64, member: &AddMemberRequest) -> Result<MemberAdded> {
        let request =
            request::add_member(self.client.api(), space_id, member, self.provider.as_ref())?;
        let added: MemberAdded = self.client.send_json(request).await?;
        debug!(username = %added.username, permissions = %added.permissions, "member added");
        Ok(added)
    }
}
