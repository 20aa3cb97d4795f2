//! Spaces resource trait.

use async_trait::async_trait;

use crate::Result;
use crate::model::{MemberAdded, Message, MessageCreated, SpaceCreated, SpaceSummary};
use crate::provider::AuthPolicy;
use crate::types::{AddMemberRequest, MessageRequest, SpaceRequest};

/// Authenticated operations on the spaces resource.
#[async_trait]
pub trait Spaces: Send + Sync {
    /// The credential policy requests are sent under.
    fn policy(&self) -> AuthPolicy;

    /// Create a new space.
    async fn create_space(&self, request: &SpaceRequest) -> Result<SpaceCreated>;

    /// List all spaces.
    async fn list_spaces(&self) -> Result<Vec<SpaceSummary>>;

    /// Post a message to a space.
    async fn post_message(
        &self,
        space_id: u64,
        message: &MessageRequest,
    ) -> Result<MessageCreated>;

    /// All messages in a space.
    async fn list_messages(&self, space_id: u64) -> Result<Vec<Message>>;

    /// One message by id.
    async fn read_message(&self, space_id: u64, msg_id: u64) -> Result<Message>;

    /// Grant a user access to a space.
    async fn add_member(&self, space_id: u64, member: &AddMemberRequest) -> Result<MemberAdded>;
}
