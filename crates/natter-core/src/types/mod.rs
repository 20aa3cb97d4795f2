//! Validated Natter types.

mod api_url;
mod space;

pub use api_url::ApiUrl;
pub(crate) use space::RegisterUserRequest;
pub use space::{
    AddMemberRequest, MAX_MESSAGE_LEN, MAX_SPACE_NAME_LEN, MAX_USERNAME_LEN, MessageRequest,
    Permissions, SpaceRequest,
};
