//! Core traits for the session and spaces APIs.

mod sessions;
mod spaces;

pub use sessions::Sessions;
pub use spaces::Spaces;
