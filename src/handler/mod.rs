pub mod auth;
pub mod bids;
pub mod chats;
pub mod extract;
pub mod messages;
pub mod projects;
