pub mod chat_service;
pub mod error;
pub mod project_service;
pub mod user_service;

#[cfg(test)]
pub mod fixtures;
