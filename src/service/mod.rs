pub mod chat_service;
pub mod error;
pub mod ticket_service;
