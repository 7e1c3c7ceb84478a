pub mod blogs;
pub mod chat;
pub mod reviews;
pub mod tickets;
pub mod users;
