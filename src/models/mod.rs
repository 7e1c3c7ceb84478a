pub mod blogmodel;
pub mod chatmodels;
pub mod reviewmodel;
pub mod ticketmodel;
pub mod usermodel;
