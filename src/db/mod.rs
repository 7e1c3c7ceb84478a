pub mod blogdb;
pub mod chatdb;
pub mod db;
pub mod reviewdb;
pub mod ticketdb;
pub mod userdb;

#[cfg(test)]
pub mod memory;
