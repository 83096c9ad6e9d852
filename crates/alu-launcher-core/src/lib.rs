pub mod config;
pub mod deps;
pub mod layout;
