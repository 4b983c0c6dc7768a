pub mod arguments;
pub mod config;
pub mod errors;
pub mod global;
pub mod logger;
pub mod membership;
pub mod run;
pub mod store;
pub mod telegram;
pub mod webserver;
