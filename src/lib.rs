pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod testing;
