pub mod account;
pub mod auth;
pub mod booth;
pub mod dashboard;
pub mod init;
