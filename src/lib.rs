pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod identifier;
pub mod models;
pub mod sheets;
