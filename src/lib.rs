pub mod config;
pub mod handlers;
pub mod libraries;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
