pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod meals;
pub mod memory;
pub mod metrics;
pub mod state;
pub mod users;
