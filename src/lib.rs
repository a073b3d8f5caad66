pub mod actors;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod pagination;
pub mod render;
pub mod state;
pub mod types;
