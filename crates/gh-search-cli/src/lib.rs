pub mod config;
pub mod flags;
pub mod github_api;
pub mod render;
pub mod repos;
