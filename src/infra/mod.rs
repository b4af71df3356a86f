pub mod app;
pub mod config;
pub mod error;
pub mod key_material;
pub mod setup;
