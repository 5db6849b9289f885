// src/lib.rs
pub mod application;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod test_utils;

pub use config::Settings;
