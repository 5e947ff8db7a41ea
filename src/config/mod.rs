//! Configuration loading

mod user_config;

pub use user_config::UserConfig;
