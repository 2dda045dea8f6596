#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OfferArgs, OutputFormat, ReplyArgs};
pub use toml_config::TomlConfig;
