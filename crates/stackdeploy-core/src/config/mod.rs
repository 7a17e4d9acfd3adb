//! Configuration for stackdeploy.
//!
//! A single `stackdeploy.toml` names the engines (`[endpoints.*]`) and the
//! stacks deployed onto them (`[stacks.*]`).

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_config, parse_config_str, to_toml};
pub use paths::{CONFIG_FILE_NAME, default_config_path};
pub use schema::{StackDeployConfig, StackEntry};
pub use store::ConfigStore;
