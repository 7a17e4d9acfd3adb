//! Stackdeploy Core Library
//!
//! Drives the `docker stack` command-line tool to deploy and remove
//! compose-defined stacks on local or remote engines.

pub mod command;
pub mod config;
pub mod error;
pub mod manager;
pub mod platform;
pub mod runner;
pub mod types;
