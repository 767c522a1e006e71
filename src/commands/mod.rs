//! Command implementations for the mcinstall CLI

pub mod completions;
pub mod provision;
pub mod show_config;
