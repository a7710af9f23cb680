// Library exports for the NX tool setup plugin

pub mod bootstrap;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod logs;
pub mod plugin;
