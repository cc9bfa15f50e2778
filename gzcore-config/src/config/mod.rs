//! Configuration management.
//!
//! # Sub-modules
//!
//! - [`config_struct`]: Core `Config` struct, its `Default` impl, section access
//! - [`persistence`]: `impl Config` methods for load/save/path-resolution

pub mod config_struct;
pub mod persistence;

pub use config_struct::Config;
