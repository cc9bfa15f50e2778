// Library exports for testing and the `gzcore` binary.
//
// The work lives in the sub-crates:
//
//   - `gzcore-config`  : persisted settings and named binding sections
//   - `gzcore-bindings`: key names, binding tables, DEFBINDS, dispatch
//   - `gzcore-render`  : viewport math and fixed-function draw submission
//
// This crate wires them together: console commands, the engine context that
// owns the tables and the command queue, logging, and the CLI.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod console;
pub mod context;

pub use console::{CommandEnv, ConsoleCommand, ConsoleError};
pub use context::{CommandQueue, EngineContext, QueuedOutcome};

pub use gzcore_bindings as bindings;
pub use gzcore_config as config;
pub use gzcore_render as render;
