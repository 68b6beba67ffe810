//! Catalyst Dashboard CLI
//!
//! `catalyst-dashboard challenges <command>` runs one report per
//! invocation. Argument parsing lives in [`args`], dispatch in
//! [`commands`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod args;
pub mod commands;
pub mod logging;

// Re-exports for convenience
pub use args::{load_env_file, ApiArgs, ChallengeCommand, Cli, Command};
pub use commands::run;
