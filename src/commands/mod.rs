//! CLI command implementations for docprune.
//!
//! Available commands:
//! - **fix**: Remove redundant PHPDoc annotations from PHP files
//! - **init**: Initialize a new docprune configuration file

pub mod fix;
pub mod init;

pub use fix::{handle_fix, run_fix, FixConfig};
pub use init::init_config;
