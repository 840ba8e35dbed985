//! Command implementations.

pub mod config;
pub mod run;
pub mod segments;

pub use self::config::execute_config;
pub use self::run::{execute_run, process};
pub use self::segments::execute_segments;
