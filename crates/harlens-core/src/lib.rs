pub mod analyzer;
pub mod config;
pub mod error;
pub mod har;
pub mod knowledge;
pub mod logging;
pub mod validate;
