// src/lib.rs
pub mod checks;
pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod scheduler;
