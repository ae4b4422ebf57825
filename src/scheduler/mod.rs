// src/scheduler/mod.rs
mod runner;

pub use runner::{Scheduler, TickReport};
