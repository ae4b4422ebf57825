// src/format/mod.rs
mod bytes;

pub use bytes::format_bytes;
