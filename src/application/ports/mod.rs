// src/application/ports/mod.rs
pub mod cache;
pub mod files;
pub mod time;
