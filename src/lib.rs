//! Azul rules engine and Monte Carlo Tree Search
//!
//! This crate re-exports the engine and search crates for convenience and
//! holds the terminal rendering shared by the binaries.

pub mod display;

pub use azul_engine::*;
pub use azul_search as search;
