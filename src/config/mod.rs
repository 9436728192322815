//! Configuration for the sprite5 command-line tool
//!
//! Provides types and loading for `sprite5.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
