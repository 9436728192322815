//! sprite5 - Library for painting, sharing and exporting 5x5 sprites
//!
//! This library provides functionality to:
//! - Pack a 5x5 monochrome glyph into a single integer and address its cells
//! - Encode sprites as `0x` hex tokens for links and storage
//! - Flip, invert and randomly generate sprites
//! - Render sprites as RGBA images, SVG documents and data URLs
//! - Keep a saved collection with create/overwrite/delete commit rules
//! - Turn pointer gestures into edits

pub mod bitgrid;
pub mod cli;
pub mod codec;
pub mod config;
pub mod editor;
pub mod export;
pub mod gallery;
pub mod renderer;
pub mod session;
pub mod store;
pub mod transforms;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use bitgrid::Sprite;
