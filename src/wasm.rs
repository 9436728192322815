//! WASM API module for browser/JS interop
//!
//! Exposes the sprite core to a browser front end. Tokens cross the
//! boundary as strings; raw bitmasks as `u32`.

use wasm_bindgen::prelude::*;

use crate::bitgrid::Sprite;
use crate::codec;
use crate::renderer::{render_raster, render_svg as svg, Theme};
use crate::session::{Bounds, EditSession, Mode, PointerEvent, PointerKind};
use crate::store::{Origin, SpriteCollection};
use crate::transforms;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Encode a bitmask as a `0x` token.
#[wasm_bindgen]
pub fn encode(bits: u32) -> String {
    codec::encode(Sprite::from_bits_truncate(bits))
}

/// Decode a token; anything unreadable is 0.
#[wasm_bindgen]
pub fn decode(token: &str) -> u32 {
    codec::decode(token).bits()
}

#[wasm_bindgen]
pub fn invert(bits: u32) -> u32 {
    transforms::invert(Sprite::from_bits_truncate(bits)).bits()
}

#[wasm_bindgen]
pub fn flip(bits: u32, horizontal: bool) -> u32 {
    transforms::flip(Sprite::from_bits_truncate(bits), horizontal).bits()
}

/// `count` random sprites, each followed by its inverse.
#[wasm_bindgen]
pub fn random_sprites(count: usize) -> Vec<u32> {
    transforms::generate_random_sprites(count, &mut rand::rng())
        .into_iter()
        .map(Sprite::bits)
        .collect()
}

/// Raw 5x5 RGBA pixels (100 bytes) for an `ImageData`.
#[wasm_bindgen]
pub fn render_rgba(bits: u32, dark_mode: bool) -> Vec<u8> {
    render_raster(Sprite::from_bits_truncate(bits), Theme::from_dark_mode(dark_mode)).into_raw()
}

/// SVG document for a sprite.
#[wasm_bindgen]
pub fn render_svg(bits: u32, dark_mode: bool) -> String {
    svg(Sprite::from_bits_truncate(bits), Theme::from_dark_mode(dark_mode))
}

/// Apply the commit rules to a persisted collection string.
///
/// `original` of 0 means a new sprite. Returns the new persisted string.
#[wasm_bindgen]
pub fn commit_tokens(saved: &str, original: u32, working: u32) -> String {
    let mut collection = SpriteCollection::from_persisted(saved);
    collection.commit(
        Origin::from_sprite(Sprite::from_bits_truncate(original)),
        Sprite::from_bits_truncate(working),
    );
    collection.to_persisted()
}

/// Pointer-driven edit session for a canvas element.
#[wasm_bindgen]
pub struct WasmSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(token: &str) -> WasmSession {
        WasmSession {
            inner: EditSession::open(codec::decode(token)),
        }
    }

    /// Feed a pointer event. `kind` is one of "down", "move", "up", "leave";
    /// unknown kinds are ignored. Returns the working bitmask.
    pub fn pointer(&mut self, kind: &str, x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) -> u32 {
        let kind = match kind {
            "down" => PointerKind::Down,
            "move" => PointerKind::Move,
            "up" => PointerKind::Up,
            "leave" => PointerKind::Leave,
            _ => return self.inner.working().bits(),
        };
        let bounds = Bounds::new(left, top, width, height);
        self.inner.handle(PointerEvent::new(kind, x, y), &bounds).bits()
    }

    #[wasm_bindgen(getter)]
    pub fn working(&self) -> u32 {
        self.inner.working().bits()
    }

    /// Original bitmask, 0 for a new sprite
    #[wasm_bindgen(getter)]
    pub fn original(&self) -> u32 {
        self.inner.original().sprite().map(Sprite::bits).unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        match self.inner.mode() {
            Mode::Idle => "idle",
            Mode::Drawing => "drawing",
            Mode::Erasing => "erasing",
        }
        .to_string()
    }

    pub fn set_working(&mut self, bits: u32) {
        self.inner.set_working(Sprite::from_bits_truncate(bits));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        assert_eq!(encode(31), "0x1F");
        assert_eq!(decode("0x1F"), 31);
        assert_eq!(decode("bogus"), 0);
    }

    #[test]
    fn test_render_rgba_length() {
        assert_eq!(render_rgba(1, false).len(), 100);
        assert_eq!(&render_rgba(1, true)[..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_commit_tokens() {
        assert_eq!(commit_tokens("0x1,0x2", 1, 0), "0x2");
        assert_eq!(commit_tokens("0x1,0x2", 1, 4), "0x4,0x2");
        assert_eq!(commit_tokens("0x1,0x2", 0, 8), "0x1,0x2,0x8");
    }

    #[test]
    fn test_session_pointer_flow() {
        let mut session = WasmSession::new("");
        session.pointer("down", 1.0, 1.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(session.mode(), "drawing");
        session.pointer("move", 11.0, 1.0, 0.0, 0.0, 50.0, 50.0);
        session.pointer("up", 11.0, 1.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(session.working(), 0b11);
        assert_eq!(session.original(), 0);
    }
}
