//! Sprite rendering: raster alpha mask, vector outline and text preview
//!
//! The raster and vector paths must agree on which cells are painted. Both
//! are pure functions of the sprite and the [`Theme`].

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::bitgrid::{get_bit, Sprite, HEIGHT, WIDTH};

/// Light or dark presentation context.
///
/// In the dark theme every pixel is forced to white so the shape stays
/// visible on a dark background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Color channel value used for every pixel
    fn channel(self) -> u8 {
        match self {
            Theme::Light => 0x00,
            Theme::Dark => 0xFF,
        }
    }
}

/// Alpha of a painted cell
pub const OPAQUE: u8 = 0xFF;

/// Alpha of an empty cell
pub const CLEAR: u8 = 0x00;

/// Render a sprite into a 5x5 RGBA image.
///
/// Alpha is opaque exactly where the sprite has a painted cell.
///
/// # Examples
///
/// ```
/// use sprite5::bitgrid::Sprite;
/// use sprite5::renderer::{render_raster, Theme};
///
/// let image = render_raster(Sprite::EMPTY.with_bit(1, 2, true), Theme::Dark);
/// assert_eq!(image.get_pixel(1, 2).0, [255, 255, 255, 255]);
/// assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 0]);
/// ```
pub fn render_raster(sprite: Sprite, theme: Theme) -> RgbaImage {
    let mut image = RgbaImage::new(WIDTH, HEIGHT);
    paint_raster(&mut image, sprite, theme);
    image
}

/// Paint a sprite onto an existing 5x5 surface, overwriting every pixel.
pub fn paint_raster(image: &mut RgbaImage, sprite: Sprite, theme: Theme) {
    debug_assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    let c = theme.channel();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let alpha = if get_bit(sprite, x, y) { OPAQUE } else { CLEAR };
            image.put_pixel(x, y, Rgba([c, c, c, alpha]));
        }
    }
}

/// One filled 1x1 square of the vector outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSquare {
    pub x: u32,
    pub y: u32,
}

impl std::fmt::Display for UnitSquare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{} {}h1v1H{}z", self.x, self.y, self.x)
    }
}

/// Unit squares for every painted cell, scanned column by column.
pub fn vector_path(sprite: Sprite) -> Vec<UnitSquare> {
    let mut squares = Vec::with_capacity(sprite.count_on() as usize);
    for x in 0..WIDTH {
        for y in 0..HEIGHT {
            if get_bit(sprite, x, y) {
                squares.push(UnitSquare { x, y });
            }
        }
    }
    squares
}

/// Path data string (`d` attribute) for a sprite
pub fn path_data(sprite: Sprite) -> String {
    vector_path(sprite).iter().map(ToString::to_string).collect()
}

/// Render a sprite as a standalone SVG document.
///
/// The view box is the 5x5 grid with crisp edges; the dark theme sets the
/// fill to white, otherwise the default foreground is kept.
pub fn render_svg(sprite: Sprite, theme: Theme) -> String {
    let fill = if theme.is_dark() { r#" fill="white""# } else { "" };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" shape-rendering="crispEdges"{}><path d="{}"/></svg>"#,
        WIDTH,
        HEIGHT,
        fill,
        path_data(sprite)
    )
}

/// Glyph for a painted cell in text previews
pub const TEXT_ON: char = '█';

/// Glyph for an empty cell in text previews
pub const TEXT_OFF: char = '·';

/// Render a sprite as text, one line per row.
pub fn render_text(sprite: Sprite) -> String {
    let mut out = String::with_capacity(((WIDTH + 1) * HEIGHT * 3) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            out.push(if get_bit(sprite, x, y) { TEXT_ON } else { TEXT_OFF });
        }
        out.push('\n');
    }
    out
}
