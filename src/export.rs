//! PNG/SVG exports, data URLs and file naming
//!
//! Exported files are named after the sprite token: `<Token>.png`,
//! `<Token>.svg`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use log::debug;
use thiserror::Error;

use crate::bitgrid::{Sprite, HEIGHT, WIDTH};
use crate::codec::encode;
use crate::renderer::{paint_raster, render_raster, render_svg, Theme};

/// Largest accepted export scale
pub const MAX_SCALE: u32 = 64;

/// Error type for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Scale factor outside `1..=MAX_SCALE`
    #[error("scale {scale} must be between 1 and {max}")]
    Scale { scale: u32, max: u32 },
}

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// File name for an exported sprite: `<Token>.<ext>`.
///
/// ```
/// use sprite5::bitgrid::Sprite;
/// use sprite5::export::file_name;
///
/// assert_eq!(file_name(Sprite::from_bits_truncate(0x1F), "png"), "0x1F.png");
/// ```
pub fn file_name(sprite: Sprite, ext: &str) -> String {
    format!("{}.{}", encode(sprite), ext)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// The factor is clamped to [`MAX_SCALE`].
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    let factor = factor.min(MAX_SCALE);
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w.saturating_mul(factor), h.saturating_mul(factor), FilterType::Nearest)
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
    Ok(png)
}

/// Render a sprite straight to PNG bytes at the given scale.
pub fn png_bytes(sprite: Sprite, theme: Theme, scale: u32) -> Result<Vec<u8>, ExportError> {
    if scale == 0 || scale > MAX_SCALE {
        return Err(ExportError::Scale { scale, max: MAX_SCALE });
    }
    encode_png(&scale_image(render_raster(sprite, theme), scale))
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// `data:image/png;base64,...` for a sprite at native size.
pub fn png_data_url(sprite: Sprite, theme: Theme) -> Result<String, ExportError> {
    Ok(data_url("image/png", &png_bytes(sprite, theme, 1)?))
}

/// `data:image/svg+xml;base64,...` of the sprite's SVG, for use as a favicon.
pub fn favicon_data_url(sprite: Sprite, theme: Theme) -> String {
    data_url("image/svg+xml", render_svg(sprite, theme).as_bytes())
}

/// A single reusable 5x5 surface for producing many data URLs.
///
/// Each call holds the lock across clear, paint and encode, so concurrent
/// callers never read each other's partial paint.
#[derive(Debug)]
pub struct ScratchSurface {
    surface: Mutex<RgbaImage>,
}

impl ScratchSurface {
    pub fn new() -> Self {
        Self {
            surface: Mutex::new(RgbaImage::new(WIDTH, HEIGHT)),
        }
    }

    pub fn data_url(&self, sprite: Sprite, theme: Theme) -> Result<String, ExportError> {
        // A poisoned surface is still usable; it is cleared before painting
        let mut surface = self.surface.lock().unwrap_or_else(|e| e.into_inner());
        for pixel in surface.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        paint_raster(&mut surface, sprite, theme);
        let png = encode_png(&surface)?;
        Ok(data_url("image/png", &png))
    }
}

impl Default for ScratchSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Write `<Token>.png` into `dir`, creating it if needed.
pub fn save_png(sprite: Sprite, theme: Theme, scale: u32, dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join(file_name(sprite, ExportFormat::Png.extension()));
    fs::write(&path, png_bytes(sprite, theme, scale)?)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Write `<Token>.svg` into `dir`, creating it if needed.
pub fn save_svg(sprite: Sprite, theme: Theme, dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join(file_name(sprite, ExportFormat::Svg.extension()));
    fs::write(&path, render_svg(sprite, theme))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Export a sprite in the given format.
pub fn save(sprite: Sprite, format: ExportFormat, theme: Theme, scale: u32, dir: &Path) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Png => save_png(sprite, theme, scale, dir),
        ExportFormat::Svg => save_svg(sprite, theme, dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use std::sync::Arc;
    use std::thread;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn test_file_name_uses_token() {
        assert_eq!(file_name(decode("0x112A2A1"), "svg"), "0x112A2A1.svg");
        assert_eq!(file_name(Sprite::EMPTY, "png"), "0x0.png");
    }

    #[test]
    fn test_png_bytes_magic() {
        let png = png_bytes(decode("0x1F"), Theme::Light, 1).unwrap();
        assert_eq!(&png[..4], &PNG_MAGIC);
    }

    #[test]
    fn test_png_decodes_back_to_raster() {
        let sprite = decode("0x112A2A1");
        let png = png_bytes(sprite, Theme::Dark, 1).unwrap();
        let loaded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(loaded, render_raster(sprite, Theme::Dark));
    }

    #[test]
    fn test_png_scaled() {
        let png = png_bytes(decode("0x1"), Theme::Light, 4).unwrap();
        let loaded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (20, 20));
        assert_eq!(loaded.get_pixel(3, 3)[3], 255);
        assert_eq!(loaded.get_pixel(4, 0)[3], 0);
    }

    #[test]
    fn test_data_url_prefixes() {
        let sprite = decode("0x1F");
        assert!(png_data_url(sprite, Theme::Light).unwrap().starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert!(favicon_data_url(sprite, Theme::Dark).starts_with("data:image/svg+xml;base64,PHN2Zy"));
    }

    #[test]
    fn test_favicon_encodes_svg() {
        let sprite = decode("0x1F");
        let url = favicon_data_url(sprite, Theme::Light);
        let payload = url.trim_start_matches("data:image/svg+xml;base64,");
        let svg = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(svg).unwrap(), render_svg(sprite, Theme::Light));
    }

    #[test]
    fn test_scratch_matches_fresh_render() {
        let scratch = ScratchSurface::new();
        let first = decode("0x1FFFFFF");
        let second = decode("0x1");
        scratch.data_url(first, Theme::Light).unwrap();
        // Nothing from the first paint may leak into the second
        assert_eq!(scratch.data_url(second, Theme::Light).unwrap(), png_data_url(second, Theme::Light).unwrap());
    }

    #[test]
    fn test_scratch_concurrent_callers() {
        let scratch = Arc::new(ScratchSurface::new());
        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let scratch = Arc::clone(&scratch);
                thread::spawn(move || {
                    let sprite = Sprite::from_bits_truncate(i * 0x10_1010 + 1);
                    let url = scratch.data_url(sprite, Theme::Dark).unwrap();
                    (url, png_data_url(sprite, Theme::Dark).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (shared, fresh) = handle.join().unwrap();
            assert_eq!(shared, fresh);
        }
    }

    #[test]
    fn test_save_creates_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let sprite = decode("0x112A2A1");

        let png = save(sprite, ExportFormat::Png, Theme::Light, 2, &out).unwrap();
        let svg = save(sprite, ExportFormat::Svg, Theme::Light, 1, &out).unwrap();

        assert_eq!(png, out.join("0x112A2A1.png"));
        assert_eq!(svg, out.join("0x112A2A1.svg"));
        assert_eq!(fs::read_to_string(&svg).unwrap(), render_svg(sprite, Theme::Light));
        let loaded = image::open(&png).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (10, 10));
    }

    #[test]
    fn test_scale_image_factor_one_returns_original() {
        let image = render_raster(decode("0x1"), Theme::Light);
        let scaled = scale_image(image.clone(), 1);
        assert_eq!(scaled, image);
    }

    #[test]
    fn test_scale_image_clamps_factor() {
        let image = render_raster(decode("0x1"), Theme::Light);
        let scaled = scale_image(image, u32::MAX);
        assert_eq!(scaled.dimensions(), (WIDTH * MAX_SCALE, HEIGHT * MAX_SCALE));
    }

    #[test]
    fn test_png_bytes_rejects_out_of_range_scale() {
        for scale in [0, MAX_SCALE + 1, u32::MAX] {
            let err = png_bytes(decode("0x1"), Theme::Light, scale).unwrap_err();
            assert!(matches!(err, ExportError::Scale { .. }), "scale {}: {}", scale, err);
        }
        assert!(png_bytes(decode("0x1"), Theme::Light, MAX_SCALE).is_ok());
    }

    #[test]
    fn test_save_png_rejects_bad_scale_without_writing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(save_png(decode("0x1"), Theme::Light, 0, dir.path()).is_err());
        assert!(!dir.path().join("0x1.png").exists());
    }
}
