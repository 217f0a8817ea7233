//! Gradient swatch previews of palettes.

use crate::{CptError, Palette, Result};
use image::{ImageBuffer, Rgb as Pixel, RgbImage};
use std::path::Path;

/// Default swatch width in pixels.
pub const DEFAULT_SWATCH_WIDTH: u32 = 512;
/// Default swatch height in pixels.
pub const DEFAULT_SWATCH_HEIGHT: u32 = 48;

/// Render a horizontal gradient covering the palette's value range, low
/// values on the left.
pub fn render_swatch(palette: &Palette, width: u32, height: u32) -> Result<RgbImage> {
    let (lo, hi) = palette.z_range().ok_or(CptError::Empty)?;
    let width = width.max(1);
    let height = height.max(1);

    let columns: Vec<[u8; 3]> = (0..width)
        .map(|x| {
            let t = if width == 1 {
                0.0
            } else {
                x as f64 / (width - 1) as f64
            };
            palette.color_at(lo + t * (hi - lo)).to_array()
        })
        .collect();

    Ok(ImageBuffer::from_fn(width, height, |x, _| {
        Pixel(columns[x as usize])
    }))
}

/// Render a swatch and save it as PNG.
pub fn write_swatch<P: AsRef<Path>>(palette: &Palette, path: P, width: u32, height: u32) -> Result<()> {
    let img = render_swatch(palette, width, height)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    fn black_to_white() -> Palette {
        "0 0 0 0 100 255 255 255\n".parse().unwrap()
    }

    #[test]
    fn test_swatch_runs_low_to_high() {
        let img = render_swatch(&black_to_white(), 11, 3).unwrap();
        assert_eq!(img.dimensions(), (11, 3));
        assert_eq!(img.get_pixel(0, 0).0, Rgb::BLACK.to_array());
        assert_eq!(img.get_pixel(10, 2).0, Rgb::WHITE.to_array());
        assert_eq!(img.get_pixel(5, 1).0, [128, 128, 128]);
    }

    #[test]
    fn test_write_swatch_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        write_swatch(&black_to_white(), &path, 64, 8).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
