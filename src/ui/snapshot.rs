use std::path::Path;

use anyhow::{bail, Context, Result};
use eframe::egui::{vec2, ColorImage, Pos2, Rect};

/// Crop a viewport screenshot to `rect` (in points) and write it as PNG.
///
/// The rect is clamped to the screenshot first; `ColorImage::region` does
/// not bounds-check.
pub fn save_png(
    screenshot: &ColorImage,
    rect: Option<Rect>,
    pixels_per_point: f32,
    path: &Path,
) -> Result<()> {
    let image = match rect {
        Some(rect) => {
            let [w, h] = screenshot.size;
            let bounds =
                Rect::from_min_size(Pos2::ZERO, vec2(w as f32, h as f32) / pixels_per_point);
            let crop = rect.intersect(bounds);
            if !crop.is_positive() {
                bail!("plot area {rect:?} is outside the captured window");
            }
            screenshot.region(&crop, Some(pixels_per_point))
        }
        None => screenshot.clone(),
    };

    let [width, height] = image.size;
    if width == 0 || height == 0 {
        bail!("plot area is smaller than one pixel");
    }
    let bytes: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .context("screenshot buffer has the wrong size")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("Saved {width}x{height} plot to {}", path.display());
    Ok(())
}
