//! Export: rasterizes the current view into an encoded image.
//!
//! This is a "what you see" capture. The scene is drawn under the live
//! viewport transform at the surface's device resolution, in paint order:
//! background, grid lines, then each visual's filled square with an outline.
//! Label glyphs are left to the host's text renderer and are not rasterized.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::color::{BACKGROUND, Color, GRID_LINE};
use crate::consts::{EXPORT_OUTLINE_PX, MAX_EXPORT_DIMENSION};
use crate::scene::Scene;
use crate::viewport::{Point, Viewport};

/// Outline darkening relative to the fill.
const OUTLINE_DARKEN: f64 = 0.35;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// An encoded image ready for download.
#[derive(Debug, Clone)]
pub struct ImageBlob {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The surface rounds to zero device pixels in at least one dimension.
    #[error("render surface has zero area ({width}x{height} device pixels)")]
    EmptySurface { width: u32, height: u32 },

    /// The surface exceeds [`MAX_EXPORT_DIMENSION`] device pixels on a side.
    #[error("render surface too large to export ({width}x{height} device pixels, max {max} per side)", max = MAX_EXPORT_DIMENSION)]
    SurfaceTooLarge { width: u32, height: u32 },

    /// The encoder rejected the image.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Host surface dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Surface {
    /// Backing-store size in device pixels.
    #[must_use]
    pub fn device_size(&self) -> (u32, u32) {
        (to_px(self.width * self.dpr, u32::MAX), to_px(self.height * self.dpr, u32::MAX))
    }
}

/// Draw the scene as currently viewed.
///
/// # Errors
///
/// Returns [`ExportError::EmptySurface`] if the surface has no device pixels,
/// or [`ExportError::SurfaceTooLarge`] if a side exceeds [`MAX_EXPORT_DIMENSION`].
pub fn rasterize(scene: &Scene, viewport: &Viewport, surface: &Surface) -> Result<RgbaImage, ExportError> {
    let (width, height) = surface.device_size();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySurface { width, height });
    }
    if width > MAX_EXPORT_DIMENSION || height > MAX_EXPORT_DIMENSION {
        return Err(ExportError::SurfaceTooLarge { width, height });
    }
    let mut img = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND.to_rgba()));
    let to_device = |p: Point| {
        let s = viewport.world_to_screen(p);
        Point::new(s.x * surface.dpr, s.y * surface.dpr)
    };

    for line in scene.grid_lines() {
        let a = to_device(line.from);
        let b = to_device(line.to);
        fill_rect(&mut img, a.x.min(b.x) - 0.5, a.y.min(b.y) - 0.5, a.x.max(b.x) + 0.5, a.y.max(b.y) + 0.5, GRID_LINE);
    }

    let outline = f64::from(EXPORT_OUTLINE_PX);
    for visual in scene.visuals() {
        let bounds = visual.bounds();
        let tl = to_device(Point::new(bounds.min_x, bounds.min_y));
        let br = to_device(Point::new(bounds.max_x, bounds.max_y));
        fill_rect(&mut img, tl.x, tl.y, br.x, br.y, visual.fill);

        let stroke = visual.fill.darken(OUTLINE_DARKEN);
        fill_rect(&mut img, tl.x, tl.y, br.x, tl.y + outline, stroke);
        fill_rect(&mut img, tl.x, br.y - outline, br.x, br.y, stroke);
        fill_rect(&mut img, tl.x, tl.y, tl.x + outline, br.y, stroke);
        fill_rect(&mut img, br.x - outline, tl.y, br.x, br.y, stroke);
    }

    Ok(img)
}

/// Encode a rasterized image.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder fails.
pub fn encode(img: RgbaImage, format: ExportFormat) -> Result<ImageBlob, ExportError> {
    let (width, height) = img.dimensions();
    let image = match format {
        ExportFormat::Png => DynamicImage::ImageRgba8(img),
        // JPEG has no alpha channel.
        ExportFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
    };
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format.image_format())?;
    Ok(ImageBlob { format, width, height, bytes: bytes.into_inner() })
}

/// Rasterize and encode in one step.
///
/// # Errors
///
/// Propagates [`rasterize`] and [`encode`] failures.
pub fn export(
    scene: &Scene,
    viewport: &Viewport,
    surface: &Surface,
    format: ExportFormat,
) -> Result<ImageBlob, ExportError> {
    encode(rasterize(scene, viewport, surface)?, format)
}

/// Fill the device-pixel rectangle `[x0, x1) × [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbaImage, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
    let (w, h) = img.dimensions();
    let (xs, xe) = (to_px(x0.floor(), w), to_px(x1.ceil(), w));
    let (ys, ye) = (to_px(y0.floor(), h), to_px(y1.ceil(), h));
    let px = Rgba(color.to_rgba());
    for y in ys..ye {
        for x in xs..xe {
            img.put_pixel(x, y, px);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64, limit: u32) -> u32 {
    v.round().clamp(0.0, f64::from(limit)) as u32
}
