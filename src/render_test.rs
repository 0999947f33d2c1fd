use super::*;
use crate::color::{GRID_LINE, UNIT_DEFAULT_FILL};
use crate::doc::{ObjectKind, PlacedObject, UnitId};
use crate::grid::GridPosition;

fn unit_scene() -> Scene {
    let objects = [PlacedObject::new(
        GridPosition::new(0, 0),
        ObjectKind::Unit { name: "U".into(), unit_id: UnitId::Number(1), status: None },
    )];
    Scene::build(&objects, true)
}

fn viewport() -> Viewport {
    // Unit visual x [0,100], y [-100,0] lands at screen x [200,300], y [100,200].
    Viewport { offset_x: 200.0, offset_y: 200.0, scale: 1.0 }
}

fn surface() -> Surface {
    Surface { width: 400.0, height: 300.0, dpr: 1.0 }
}

// =============================================================
// Rasterize
// =============================================================

#[test]
fn rasterize_matches_surface_size() {
    let img = rasterize(&unit_scene(), &viewport(), &surface()).unwrap();
    assert_eq!(img.dimensions(), (400, 300));
}

#[test]
fn rasterize_scales_by_device_pixel_ratio() {
    let s = Surface { dpr: 2.0, ..surface() };
    let img = rasterize(&unit_scene(), &viewport(), &s).unwrap();
    assert_eq!(img.dimensions(), (800, 600));
    assert_eq!(img.get_pixel(520, 320).0, UNIT_DEFAULT_FILL.to_rgba());
}

#[test]
fn rasterize_fills_visual_under_viewport() {
    let img = rasterize(&unit_scene(), &viewport(), &surface()).unwrap();
    assert_eq!(img.get_pixel(260, 160).0, UNIT_DEFAULT_FILL.to_rgba());
}

#[test]
fn rasterize_outlines_visual() {
    let img = rasterize(&unit_scene(), &viewport(), &surface()).unwrap();
    assert_eq!(img.get_pixel(200, 150).0, UNIT_DEFAULT_FILL.darken(OUTLINE_DARKEN).to_rgba());
}

#[test]
fn rasterize_draws_grid_lines() {
    let img = rasterize(&unit_scene(), &viewport(), &surface()).unwrap();
    assert_eq!(img.get_pixel(120, 50).0, GRID_LINE.to_rgba());
}

#[test]
fn rasterize_leaves_background_elsewhere() {
    let img = rasterize(&unit_scene(), &viewport(), &surface()).unwrap();
    assert_eq!(img.get_pixel(10, 290).0, BACKGROUND.to_rgba());
}

#[test]
fn rasterize_follows_pan() {
    let mut vp = viewport();
    vp.pan_by(-150.0, 0.0);
    let img = rasterize(&unit_scene(), &vp, &surface()).unwrap();
    assert_eq!(img.get_pixel(110, 160).0, UNIT_DEFAULT_FILL.to_rgba());
    assert_ne!(img.get_pixel(260, 160).0, UNIT_DEFAULT_FILL.to_rgba());
}

#[test]
fn rasterize_clips_offscreen_content() {
    let vp = Viewport { offset_x: -10_000.0, offset_y: -10_000.0, scale: 4.0 };
    let img = rasterize(&unit_scene(), &vp, &surface()).unwrap();
    assert!(img.pixels().all(|p| p.0 == BACKGROUND.to_rgba()));
}

#[test]
fn rasterize_rejects_empty_surface() {
    let s = Surface { width: 0.0, height: 300.0, dpr: 1.0 };
    let err = rasterize(&unit_scene(), &viewport(), &s).unwrap_err();
    assert!(matches!(err, ExportError::EmptySurface { width: 0, height: 300 }));
}

#[test]
fn rasterize_rejects_oversized_surface() {
    let s = Surface { width: 1e6, height: 1e6, dpr: 2.0 };
    let err = rasterize(&unit_scene(), &viewport(), &s).unwrap_err();
    assert!(matches!(err, ExportError::SurfaceTooLarge { width: 2_000_000, height: 2_000_000 }));
}

#[test]
fn rasterize_rejects_one_oversized_side() {
    let s = Surface { width: f64::from(MAX_EXPORT_DIMENSION) + 1.0, height: 10.0, dpr: 1.0 };
    assert!(matches!(rasterize(&unit_scene(), &viewport(), &s), Err(ExportError::SurfaceTooLarge { .. })));
}

// =============================================================
// Encode
// =============================================================

#[test]
fn export_png_round_trips_pixels() {
    let blob = export(&unit_scene(), &viewport(), &surface(), ExportFormat::Png).unwrap();
    assert_eq!(&blob.bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(blob.mime_type(), "image/png");
    let decoded = image::load_from_memory(&blob.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (400, 300));
    assert_eq!(decoded.get_pixel(260, 160).0, UNIT_DEFAULT_FILL.to_rgba());
}

#[test]
fn export_jpeg_has_jpeg_signature() {
    let blob = export(&unit_scene(), &viewport(), &surface(), ExportFormat::Jpeg).unwrap();
    assert_eq!(&blob.bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(blob.mime_type(), "image/jpeg");
    assert_eq!((blob.width, blob.height), (400, 300));
}

#[test]
fn format_extensions() {
    assert_eq!(ExportFormat::Png.extension(), "png");
    assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
}
