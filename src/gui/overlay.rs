use crate::background_image::Image;
use eframe::egui::{self, Color32, Pos2, Rect, Vec2};
use image::RgbaImage;
use std::sync::Arc;

/// Screen rectangle and UV rectangle for drawing `image` at `origin`.
pub fn overlay_geometry(image_size: (u32, u32), image: &Image, origin: Pos2) -> (Rect, Rect) {
    let min = origin + Vec2::new(image.offset_x as f32, image.offset_y as f32);
    let size = Vec2::new(
        image_size.0 as f32 * image.scaling_x.abs(),
        image_size.1 as f32 * image.scaling_y.abs(),
    );
    let (u0, u1) = if image.mirror_x { (1.0, 0.0) } else { (0.0, 1.0) };
    let (v0, v1) = if image.mirror_y { (1.0, 0.0) } else { (0.0, 1.0) };
    (
        Rect::from_min_size(min, size),
        Rect::from_min_max(Pos2::new(u0, v0), Pos2::new(u1, v1)),
    )
}

/// Tint applied to the texture; transparency `1.0` draws nothing.
pub fn overlay_tint(transparency: f32) -> Color32 {
    let alpha = (1.0 - transparency.clamp(0.0, 1.0)) * 255.0;
    Color32::from_white_alpha(alpha.round() as u8)
}

#[derive(Default)]
struct CachedTexture {
    source: Option<Arc<RgbaImage>>,
    texture: Option<egui::TextureHandle>,
}

impl CachedTexture {
    fn get(&mut self, ctx: &egui::Context, name: &str, image: &Image) -> Option<&egui::TextureHandle> {
        let Some(pixels) = image.pixels() else {
            self.source = None;
            self.texture = None;
            return None;
        };
        let stale = match &self.source {
            Some(src) => !Arc::ptr_eq(src, pixels),
            None => true,
        };
        if stale || self.texture.is_none() {
            let size = [pixels.width() as usize, pixels.height() as usize];
            let color = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
            self.texture = Some(ctx.load_texture(name, color, egui::TextureOptions::LINEAR));
            self.source = Some(pixels.clone());
        }
        self.texture.as_ref()
    }
}

/// GPU textures for the top and bottom overlays, rebuilt when the decoded
/// pixels change.
#[derive(Default)]
pub struct OverlayTextures {
    top: CachedTexture,
    bottom: CachedTexture,
}

impl OverlayTextures {
    fn paint_with(cache: &mut CachedTexture, name: &str, painter: &egui::Painter, image: &Image, origin: Pos2) {
        if image.transparency >= 1.0 {
            return;
        }
        let Some(size) = image.size() else { return };
        let Some(tex) = cache.get(painter.ctx(), name, image) else { return };
        let (rect, uv) = overlay_geometry(size, image, origin);
        painter.image(tex.id(), rect, uv, overlay_tint(image.transparency));
    }

    pub fn paint_top(&mut self, painter: &egui::Painter, image: &Image, origin: Pos2) {
        Self::paint_with(&mut self.top, "background-top", painter, image, origin);
    }

    pub fn paint_bottom(&mut self, painter: &egui::Painter, image: &Image, origin: Pos2) {
        Self::paint_with(&mut self.bottom, "background-bottom", painter, image, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_applies_offset_and_scale() {
        let mut img = Image::default();
        img.offset_x = 10;
        img.offset_y = -5;
        img.scaling_x = 2.0;
        img.scaling_y = 0.5;
        let (rect, uv) = overlay_geometry((100, 40), &img, Pos2::new(1.0, 1.0));
        assert_eq!(rect.min, Pos2::new(11.0, -4.0));
        assert_eq!(rect.size(), Vec2::new(200.0, 20.0));
        assert_eq!(uv, Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)));
    }

    #[test]
    fn mirroring_flips_uv() {
        let mut img = Image::default();
        img.mirror_x = true;
        let (_, uv) = overlay_geometry((8, 8), &img, Pos2::ZERO);
        assert_eq!(uv.min, Pos2::new(1.0, 0.0));
        assert_eq!(uv.max, Pos2::new(0.0, 1.0));
    }

    #[test]
    fn tint_follows_transparency() {
        assert_eq!(overlay_tint(0.0), Color32::from_white_alpha(255));
        assert_eq!(overlay_tint(1.0), Color32::from_white_alpha(0));
        assert_eq!(overlay_tint(7.0), Color32::from_white_alpha(0));
    }
}
