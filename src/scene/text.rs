//! Text rasterization capability.
//!
//! Labels are camera-facing quads textured with rasterized text. The
//! engine never touches a 2D canvas directly; any raster backend that
//! can measure and render a string plugs in through [`TextRasterizer`].

use super::graph::{SceneGraph, TextureHandle};

/// A rasterized label texture plus its fixed aspect ratio.
///
/// The aspect (width / height of the rendered text's pixel bounds) is
/// captured once at creation and drives billboard sizing from then on.
#[derive(Debug, Clone, Copy)]
pub struct LabelTexture {
    pub texture: TextureHandle,
    pub aspect: f32,
}

/// Backend capable of turning a string into a texture.
pub trait TextRasterizer {
    /// Pixel bounding box of `text` as (width, height).
    fn measure(&self, text: &str) -> (u32, u32);

    /// Renders `text` into a new texture registered with `scene`.
    fn rasterize(&self, text: &str, scene: &mut SceneGraph) -> LabelTexture;
}

/// Deterministic rasterizer using fixed glyph metrics.
///
/// Stands in for a canvas backend in headless use and in tests: every
/// glyph advances by the same width, so measurements depend only on
/// the string length.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMetricsRasterizer {
    pub glyph_width_px: u32,
    pub line_height_px: u32,
}

impl Default for GlyphMetricsRasterizer {
    fn default() -> Self {
        Self {
            glyph_width_px: 18,
            line_height_px: 32,
        }
    }
}

impl TextRasterizer for GlyphMetricsRasterizer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let glyphs = text.chars().count().max(1) as u32;
        (glyphs * self.glyph_width_px, self.line_height_px)
    }

    fn rasterize(&self, text: &str, scene: &mut SceneGraph) -> LabelTexture {
        let (w, h) = self.measure(text);
        LabelTexture {
            texture: scene.alloc_texture(),
            aspect: w as f32 / h as f32,
        }
    }
}
