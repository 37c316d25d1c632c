//! Tilted letter box outline

use image::{Rgba, RgbaImage};

use super::LetterBox;
use crate::config::EffectSettings;
use crate::raster;

/// Four corners of the rotated letter box
///
/// Order: top-left, top-right, bottom-right, bottom-left (before rotation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub corners: [(f32, f32); 4],
}

/// Rotate `p` about `center` (y down, positive angles turn clockwise on screen)
pub fn rotate_point(p: (f32, f32), center: (f32, f32), sin: f32, cos: f32) -> (f32, f32) {
    let dx = p.0 - center.0;
    let dy = p.1 - center.1;
    (
        center.0 + dx * cos - dy * sin,
        center.1 + dx * sin + dy * cos,
    )
}

impl Outline {
    /// Padded box around `letter`, taller above than below, tilted about its centre
    pub fn around(letter: &LetterBox, effects: &EffectSettings, degrees: f32) -> Self {
        let pad = effects.outline_padding / 2.0;
        let left = letter.x - pad;
        let right = letter.x + letter.width + pad;
        let top = letter.top() - pad - effects.outline_extra_top;
        let bottom = letter.center_y + letter.height / 2.0 + pad + effects.outline_extra_bottom;

        let center = ((left + right) / 2.0, (top + bottom) / 2.0);
        let (sin, cos) = degrees.to_radians().sin_cos();

        Self {
            corners: [(left, top), (right, top), (right, bottom), (left, bottom)]
                .map(|corner| rotate_point(corner, center, sin, cos)),
        }
    }

    /// Closed loop through all four corners back to the first
    pub fn path(&self) -> [(f32, f32); 5] {
        let [a, b, c, d] = self.corners;
        [a, b, c, d, a]
    }

    /// Centre of the quadrilateral
    pub fn center(&self) -> (f32, f32) {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
        (sx / 4.0, sy / 4.0)
    }

    /// Stroke the loop onto `canvas`
    pub fn draw(&self, canvas: &mut RgbaImage, width: u32, color: [u8; 4]) {
        raster::stroke_polyline(canvas, &self.path(), width as f32, Rgba(color));
    }
}
