//! Pixel primitives
//!
//! Straight-alpha RGBA operations on `image::RgbaImage`:
//! - masked fill and masked paste (lerp every channel by the mask)
//! - Porter-Duff "over" compositing
//! - anti-aliased thick polylines and solid discs
//! - rotation about the centre, Lanczos resize, Gaussian blur

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::font::GlyphMask;

/// A short-lived image with its paste position on a target canvas
#[derive(Debug, Clone)]
pub struct Sprite {
    pub image: RgbaImage,
    pub x: i64,
    pub y: i64,
}

impl Sprite {
    pub fn new(image: RgbaImage, x: i64, y: i64) -> Self {
        Self { image, x, y }
    }

    /// Paste onto `target` using the sprite's own alpha as mask, consuming it
    pub fn paste_onto(self, target: &mut RgbaImage) {
        paste(target, &self.image, self.x, self.y);
    }
}

/// Linear blend of one channel, `t` in 0.0..=1.0
#[inline]
fn lerp(dst: u8, src: u8, t: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * t).round().clamp(0.0, 255.0) as u8
}

/// Translate a source-local pixel to target coordinates, if it lands inside
#[inline]
fn target_pixel(target: &RgbaImage, x: i64, y: i64) -> Option<(u32, u32)> {
    if x < 0 || y < 0 || x >= target.width() as i64 || y >= target.height() as i64 {
        None
    } else {
        Some((x as u32, y as u32))
    }
}

/// Fill `ink` through a coverage mask placed with its text origin at (x, y)
pub fn fill_mask(canvas: &mut RgbaImage, mask: &GlyphMask, x: i64, y: i64, ink: Rgba<u8>) {
    let left = x + mask.left as i64;
    let top = y + mask.top as i64;
    for my in 0..mask.height {
        for mx in 0..mask.width {
            let t = mask.coverage_at(mx, my);
            if t <= 0.0 {
                continue;
            }
            let Some((tx, ty)) = target_pixel(canvas, left + mx as i64, top + my as i64) else {
                continue;
            };
            let dst = canvas.get_pixel_mut(tx, ty);
            for c in 0..4 {
                dst[c] = lerp(dst[c], ink[c], t);
            }
        }
    }
}

/// Paste `src` at (x, y), masking with its own alpha
///
/// Every channel of the target, alpha included, moves toward the source by
/// the source alpha. Fully transparent source pixels leave the target alone.
pub fn paste(target: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let a = px[3];
        if a == 0 {
            continue;
        }
        let Some((tx, ty)) = target_pixel(target, x + sx as i64, y + sy as i64) else {
            continue;
        };
        let t = a as f32 / 255.0;
        let dst = target.get_pixel_mut(tx, ty);
        for c in 0..4 {
            dst[c] = lerp(dst[c], px[c], t);
        }
    }
}

/// Composite `src` over `dst` at the origin, Porter-Duff "over"
pub fn alpha_composite(dst: &mut RgbaImage, src: &RgbaImage) {
    image::imageops::overlay(dst, src, 0, 0);
}

/// Blend `color` over a pixel with extra coverage `t`
#[inline]
fn blend_over(dst: &mut Rgba<u8>, color: Rgba<u8>, t: f32) {
    let sa = color[3] as f32 / 255.0 * t;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let value = (color[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Stroke a connected polyline of the given width, blended over the canvas
///
/// Coverage is taken as the maximum over all segments so joints are not
/// blended twice.
pub fn stroke_polyline(canvas: &mut RgbaImage, points: &[(f32, f32)], width: f32, color: Rgba<u8>) {
    if points.len() < 2 || canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let half = width.max(1.0) / 2.0;
    let pad = half + 1.0;

    let min_x = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min) - pad;
    let max_x = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max) + pad;
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min) - pad;
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max) + pad;

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(canvas.width());
    let y1 = (max_y.ceil().max(0.0) as u32).min(canvas.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let center = (x as f32 + 0.5, y as f32 + 0.5);
            let distance = points
                .windows(2)
                .map(|seg| segment_distance(center, seg[0], seg[1]))
                .fold(f32::INFINITY, f32::min);
            let coverage = (half + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_over(canvas.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
}

/// Overwrite every pixel within `radius` of (cx, cy) with `color`
pub fn fill_disc(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            if let Some((x, y)) = target_pixel(canvas, cx + dx, cy + dy) {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Bilinear sample with premultiplied alpha, transparent outside the image
fn sample_bilinear(src: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let x = x - 0.5;
    let y = y - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let mut acc = [0.0f32; 4];
    for (ox, oy, w) in [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ] {
        let sx = x0 as i64 + ox;
        let sy = y0 as i64 + oy;
        if w <= 0.0 || sx < 0 || sy < 0 || sx >= src.width() as i64 || sy >= src.height() as i64 {
            continue;
        }
        let p = src.get_pixel(sx as u32, sy as u32);
        let a = p[3] as f32 * w;
        acc[0] += p[0] as f32 * a;
        acc[1] += p[1] as f32 * a;
        acc[2] += p[2] as f32 * a;
        acc[3] += a;
    }

    if acc[3] <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    Rgba([
        (acc[0] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[1] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[2] / acc[3]).round().clamp(0.0, 255.0) as u8,
        acc[3].round().clamp(0.0, 255.0) as u8,
    ])
}

/// Rotate about the image centre by `degrees`, keeping the canvas size
///
/// Positive angles turn clockwise on screen (the top leans right). Corners
/// that leave the canvas are cropped.
pub fn rotate_about_center(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        // Inverse of the forward turn
        let sx = cx + dx * cos + dy * sin;
        let sy = cy - dx * sin + dy * cos;
        sample_bilinear(src, sx, sy)
    })
}

/// Lanczos resize, never to an empty image
pub fn resize(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    image::imageops::resize(src, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Gaussian blur with standard deviation `sigma`
pub fn gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma <= 0.0 {
        return src.clone();
    }
    image::imageops::blur(src, sigma)
}

/// Largest alpha value in the image
pub fn max_alpha(img: &RgbaImage) -> u8 {
    img.pixels().map(|p| p[3]).max().unwrap_or(0)
}
