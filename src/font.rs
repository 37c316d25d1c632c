//! Font resolution, measurement and glyph rasterization
//!
//! Candidate font files are tried in order with `ab_glyph`. When none of them
//! parse, rendering continues with the built-in bitmap face and a warning.
//!
//! All positions are relative to the text origin: the top-left of the em box,
//! with the baseline one ascent below it.

pub mod builtin;

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont, point};
use tracing::{debug, warn};

/// System directories searched for bare font file names
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// Where a resolved font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a font file
    File(PathBuf),
    /// The built-in bitmap fallback
    Builtin,
}

#[derive(Clone)]
enum Face {
    Outline(FontArc),
    Builtin,
}

/// A typeface bound to a pixel size
#[derive(Clone)]
pub struct SignFont {
    face: Face,
    source: FontSource,
    size: u32,
}

impl std::fmt::Debug for SignFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignFont")
            .field("source", &self.source)
            .field("size", &self.size)
            .finish()
    }
}

/// Anti-aliased coverage of one glyph
#[derive(Debug, Clone)]
pub struct GlyphMask {
    /// Left edge relative to the text origin
    pub left: i32,
    /// Top edge relative to the text origin
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage in 0.0..=1.0
    pub coverage: Vec<f32>,
}

impl GlyphMask {
    /// Coverage at a mask-local pixel, zero outside the mask
    pub fn coverage_at(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

impl SignFont {
    /// Try each candidate in order, falling back to the built-in face
    pub fn resolve(candidates: &[PathBuf], size: u32) -> Self {
        for candidate in candidates {
            for path in candidate_paths(candidate) {
                match load_font_file(&path) {
                    Some(font) => {
                        debug!("Using font {:?} at {}px", path, size);
                        return Self {
                            face: Face::Outline(font),
                            source: FontSource::File(path),
                            size,
                        };
                    }
                    None => continue,
                }
            }
        }

        warn!("Could not load any configured font, using the built-in face");
        Self::builtin(size)
    }

    /// The built-in bitmap face at `size`
    pub fn builtin(size: u32) -> Self {
        Self {
            face: Face::Builtin,
            source: FontSource::Builtin,
            size,
        }
    }

    /// Load a specific font file
    pub fn from_file(path: &Path, size: u32) -> Option<Self> {
        load_font_file(path).map(|font| Self {
            face: Face::Outline(font),
            source: FontSource::File(path.to_path_buf()),
            size,
        })
    }

    /// The same face at a different size
    pub fn with_size(&self, size: u32) -> Self {
        Self {
            face: self.face.clone(),
            source: self.source.clone(),
            size: size.max(1),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        self.source == FontSource::Builtin
    }

    /// Advance width of `ch`, rounded to whole pixels
    pub fn measure(&self, ch: char) -> f32 {
        match &self.face {
            Face::Outline(font) => {
                let scaled = font.as_scaled(em_scale(font, self.size));
                scaled.h_advance(font.glyph_id(ch)).round()
            }
            Face::Builtin => builtin::advance(self.size).round(),
        }
    }

    /// Rasterize `ch`, or `None` for glyphs with no ink such as spaces
    pub fn rasterize(&self, ch: char) -> Option<GlyphMask> {
        match &self.face {
            Face::Outline(font) => {
                let scale = em_scale(font, self.size);
                let ascent = font.as_scaled(scale).ascent();
                let glyph = font
                    .glyph_id(ch)
                    .with_scale_and_position(scale, point(0.0, ascent));
                let outlined = font.outline_glyph(glyph)?;

                let bounds = outlined.px_bounds();
                let width = bounds.width() as u32;
                let height = bounds.height() as u32;
                if width == 0 || height == 0 {
                    return None;
                }

                let mut coverage = vec![0.0f32; width as usize * height as usize];
                outlined.draw(|x, y, c| {
                    let idx = y as usize * width as usize + x as usize;
                    if idx < coverage.len() {
                        coverage[idx] = c.clamp(0.0, 1.0);
                    }
                });

                Some(GlyphMask {
                    left: bounds.min.x as i32,
                    top: bounds.min.y as i32,
                    width,
                    height,
                    coverage,
                })
            }
            Face::Builtin => builtin::rasterize(ch, self.size),
        }
    }
}

/// Scale at which one em spans `size` pixels
fn em_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size.max(1) as f32;
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
        _ => PxScale::from(size),
    }
}

/// The candidate itself, then bare names joined onto system font directories
fn candidate_paths(candidate: &Path) -> Vec<PathBuf> {
    let mut paths = vec![candidate.to_path_buf()];
    if candidate.is_relative() && candidate.components().count() == 1 {
        paths.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(candidate)));
    }
    paths
}

fn load_font_file(path: &Path) -> Option<FontArc> {
    let data = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(FontArc::new(font)),
        Err(e) => {
            debug!("Skipping unparsable font {:?}: {}", path, e);
            None
        }
    }
}
