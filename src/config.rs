//! Sign configuration
//!
//! Fixed effect parameters for the renderer, optionally overridden by a JSON
//! file in the user's config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest accepted base font size in pixels
pub const MAX_FONT_SIZE: u32 = 1024;

/// Top-level render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignConfig {
    /// Base font size in pixels
    pub font_size: u32,
    /// Glow strength in percent (0-100)
    pub glow_intensity: u8,
    /// Letter outline stroke width in pixels
    pub outline_width: u32,
    /// Extra horizontal space after every letter
    pub letter_spacing: f32,
    /// Tilt applied to both letter outline and glyph (degrees, top leans right)
    pub rotation_degrees: f32,
    /// Font files tried in order before falling back to the built-in face
    pub fonts: Vec<PathBuf>,
    /// Maximum characters accepted by the CLI
    pub max_chars: usize,
    /// Sign geometry
    pub layout: LayoutSettings,
    /// Per-letter effect constants
    pub effects: EffectSettings,
}

/// Geometry of the sign relative to the background image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Left edge of the text band as a fraction of image width
    pub x_fraction: f32,
    /// Width of the text band as a fraction of image width
    pub width_fraction: f32,
    /// Share of the band a row may fill before it is shrunk
    pub fit_fraction: f32,
    /// Rightward nudge applied after centring (pixels)
    pub center_offset: f32,
    /// Gap kept between a clamped row and the band edge (pixels)
    pub edge_margin: f32,
    /// (top, height) of each section as fractions of image height
    pub sections: [(f32, f32); 3],
}

/// Constants of the letter effect stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Horizontal and vertical padding around the letter box
    pub outline_padding: f32,
    /// Extra headroom above the letter box
    pub outline_extra_top: f32,
    /// Extra room below the letter box
    pub outline_extra_bottom: f32,
    /// RGBA of the outline stroke
    pub outline_color: [u8; 4],
    /// Alpha the glyph opacity jitter is centred on
    pub base_alpha: u8,
    /// Lower and upper opacity multipliers
    pub opacity_range: (f32, f32),
    /// Grey levels for the upper, middle and lower glyph passes
    pub shades: [u8; 3],
    /// Max glyph position jitter as a fraction of glyph size
    pub flaw_jitter: f32,
    /// Max relative size variation (0.05 = ±5%)
    pub size_variation: f32,
    /// Vertical stretch of the glyph sprite
    pub vertical_stretch: f32,
    /// Glyph sprite canvas relative to the letter box (width, height)
    pub sprite_factor: (f32, f32),
    /// Gradient scratch canvas relative to the letter box (width, height)
    pub gradient_factor: (f32, f32),
    /// Glow canvas relative to the larger glyph dimension
    pub glow_factor: f32,
    /// Upward shift of glow and glyph sprites (pixels)
    pub lift: i64,
    /// Chance that a letter receives a gleam
    pub gleam_probability: f64,
    /// Alpha at the centre of a gleam
    pub gleam_peak_alpha: u8,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            font_size: 40,
            glow_intensity: 40,
            outline_width: 2,
            letter_spacing: 3.0,
            rotation_degrees: 3.0,
            fonts: default_font_candidates(),
            max_chars: 20,
            layout: LayoutSettings::default(),
            effects: EffectSettings::default(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            x_fraction: 0.1,
            width_fraction: 0.8,
            fit_fraction: 0.95,
            center_offset: 35.0,
            edge_margin: 2.0,
            sections: [(0.435, 0.07), (0.46, 0.07), (0.485, 0.07)],
        }
    }
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            outline_padding: 4.0,
            outline_extra_top: 16.0,
            outline_extra_bottom: 2.0,
            outline_color: [150, 150, 150, 38],
            base_alpha: 153,
            opacity_range: (0.85, 1.15),
            shades: [24, 22, 20],
            flaw_jitter: 0.1,
            size_variation: 0.05,
            vertical_stretch: 1.4,
            sprite_factor: (1.5, 1.8),
            gradient_factor: (1.2, 1.8),
            glow_factor: 1.5,
            lift: 1,
            gleam_probability: 0.25,
            gleam_peak_alpha: 200,
        }
    }
}

fn default_font_candidates() -> Vec<PathBuf> {
    [
        "arialbd.ttf",
        "Arial Bold.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

impl SignConfig {
    /// Alpha of the glow sprite derived from `glow_intensity`
    pub fn glow_alpha(&self) -> u8 {
        (255.0 * f32::from(self.glow_intensity.min(100)) / 100.0) as u8
    }

    /// Height of the nominal letter box
    pub fn letter_height(&self) -> f32 {
        self.font_size as f32 * 0.8
    }

    /// Gaussian sigma for the glow
    pub fn glow_sigma(&self) -> f32 {
        self.font_size as f32 / 10.0
    }

    /// Get the config file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lumisign", "Lumisign")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config from the default location, or defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        match Self::file_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if !(1..=MAX_FONT_SIZE).contains(&config.font_size) {
            warn!(
                "font_size {} out of range, clamping to 1..={}",
                config.font_size, MAX_FONT_SIZE
            );
            config.font_size = config.font_size.clamp(1, MAX_FONT_SIZE);
        }
        Ok(config)
    }

    /// Save the config to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_err)
    }
}

/// Errors reading or writing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
