//! Lumisign - illuminated sign renderer
//!
//! Draws up to three rows of text onto a background photo so each letter
//! looks like a lit panel on a club sign: a faint tilted box, a soft glow,
//! a three-shade glyph with random wear and the occasional gleam.
//!
//! ## Pipeline
//!
//! 1. `layout::words` splits the text into three section strings
//! 2. `layout::fit` measures each row, shrinks it once if needed, places it
//! 3. `effects` builds the outline, glow and glyph sprites per letter
//! 4. `compositor` pastes the sprites and merges the glow layer
//!
//! Randomness comes from the caller's RNG, so a seeded generator reproduces
//! a render exactly.

pub mod compositor;
pub mod config;
pub mod effects;
pub mod error;
pub mod font;
pub mod layout;
pub mod raster;

pub use compositor::{RenderedSign, render_onto, save_image};
pub use config::SignConfig;
pub use error::RenderError;
pub use font::{FontSource, SignFont};
pub use layout::{SignLayout, SignText, distribute_words};

use std::path::{Path, PathBuf};

use image::{ImageError, RgbaImage};
use rand::Rng;
use tracing::{error, info};

/// Default background file
pub const DEFAULT_INPUT: &str = "photo.jpg";
/// Default output file
pub const DEFAULT_OUTPUT: &str = "output.png";

/// Load the background as RGBA
pub fn load_background(path: &Path) -> Result<RgbaImage, RenderError> {
    if !path.exists() {
        return Err(RenderError::InputNotFound(path.to_path_buf()));
    }
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RenderError::InputNotFound(path.to_path_buf()))
        }
        Err(source) => Err(RenderError::InputLoad {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A configured renderer with its resolved font
#[derive(Debug, Clone)]
pub struct SignRenderer {
    config: SignConfig,
    font: SignFont,
}

impl SignRenderer {
    /// Resolve the configured font chain and build a renderer
    pub fn new(config: SignConfig) -> Self {
        let font = SignFont::resolve(&config.fonts, config.font_size);
        Self { config, font }
    }

    /// Use a specific font; its size is reset to the configured size
    pub fn with_font(config: SignConfig, font: SignFont) -> Self {
        let font = font.with_size(config.font_size);
        Self { config, font }
    }

    pub fn config(&self) -> &SignConfig {
        &self.config
    }

    pub fn font(&self) -> &SignFont {
        &self.font
    }

    /// Render onto `input` and write the result to `output`
    ///
    /// Nothing is written unless the background loads and the result encodes.
    pub fn try_render<R: Rng + ?Sized>(
        &self,
        text: &SignText,
        input: &Path,
        output: &Path,
        rng: &mut R,
    ) -> Result<PathBuf, RenderError> {
        let base = load_background(input)?;
        let sign = render_onto(&base, text, &self.font, &self.config, rng);
        save_image(sign.image, output)?;
        info!("Saved: {}", output.display());
        Ok(output.to_path_buf())
    }

    /// Like `try_render`, but logs failures and returns `None`
    pub fn render<R: Rng + ?Sized>(
        &self,
        text: &SignText,
        input: &Path,
        output: &Path,
        rng: &mut R,
    ) -> Option<PathBuf> {
        match self.try_render(text, input, output, rng) {
            Ok(path) => Some(path),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }
}

/// Render with default settings and the thread RNG
pub fn try_render_sign(
    text: impl Into<SignText>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<PathBuf, RenderError> {
    let renderer = SignRenderer::new(SignConfig::default());
    renderer.try_render(
        &text.into(),
        input.as_ref(),
        output.as_ref(),
        &mut rand::rng(),
    )
}

/// Like `try_render_sign`, but logs failures
///
/// Returns the output path on success and `None` on any failure.
pub fn render_sign(
    text: impl Into<SignText>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Option<PathBuf> {
    match try_render_sign(text, input, output) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn renderer() -> SignRenderer {
        SignRenderer::with_font(SignConfig::default(), SignFont::builtin(40))
    }

    fn write_background(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([240, 238, 230, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_open_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_background(dir.path(), "photo.png", 640, 480);
        let output = dir.path().join("output.png");

        let saved = renderer()
            .try_render(
                &SignText::from("OPEN"),
                &input,
                &output,
                &mut StdRng::seed_from_u64(5),
            )
            .unwrap();
        assert_eq!(saved, output);

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.jpg");
        let output = dir.path().join("output.png");

        let result = renderer().render(
            &SignText::from("OPEN"),
            &input,
            &output,
            &mut StdRng::seed_from_u64(5),
        );
        assert!(result.is_none());
        assert!(!output.exists());

        let err = load_background(&input).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_undecodable_input_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        std::fs::write(&input, b"definitely not a jpeg").unwrap();
        let output = dir.path().join("output.png");

        let err = renderer()
            .try_render(
                &SignText::from("OPEN"),
                &input,
                &output,
                &mut StdRng::seed_from_u64(5),
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::InputLoad { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_jpeg_output_is_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_background(dir.path(), "photo.png", 320, 240);
        let output = dir.path().join("sign.jpeg");

        renderer()
            .try_render(
                &SignText::from("late night"),
                &input,
                &output,
                &mut StdRng::seed_from_u64(8),
            )
            .unwrap();
        assert!(!image::open(&output).unwrap().color().has_alpha());
    }

    #[test]
    fn test_lines_input_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_background(dir.path(), "photo.png", 400, 300);
        let output = dir.path().join("output.png");
        let text = SignText::Lines(vec!["open".into(), "all night".into()]);

        let saved = renderer().render(&text, &input, &output, &mut StdRng::seed_from_u64(1));
        assert_eq!(saved.as_deref(), Some(output.as_path()));
    }

    #[test]
    fn test_render_sign_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.png");

        assert!(render_sign("OPEN", dir.path().join("photo.jpg"), &output).is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_with_font_uses_configured_size() {
        let config = SignConfig {
            font_size: 28,
            ..Default::default()
        };
        let renderer = SignRenderer::with_font(config, SignFont::builtin(90));
        assert_eq!(renderer.font().size(), 28);
    }
}
