//! Sign layout
//!
//! Fixed geometry derived from the background size: a shared horizontal text
//! band and three stacked sections. Each section holds at most one row.
//!
//! ## Stages
//!
//! - `words`: split the input into three section strings
//! - `fit`: measure a row, shrink once if it overflows, place it in the band

pub mod fit;
pub mod words;

pub use fit::{LetterSlot, RowLayout, fit_row};
pub use words::{SignText, distribute_words};

use crate::config::LayoutSettings;
use crate::font::SignFont;

/// Number of text sections on the sign
pub const SECTION_COUNT: usize = 3;

/// One horizontal band of the sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Top edge in pixels
    pub top: f32,
    /// Height in pixels
    pub height: f32,
}

impl Section {
    /// Vertical centre the row is drawn around
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Geometry shared by every row of one render
#[derive(Debug, Clone, PartialEq)]
pub struct SignLayout {
    pub image_width: u32,
    pub image_height: u32,
    /// Left boundary of the text band
    pub band_left: f32,
    /// Width of the text band
    pub band_width: f32,
    /// Share of the band a row may use before shrinking
    pub fit_fraction: f32,
    /// Rightward nudge after centring
    pub center_offset: f32,
    /// Gap kept to a boundary when clamping
    pub edge_margin: f32,
    pub sections: [Section; SECTION_COUNT],
}

impl SignLayout {
    /// Derive the layout for a background of the given size
    pub fn new(image_width: u32, image_height: u32, settings: &LayoutSettings) -> Self {
        let w = image_width as f32;
        let h = image_height as f32;
        let sections = settings.sections.map(|(top, height)| Section {
            top: h * top,
            height: h * height,
        });

        Self {
            image_width,
            image_height,
            band_left: w * settings.x_fraction,
            band_width: w * settings.width_fraction,
            fit_fraction: settings.fit_fraction,
            center_offset: settings.center_offset,
            edge_margin: settings.edge_margin,
            sections,
        }
    }

    /// Right boundary of the text band
    pub fn band_right(&self) -> f32 {
        self.band_left + self.band_width
    }

    /// Widest a row may be before it is shrunk
    pub fn fit_threshold(&self) -> f32 {
        self.band_width * self.fit_fraction
    }

    /// Lay out every non-empty section row
    ///
    /// Returns one entry per section; empty sections yield `None`.
    pub fn plan_rows(
        &self,
        rows: &[String; SECTION_COUNT],
        font: &SignFont,
        letter_spacing: f32,
    ) -> [Option<RowLayout>; SECTION_COUNT] {
        std::array::from_fn(|i| {
            let text = rows[i].as_str();
            if text.is_empty() {
                None
            } else {
                Some(fit_row(text, i, font, self, letter_spacing))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_image_size() {
        let layout = SignLayout::new(1000, 800, &LayoutSettings::default());
        assert_eq!(layout.band_left, 100.0);
        assert_eq!(layout.band_width, 800.0);
        assert_eq!(layout.band_right(), 900.0);
        assert!((layout.fit_threshold() - 760.0).abs() < 1e-3);

        let top = layout.sections[0];
        assert!((top.top - 348.0).abs() < 1e-3);
        assert!((top.height - 56.0).abs() < 1e-3);
        assert!((top.center_y() - 376.0).abs() < 1e-3);
    }

    #[test]
    fn test_sections_are_stacked_top_to_bottom() {
        let layout = SignLayout::new(640, 480, &LayoutSettings::default());
        let centers: Vec<f32> = layout.sections.iter().map(Section::center_y).collect();
        assert!(centers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_plan_rows_skips_empty_sections() {
        let layout = SignLayout::new(1000, 800, &LayoutSettings::default());
        let rows = ["OPEN".to_string(), String::new(), String::new()];
        let planned = layout.plan_rows(&rows, &SignFont::builtin(40), 3.0);

        let first = planned[0].as_ref().unwrap();
        assert_eq!(first.section, 0);
        assert_eq!(first.slots.len(), 4);
        assert!(planned[1].is_none());
        assert!(planned[2].is_none());
    }
}
