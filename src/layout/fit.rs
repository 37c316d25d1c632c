//! Row fitting and placement
//!
//! A row's width is the sum of its advance widths plus one letter spacing
//! between consecutive non-space letters. If that exceeds the band threshold
//! the font is shrunk once, proportionally, and the row re-measured. There is
//! no second pass: a row that still overflows is clamped against the band.

use tracing::debug;

use super::SignLayout;
use crate::font::SignFont;

/// One character of a placed row
#[derive(Debug, Clone, PartialEq)]
pub struct LetterSlot {
    pub ch: char,
    /// Left edge of the letter's nominal box
    pub x: f32,
    /// Advance width at the row's font size
    pub width: f32,
}

impl LetterSlot {
    pub fn is_space(&self) -> bool {
        self.ch.is_whitespace()
    }
}

/// A measured, fitted and placed row
#[derive(Debug, Clone)]
pub struct RowLayout {
    /// Section index (0 = top)
    pub section: usize,
    pub text: String,
    /// Font the row is drawn with, possibly shrunk
    pub font: SignFont,
    /// Whether the fit pass reduced the font size
    pub shrunk: bool,
    /// Measured width including inter-letter spacing
    pub total_width: f32,
    /// Left edge of the row after centring and clamping
    pub start_x: f32,
    pub slots: Vec<LetterSlot>,
}

/// Per-character advance widths and the spaced total
pub fn measure_row(text: &str, font: &SignFont, letter_spacing: f32) -> (Vec<f32>, f32) {
    let widths: Vec<f32> = text.chars().map(|ch| font.measure(ch)).collect();
    let letters = text.chars().filter(|ch| *ch != ' ').count();
    let gaps = letters.saturating_sub(1) as f32;
    let total = widths.iter().sum::<f32>() + gaps * letter_spacing;
    (widths, total)
}

/// Fit `text` into the band and place its letters
pub fn fit_row(
    text: &str,
    section: usize,
    font: &SignFont,
    layout: &SignLayout,
    letter_spacing: f32,
) -> RowLayout {
    let threshold = layout.fit_threshold();
    let (mut widths, mut total_width) = measure_row(text, font, letter_spacing);
    let mut font = font.clone();
    let mut shrunk = false;

    if total_width > threshold {
        let scale = threshold / total_width;
        let size = ((font.size() as f32 * scale).floor() as u32).max(1);
        debug!(
            "Row {:?} is {:.1}px wide (limit {:.1}px), shrinking font {} -> {}",
            text,
            total_width,
            threshold,
            font.size(),
            size
        );
        font = font.with_size(size);
        (widths, total_width) = measure_row(text, &font, letter_spacing);
        shrunk = true;

        if total_width > threshold {
            debug!(
                "Row {:?} still {:.1}px after shrinking, clamping to band",
                text, total_width
            );
        }
    }

    let start_x = place_row(total_width, layout);

    let mut cursor = start_x;
    let slots = text
        .chars()
        .zip(widths)
        .map(|(ch, width)| {
            let slot = LetterSlot { ch, x: cursor, width };
            // Spacing follows every character, the last one included
            cursor += width + letter_spacing;
            slot
        })
        .collect();

    RowLayout {
        section,
        text: text.to_string(),
        font,
        shrunk,
        total_width,
        start_x,
        slots,
    }
}

/// Centre on the image, nudge right, then clamp into the band
pub fn place_row(total_width: f32, layout: &SignLayout) -> f32 {
    let mut x = (layout.image_width as f32 - total_width) / 2.0 + layout.center_offset;

    if x < layout.band_left {
        x = layout.band_left + layout.edge_margin;
    }
    if x + total_width > layout.band_right() {
        x = layout.band_right() - total_width - layout.edge_margin;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;

    fn layout(width: u32) -> SignLayout {
        SignLayout::new(width, 600, &LayoutSettings::default())
    }

    #[test]
    fn test_measure_counts_spacing_between_letters_only() {
        let font = SignFont::builtin(40);
        // Builtin advance at 40px is 30px
        let (widths, total) = measure_row("AB C", &font, 3.0);
        assert_eq!(widths, vec![30.0, 30.0, 30.0, 30.0]);
        // Three letters, two gaps
        assert_eq!(total, 126.0);
    }

    #[test]
    fn test_short_row_is_not_shrunk() {
        let row = fit_row("OPEN", 0, &SignFont::builtin(40), &layout(1000), 3.0);
        assert!(!row.shrunk);
        assert_eq!(row.font.size(), 40);
        assert_eq!(row.total_width, 129.0);
        // (1000 - 129) / 2 + 35
        assert!((row.start_x - 470.5).abs() < 1e-3);
    }

    #[test]
    fn test_long_row_is_shrunk_exactly_once() {
        let layout = layout(400);
        let text = "ABCDEFGHIJKLMNOP";
        let row = fit_row(text, 1, &SignFont::builtin(40), &layout, 3.0);

        assert!(row.shrunk);
        assert!(row.font.size() < 40);
        // One proportional step from the original size
        let (_, original) = measure_row(text, &SignFont::builtin(40), 3.0);
        let expected = (40.0 * layout.fit_threshold() / original).floor() as u32;
        assert_eq!(row.font.size(), expected);
    }

    #[test]
    fn test_fit_holds_or_font_was_reduced() {
        let layout = layout(500);
        for text in ["A", "HELLO", "GRAND OPENING", "THE QUICK BROWN FOX JUMPS"] {
            let row = fit_row(text, 0, &SignFont::builtin(40), &layout, 3.0);
            assert!(row.total_width <= layout.fit_threshold() || row.shrunk);
        }
    }

    #[test]
    fn test_overflow_after_shrink_is_clamped_not_refit() {
        // Spacing alone overflows, so one shrink cannot fit it
        let layout = layout(200);
        let row = fit_row("IIIIIIIIIIIIIIII", 0, &SignFont::builtin(40), &layout, 12.0);
        assert!(row.shrunk);
        assert!(row.total_width > layout.fit_threshold());
        assert!(
            (row.start_x - (layout.band_right() - row.total_width - layout.edge_margin)).abs()
                < 1e-3
        );
    }

    #[test]
    fn test_clamp_left_edge() {
        let mut layout = layout(1000);
        layout.center_offset = -600.0;
        let x = place_row(100.0, &layout);
        assert_eq!(x, layout.band_left + layout.edge_margin);
    }

    #[test]
    fn test_clamp_right_edge() {
        let mut layout = layout(1000);
        layout.center_offset = 600.0;
        let x = place_row(100.0, &layout);
        assert_eq!(x, layout.band_right() - 100.0 - layout.edge_margin);
    }

    #[test]
    fn test_cursor_advances_width_plus_spacing() {
        let row = fit_row("A B", 0, &SignFont::builtin(40), &layout(1000), 3.0);
        let xs: Vec<f32> = row.slots.iter().map(|s| s.x - row.start_x).collect();
        assert_eq!(xs, vec![0.0, 33.0, 66.0]);
        assert!(row.slots[1].is_space());
    }
}
