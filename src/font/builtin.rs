//! Built-in 5×7 bitmap face
//!
//! Used when no font file can be loaded. Glyphs sit in a 6×8 cell grid that is
//! scaled to the requested pixel size, so the face still responds to the fit
//! pass. Lower-case input is folded to upper case before lookup.

use super::GlyphMask;

/// Cell columns advanced per character
const ADVANCE_CELLS: f32 = 6.0;
/// Cell rows per em
const EM_CELLS: f32 = 8.0;
/// Glyph columns
const COLS: usize = 5;
/// Glyph rows
const ROWS: usize = 7;

/// Drawn for characters without a bitmap
const MISSING: [u8; ROWS] = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

#[rustfmt::skip]
const GLYPHS: &[(char, [u8; ROWS])] = &[
    (' ', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000]),
    ('A', [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    ('B', [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
    ('C', [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
    ('D', [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
    ('E', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
    ('F', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
    ('G', [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
    ('H', [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    ('I', [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('J', [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
    ('K', [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
    ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    ('M', [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
    ('N', [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
    ('O', [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('P', [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
    ('Q', [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
    ('R', [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
    ('S', [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
    ('T', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
    ('U', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('V', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
    ('W', [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
    ('X', [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
    ('Y', [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
    ('Z', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
    ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('3', [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    ('6', [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    ('!', [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100]),
    ('?', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100]),
    ('.', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100]),
    (',', [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000]),
    ('\'', [0b01100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000]),
    ('-', [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000]),
    ('+', [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000]),
    (':', [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000]),
    ('/', [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000]),
    ('#', [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010]),
    ('&', [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101]),
];

fn bitmap(ch: char) -> &'static [u8; ROWS] {
    let upper = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, rows)| rows)
        .unwrap_or(&MISSING)
}

fn cell(size: u32) -> f32 {
    size.max(1) as f32 / EM_CELLS
}

/// Advance width at `size` pixels
pub(super) fn advance(size: u32) -> f32 {
    cell(size) * ADVANCE_CELLS
}

/// Coverage mask for `ch`, origin at the top-left of the em box
pub(super) fn rasterize(ch: char, size: u32) -> Option<GlyphMask> {
    let rows = bitmap(ch);
    if rows.iter().all(|row| *row == 0) {
        return None;
    }

    let unit = cell(size);
    // Half a cell of left bearing keeps neighbouring glyphs apart
    let bearing = unit * 0.5;
    let width = (bearing + unit * COLS as f32).ceil() as u32 + 1;
    let height = (unit * ROWS as f32).ceil() as u32 + 1;
    let mut coverage = vec![0.0f32; width as usize * height as usize];

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..COLS {
            if bits & (1 << (COLS - 1 - col)) == 0 {
                continue;
            }
            let x0 = bearing + col as f32 * unit;
            let y0 = row as f32 * unit;
            accumulate_rect(&mut coverage, width, height, x0, y0, x0 + unit, y0 + unit);
        }
    }

    for value in &mut coverage {
        *value = value.min(1.0);
    }

    Some(GlyphMask {
        left: 0,
        top: 0,
        width,
        height,
        coverage,
    })
}

/// Add the pixel-area overlap of a rectangle to a coverage buffer
fn accumulate_rect(
    coverage: &mut [f32],
    width: u32,
    height: u32,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
) {
    let px_start = x0.floor().max(0.0) as u32;
    let px_end = (x1.ceil() as u32).min(width);
    let py_start = y0.floor().max(0.0) as u32;
    let py_end = (y1.ceil() as u32).min(height);

    for py in py_start..py_end {
        let oy = (y1.min(py as f32 + 1.0) - y0.max(py as f32)).max(0.0);
        for px in px_start..px_end {
            let ox = (x1.min(px as f32 + 1.0) - x0.max(px as f32)).max(0.0);
            coverage[py as usize * width as usize + px as usize] += ox * oy;
        }
    }
}
