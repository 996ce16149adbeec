//! # Line Font
//!
//! Built-in stroke font for turning text into line geometry.
//!
//! Glyphs are drawn on a 3 × 5 point grid (`x` in `0..=2`, `y` in `0..=4`,
//! `y` up). Each stroke is four digits `x0 y0 x1 y1`. The grid is mapped
//! into a box of `LINE_FONT_ADVANCE × 1` glyph heights, inset by
//! `LINE_FONT_PADDING` on every side.
//!
//! Lowercase letters render as uppercase. Characters without a glyph
//! advance the cursor and draw nothing; `\n` starts a new row.

use config::constants::{LINE_FONT_ADVANCE, LINE_FONT_PADDING};
use glam::Vec3;

use crate::buffer::MeshBuffer;

/// Stroke table, `(character, strokes)`.
const GLYPHS: &[(char, &str)] = &[
    ('A', "0003 0314 1423 2320 0222"),
    ('B', "0004 0414 1423 2312 1202 1221 2110 1000"),
    ('C', "2404 0400 0020"),
    ('D', "0004 0414 1423 2321 2110 1000"),
    ('E', "2404 0400 0020 0212"),
    ('F', "2404 0400 0212"),
    ('G', "2404 0400 0020 2022 2212"),
    ('H', "0004 2024 0222"),
    ('I', "0424 1410 0020"),
    ('J', "0424 2421 2110 1001"),
    ('K', "0004 0224 0220"),
    ('L', "0400 0020"),
    ('M', "0004 0412 1224 2420"),
    ('N', "0004 0420 2024"),
    ('O', "0004 0424 2420 2000"),
    ('P', "0004 0424 2422 2202"),
    ('Q', "0004 0424 2420 2000 1120"),
    ('R', "0004 0424 2422 2202 0220"),
    ('S', "2404 0402 0222 2220 2000"),
    ('T', "0424 1410"),
    ('U', "0400 0020 2024"),
    ('V', "0410 1024"),
    ('W', "0400 0012 1220 2024"),
    ('X', "0024 0420"),
    ('Y', "0412 1224 1210"),
    ('Z', "0424 2400 0020"),
    ('0', "0004 0424 2420 2000 0024"),
    ('1', "0314 1410 0020"),
    ('2', "0424 2422 2202 0200 0020"),
    ('3', "0424 2420 2000 0222"),
    ('4', "0402 0222 2420"),
    ('5', "2404 0402 0222 2220 2000"),
    ('6', "2404 0400 0020 2022 2202"),
    ('7', "0424 2410"),
    ('8', "0004 0424 2420 2000 0222"),
    ('9', "2202 0204 0424 2420 2000"),
    ('-', "0222"),
    ('+', "0222 1113"),
    ('=', "0121 0323"),
    ('.', "1011"),
    (',', "1100"),
    (':', "1011 1314"),
    ('!', "1412 1011"),
    ('?', "0424 2422 2212 1211"),
    ('/', "0024"),
    ('(', "1403 0301 0110"),
    (')', "1423 2321 2110"),
    ('_', "0020"),
    ('\'', "1413"),
    ('*', "0024 0420 0222"),
];

/// Strokes of a character, as grid point pairs.
fn strokes(c: char) -> impl Iterator<Item = ([u8; 2], [u8; 2])> {
    let upper = c.to_ascii_uppercase();
    let table = GLYPHS
        .iter()
        .find(|(g, _)| *g == upper)
        .map_or("", |(_, s)| *s);
    table.split_whitespace().filter_map(|stroke| {
        let d: Vec<u8> = stroke
            .bytes()
            .map(|b| b.wrapping_sub(b'0'))
            .collect();
        match d.as_slice() {
            [x0, y0, x1, y1] => Some(([*x0, *y0], [*x1, *y1])),
            _ => None,
        }
    })
}

/// Returns true if `c` has a glyph.
pub fn has_glyph(c: char) -> bool {
    let upper = c.to_ascii_uppercase();
    GLYPHS.iter().any(|(g, _)| *g == upper)
}

impl MeshBuffer {
    /// Draws `text` as lines with the built-in font.
    ///
    /// The first glyph's box has its lower left corner at `origin`; text
    /// runs along +x and rows go down along -y. `size` is the glyph height.
    /// Vertices carry the pen's attributes and go through
    /// [`MeshBuffer::add_vertex_at`].
    ///
    /// # Returns
    ///
    /// Number of lines added.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// assert_eq!(buffer.add_text("T", Vec3::ZERO, 1.0), 2);
    /// ```
    pub fn add_text(&mut self, text: &str, origin: Vec3, size: f32) -> usize {
        let inner = 1.0 - 2.0 * LINE_FONT_PADDING;
        let width = LINE_FONT_ADVANCE * size;
        let mut added = 0;

        for (row, line) in text.lines().enumerate() {
            let baseline = origin.y - row as f32 * size;
            for (column, c) in line.chars().enumerate() {
                let left = origin.x + column as f32 * width;
                let map = |[x, y]: [u8; 2]| {
                    Vec3::new(
                        left + (LINE_FONT_PADDING + x as f32 / 2.0 * inner) * width,
                        baseline + (LINE_FONT_PADDING + y as f32 / 4.0 * inner) * size,
                        origin.z,
                    )
                };
                for (from, to) in strokes(c) {
                    let a = self.add_vertex_at(map(from));
                    let b = self.add_vertex_at(map(to));
                    self.add_line(a, b);
                    added += 1;
                }
            }
        }

        added
    }
}

// =============================================================================
// TESTS
// =============================================================================
