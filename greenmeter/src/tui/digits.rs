//! Block-character font for the large percentage label.
//!
//! Each glyph is 3x5 cells; every cell is drawn two columns wide so the
//! digits keep a roughly square aspect on a terminal.

/// Rows per glyph
pub const GLYPH_HEIGHT: usize = 5;

const GLYPH_WIDTH: usize = 3;
const CELL_WIDTH: usize = 2;
const GAP: usize = 2;

type Glyph = [&'static str; GLYPH_HEIGHT];

const BLANK: Glyph = ["   ", "   ", "   ", "   ", "   "];

fn glyph(c: char) -> Glyph {
    match c {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        '-' => ["   ", "   ", "###", "   ", "   "],
        '%' => ["# #", "  #", " # ", "#  ", "# #"],
        _ => BLANK,
    }
}

/// Columns needed to draw `text`
#[must_use]
pub fn rendered_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    n * GLYPH_WIDTH * CELL_WIDTH + (n - 1) * GAP
}

/// Render `text` as `GLYPH_HEIGHT` lines of block characters.
/// Characters without a glyph are drawn blank.
#[must_use]
pub fn render(text: &str) -> Vec<String> {
    let mut lines = vec![String::with_capacity(rendered_width(text)); GLYPH_HEIGHT];

    for (idx, c) in text.chars().enumerate() {
        let g = glyph(c);
        for (line, row) in lines.iter_mut().zip(g) {
            if idx > 0 {
                line.extend(std::iter::repeat(' ').take(GAP));
            }
            for cell in row.chars() {
                let fill = if cell == '#' { '█' } else { ' ' };
                line.extend(std::iter::repeat(fill).take(CELL_WIDTH));
            }
        }
    }

    lines
}
