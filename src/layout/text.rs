use crate::colour::Colour;
use crate::font::BuiltinFont;
use crate::units::Pt;

/// How the lines of a wrapped block are aligned horizontally
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    /// Stretch every line but the last to the full line width
    Justify,
}

/// Everything needed to wrap, measure, and draw a paragraph
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: BuiltinFont,
    pub size: Pt,
    /// Baseline-to-baseline distance
    pub leading: Pt,
    pub colour: Colour,
    pub alignment: Alignment,
}

/// One wrapped line. Words are joined by single spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: Pt,
    /// Number of inter-word spaces, used to distribute justification
    pub spaces: usize,
}

/// A paragraph that has been wrapped to a maximum width and measured, ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    /// Width of the widest line
    pub width: Pt,
    /// Total height, `leading` per line
    pub height: Pt,
    /// The width the block was wrapped to
    pub max_width: Pt,
    pub style: ParagraphStyle,
}

impl TextBlock {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Baseline of the line at `index` when the top of the block sits at `top`
    pub fn baseline(&self, top: Pt, index: usize) -> Pt {
        top - self.style.font.ascent(self.style.size) - self.style.leading * index as f32
    }

    /// Extra space to add to each space character on the line at `index`
    pub fn word_spacing(&self, index: usize) -> Pt {
        let Some(line) = self.lines.get(index) else {
            return Pt(0.0);
        };
        let is_last = index + 1 == self.lines.len();
        if self.style.alignment != Alignment::Justify || is_last || line.spaces == 0 {
            return Pt(0.0);
        }
        ((self.max_width - line.width) / line.spaces as f32).max(Pt(0.0))
    }
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: BuiltinFont, size: Pt) -> Pt {
    let units: u32 = text.chars().map(|ch| font.glyph_advance(ch) as u32).sum();
    size * (units as f32 / 1000.0)
}

/// Wraps text into lines no wider than `max_width`, breaking only at whitespace.
/// Runs of whitespace (including newlines) collapse into single spaces. A word that is
/// wider than `max_width` on its own is kept intact on its own line rather than split.
pub fn wrap_text(text: &str, font: BuiltinFont, size: Pt, max_width: Pt) -> Vec<TextLine> {
    let space = width_of_text(" ", font, size);
    let mut lines: Vec<TextLine> = Vec::new();

    for word in text.split_whitespace() {
        let word_width = width_of_text(word, font, size);
        match lines.last_mut() {
            Some(line) if line.width + space + word_width <= max_width => {
                line.text.push(' ');
                line.text.push_str(word);
                line.width += space + word_width;
                line.spaces += 1;
            }
            _ => {
                if word_width > max_width {
                    log::debug!("`{word}` is wider than the line ({word_width} > {max_width})");
                }
                lines.push(TextLine {
                    text: word.to_string(),
                    width: word_width,
                    spaces: 0,
                });
            }
        }
    }

    lines
}

/// Wrap and measure a paragraph
pub fn measure_block(text: &str, style: &ParagraphStyle, max_width: Pt) -> TextBlock {
    let lines = wrap_text(text, style.font, style.size, max_width);
    let width = lines.iter().fold(Pt(0.0), |widest, line| widest.max(line.width));
    let height = style.leading * lines.len() as f32;
    TextBlock {
        lines,
        width,
        height,
        max_width,
        style: *style,
    }
}
