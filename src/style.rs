use crate::colour::{colours, Colour};
use crate::font::BuiltinFont;
use crate::layout::{Alignment, ParagraphStyle};
use crate::units::Pt;
use serde::Deserialize;

/// Which of the two font roles a piece of text is set in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FontRole {
    Bold,
    Body,
}

/// The fonts, sizes and colours used to render a resume. Resolved once when the
/// flow engine is constructed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSet {
    pub bold_font: BuiltinFont,
    pub body_font: BuiltinFont,
    /// Size of the name at the top of the first page
    pub header_size: Pt,
    pub section_size: Pt,
    pub body_size: Pt,
    /// Size of chip labels
    pub small_size: Pt,
    /// Colour of the optional banner across the top of the page
    pub highlight: Colour,
    pub text: Colour,
}

impl Default for StyleSet {
    fn default() -> Self {
        StyleSet {
            bold_font: BuiltinFont::HelveticaBold,
            body_font: BuiltinFont::TimesRoman,
            header_size: Pt(24.0),
            section_size: Pt(16.0),
            body_size: Pt(12.0),
            small_size: Pt(10.0),
            highlight: Colour::new_rgb_bytes(0x1F, 0x4E, 0x79),
            text: colours::BLACK,
        }
    }
}

impl StyleSet {
    pub fn font(&self, role: FontRole) -> BuiltinFont {
        match role {
            FontRole::Bold => self.bold_font,
            FontRole::Body => self.body_font,
        }
    }

    /// Justified body text with the given leading
    pub fn paragraph(&self, leading: Pt) -> ParagraphStyle {
        ParagraphStyle {
            font: self.body_font,
            size: self.body_size,
            leading,
            colour: self.text,
            alignment: Alignment::Justify,
        }
    }
}
