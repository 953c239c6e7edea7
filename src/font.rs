use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Name, Pdf};
use serde::Deserialize;

/// One of the standard PDF base fonts. These fonts are guaranteed to be available in
/// every conforming PDF viewer, so they are referenced by name and never embedded.
/// Glyph advances come from the Adobe font metrics (AFM) files shipped with the
/// base-14 fonts, in 1/1000ths of the font size.
///
/// Text is encoded using `WinAnsiEncoding`; characters outside of that encoding are
/// replaced with `?`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum BuiltinFont {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    #[serde(rename = "Times-Bold")]
    TimesBold,
}

// advances for the printable ASCII range, starting at the space character
const FIRST_CHAR: u8 = 32;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

// advances for the punctuation WinAnsi places in 0x80..=0x9F:
// euro, quoteleft, quoteright, quotedblleft, quotedblright, bullet, endash, emdash
const HELVETICA_PUNCTUATION: [u16; 8] = [556, 222, 222, 333, 333, 350, 556, 1000];
const HELVETICA_BOLD_PUNCTUATION: [u16; 8] = [556, 278, 278, 500, 500, 350, 556, 1000];
const TIMES_ROMAN_PUNCTUATION: [u16; 8] = [500, 333, 333, 444, 444, 350, 500, 1000];
const TIMES_BOLD_PUNCTUATION: [u16; 8] = [500, 333, 333, 500, 500, 350, 500, 1000];

// advances for the Latin-1 range, 0xA0..=0xFF
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[rustfmt::skip]
const TIMES_ROMAN_LATIN1: [u16; 96] = [
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
    400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
    722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
    444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];

#[rustfmt::skip]
const TIMES_BOLD_LATIN1: [u16; 96] = [
    250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
    400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
    722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
    500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
];

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 4] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::TimesRoman,
        BuiltinFont::TimesBold,
    ];

    /// The PostScript name of the font, as written into the PDF
    pub fn base_font_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::TimesBold => "Times-Bold",
        }
    }

    /// Index of the font within the page resource dictionaries (`/F{index}`)
    pub fn index(&self) -> usize {
        match self {
            BuiltinFont::Helvetica => 0,
            BuiltinFont::HelveticaBold => 1,
            BuiltinFont::TimesRoman => 2,
            BuiltinFont::TimesBold => 3,
        }
    }

    fn widths(&self) -> (&'static [u16; 95], &'static [u16; 8], &'static [u16; 96]) {
        match self {
            BuiltinFont::Helvetica => (&HELVETICA_WIDTHS, &HELVETICA_PUNCTUATION, &HELVETICA_LATIN1),
            BuiltinFont::HelveticaBold => (
                &HELVETICA_BOLD_WIDTHS,
                &HELVETICA_BOLD_PUNCTUATION,
                &HELVETICA_BOLD_LATIN1,
            ),
            BuiltinFont::TimesRoman => (
                &TIMES_ROMAN_WIDTHS,
                &TIMES_ROMAN_PUNCTUATION,
                &TIMES_ROMAN_LATIN1,
            ),
            BuiltinFont::TimesBold => (&TIMES_BOLD_WIDTHS, &TIMES_BOLD_PUNCTUATION, &TIMES_BOLD_LATIN1),
        }
    }

    fn ascender(&self) -> f32 {
        match self {
            BuiltinFont::Helvetica | BuiltinFont::HelveticaBold => 718.0,
            BuiltinFont::TimesRoman => 683.0,
            BuiltinFont::TimesBold => 676.0,
        }
    }

    fn descender(&self) -> f32 {
        match self {
            BuiltinFont::Helvetica | BuiltinFont::HelveticaBold => -207.0,
            BuiltinFont::TimesRoman | BuiltinFont::TimesBold => -217.0,
        }
    }

    /// Horizontal advance of a single character, in 1/1000ths of the font size.
    ///
    /// Characters are measured as the glyph they are drawn with, so anything outside
    /// of `WinAnsiEncoding` has the advance of `?`.
    pub fn glyph_advance(&self, ch: char) -> u16 {
        let (ascii, punctuation, latin1) = self.widths();
        match win_ansi_code(ch) {
            code @ 0xA0..=0xFF => latin1[(code - 0xA0) as usize],
            0x80 => punctuation[0],
            code @ 0x91..=0x97 => punctuation[(code - 0x90) as usize],
            code @ FIRST_CHAR..=0x7E => ascii[(code - FIRST_CHAR) as usize],
            _ => ascii[(b'?' - FIRST_CHAR) as usize],
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        size * (self.ascender() / 1000.0)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        size * (self.descender() / 1000.0)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(*self));
        writer
            .type1_font(id)
            .base_font(Name(self.base_font_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Encode text for a simple font using `WinAnsiEncoding`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

fn win_ansi_code(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_come_from_the_afm_tables() {
        assert_eq!(BuiltinFont::TimesRoman.glyph_advance(' '), 250);
        assert_eq!(BuiltinFont::TimesRoman.glyph_advance('~'), 541);
        assert_eq!(BuiltinFont::HelveticaBold.glyph_advance('W'), 944);
        assert_eq!(BuiltinFont::Helvetica.glyph_advance('@'), 1015);
        assert_eq!(BuiltinFont::TimesBold.glyph_advance('%'), 1000);
    }

    #[test]
    fn upper_half_glyphs_use_their_own_advances() {
        assert_eq!(BuiltinFont::TimesRoman.glyph_advance('—'), 1000);
        assert_eq!(BuiltinFont::Helvetica.glyph_advance('•'), 350);
        assert_eq!(BuiltinFont::HelveticaBold.glyph_advance('€'), 556);
        assert_eq!(BuiltinFont::TimesBold.glyph_advance('“'), 500);
        assert_eq!(BuiltinFont::Helvetica.glyph_advance('Æ'), 1000);
        assert_eq!(BuiltinFont::TimesRoman.glyph_advance('×'), 564);
    }

    #[test]
    fn accented_letters_measure_like_their_base_letter() {
        for font in BuiltinFont::ALL {
            assert_eq!(font.glyph_advance('é'), font.glyph_advance('e'));
            assert_eq!(font.glyph_advance('Ü'), font.glyph_advance('U'));
            assert_eq!(font.glyph_advance('ñ'), font.glyph_advance('n'));
            assert_eq!(font.glyph_advance('\u{A0}'), font.glyph_advance(' '));
        }
    }

    #[test]
    fn unencodable_characters_measure_as_question_marks() {
        let font = BuiltinFont::TimesRoman;
        assert_eq!(font.glyph_advance('日'), font.glyph_advance('?'));
        assert_eq!(font.glyph_advance('\t'), font.glyph_advance(' '));
    }

    #[test]
    fn win_ansi_maps_typographic_punctuation() {
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn ascent_scales_with_size() {
        assert!((BuiltinFont::Helvetica.ascent(Pt(10.0)).0 - 7.18).abs() < 1e-4);
        assert!(BuiltinFont::TimesRoman.descent(Pt(12.0)) < Pt(0.0));
    }
}
