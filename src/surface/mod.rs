//! Drawing surfaces: the primitive operations the flow engine renders through.
//!
//! The flow engine never talks to a PDF directly. It decides *where* things go and
//! asks a [`DrawingSurface`] to put them there. Two surfaces are provided:
//!
//! - [`PdfSurface`] accumulates pages into a [`Document`](crate::Document) and writes
//!   the finished PDF to a path when finalized
//! - [`RecordingSurface`] records every call as a [`DrawOp`], which makes layout
//!   decisions easy to inspect and compare
//!
//! Coordinates follow PDF conventions: points, origin at the bottom-left of the page.

mod pdf;
mod recording;

pub use pdf::*;
pub use recording::*;

use crate::colour::{colours, Paint};
use crate::font::BuiltinFont;
use crate::layout::{measure_block, width_of_text, ParagraphStyle, TextBlock};
use crate::rect::Rect;
use crate::units::Pt;
use crate::Error;

/// The capabilities the flow engine needs from a rendering backend.
///
/// Text and shapes are drawn using the current graphics state, which is changed with
/// the `set_*` methods. Wrapped blocks carry their own style.
pub trait DrawingSurface {
    fn set_font(&mut self, font: BuiltinFont, size: Pt);
    fn set_fill_colour(&mut self, paint: Paint);
    fn set_stroke_colour(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: Pt);
    /// Extra space added after every character of subsequent text
    fn set_char_spacing(&mut self, spacing: Pt);

    /// Draw a single line of text with its baseline starting at `(x, y)`
    fn draw_text(&mut self, x: Pt, y: Pt, text: &str);
    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt));
    /// Draw a rectangle with rounded corners. A radius of zero draws square corners.
    fn draw_rounded_rect(&mut self, rect: Rect, radius: Pt, fill: bool, stroke: bool);
    /// Draw a wrapped block with its bottom-left corner at `(x, y)`
    fn draw_block(&mut self, x: Pt, y: Pt, block: &TextBlock);

    /// Mark a position on the current page as a navigation target
    fn bookmark(&mut self, title: &str, top: Pt);

    /// Finish the current page and start drawing on a fresh one
    fn begin_new_page(&mut self);

    /// Flush the document to its destination. A surface can only be finalized once.
    fn finalize(&mut self) -> Result<(), Error>;

    fn measure_text_width(&self, text: &str, font: BuiltinFont, size: Pt) -> Pt {
        width_of_text(text, font, size)
    }

    fn wrap_and_measure(&self, text: &str, style: &ParagraphStyle, max_width: Pt) -> TextBlock {
        measure_block(text, style, max_width)
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn set_font(&mut self, font: BuiltinFont, size: Pt) {
        (**self).set_font(font, size)
    }

    fn set_fill_colour(&mut self, paint: Paint) {
        (**self).set_fill_colour(paint)
    }

    fn set_stroke_colour(&mut self, paint: Paint) {
        (**self).set_stroke_colour(paint)
    }

    fn set_line_width(&mut self, width: Pt) {
        (**self).set_line_width(width)
    }

    fn set_char_spacing(&mut self, spacing: Pt) {
        (**self).set_char_spacing(spacing)
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str) {
        (**self).draw_text(x, y, text)
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        (**self).draw_line(from, to)
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: Pt, fill: bool, stroke: bool) {
        (**self).draw_rounded_rect(rect, radius, fill, stroke)
    }

    fn draw_block(&mut self, x: Pt, y: Pt, block: &TextBlock) {
        (**self).draw_block(x, y, block)
    }

    fn bookmark(&mut self, title: &str, top: Pt) {
        (**self).bookmark(title, top)
    }

    fn begin_new_page(&mut self) {
        (**self).begin_new_page()
    }

    fn finalize(&mut self) -> Result<(), Error> {
        (**self).finalize()
    }

    fn measure_text_width(&self, text: &str, font: BuiltinFont, size: Pt) -> Pt {
        (**self).measure_text_width(text, font, size)
    }

    fn wrap_and_measure(&self, text: &str, style: &ParagraphStyle, max_width: Pt) -> TextBlock {
        (**self).wrap_and_measure(text, style, max_width)
    }
}

/// The graphics state shared by the provided surfaces
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GraphicsState {
    pub font: BuiltinFont,
    pub size: Pt,
    pub fill: Paint,
    pub stroke: Paint,
    pub line_width: Pt,
    pub char_spacing: Pt,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            font: BuiltinFont::Helvetica,
            size: Pt(12.0),
            fill: colours::BLACK.into(),
            stroke: colours::BLACK.into(),
            line_width: Pt(1.0),
            char_spacing: Pt(0.0),
        }
    }
}
