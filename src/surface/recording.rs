use super::{DrawingSurface, GraphicsState};
use crate::colour::Paint;
use crate::font::BuiltinFont;
use crate::layout::TextBlock;
use crate::rect::Rect;
use crate::units::Pt;
use crate::Error;
use std::path::PathBuf;

/// A single call made on a [RecordingSurface], together with the graphics state
/// that applied to it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        x: Pt,
        y: Pt,
        text: String,
        font: BuiltinFont,
        size: Pt,
        fill: Paint,
        char_spacing: Pt,
    },
    Line {
        page: usize,
        from: (Pt, Pt),
        to: (Pt, Pt),
        stroke: Paint,
        width: Pt,
    },
    Rect {
        page: usize,
        rect: Rect,
        radius: Pt,
        fill: Option<Paint>,
        stroke: Option<Paint>,
    },
    Block {
        page: usize,
        x: Pt,
        y: Pt,
        block: TextBlock,
    },
    Bookmark {
        page: usize,
        title: String,
        top: Pt,
    },
    NewPage,
    Finalize,
}

/// A surface that draws nothing and remembers everything.
///
/// Useful for checking where the flow engine put things, and for comparing two
/// renders of the same resume.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    state: GraphicsState,
    page: usize,
    finalize_count: usize,
    fail_finalize: bool,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }

    /// A surface whose [finalize](DrawingSurface::finalize) always fails with a
    /// write error, as if the destination were unwritable
    pub fn failing() -> RecordingSurface {
        RecordingSurface {
            fail_finalize: true,
            ..RecordingSurface::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// How many times finalization was requested, including failed attempts
    pub fn finalize_count(&self) -> usize {
        self.finalize_count
    }

    /// Every drawn string with its page and position
    pub fn texts(&self) -> impl Iterator<Item = (usize, Pt, Pt, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                page, x, y, text, ..
            } => Some((*page, *x, *y, text.as_str())),
            _ => None,
        })
    }

    /// Every wrapped block as `(page, x, top, block)`
    pub fn blocks(&self) -> impl Iterator<Item = (usize, Pt, Pt, &TextBlock)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Block { page, x, y, block } => Some((*page, *x, *y + block.height, block)),
            _ => None,
        })
    }

    /// Every rectangle with the page it was drawn on
    pub fn rects(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { page, rect, .. } => Some((*page, *rect)),
            _ => None,
        })
    }

    /// The full text of every line drawn, single lines and wrapped block lines alike,
    /// in drawing order
    pub fn rendered_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .flat_map(|op| match op {
                DrawOp::Text { text, .. } => vec![text.as_str()],
                DrawOp::Block { block, .. } => {
                    block.lines.iter().map(|line| line.text.as_str()).collect()
                }
                _ => Vec::new(),
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_font(&mut self, font: BuiltinFont, size: Pt) {
        self.state.font = font;
        self.state.size = size;
    }

    fn set_fill_colour(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke_colour(&mut self, paint: Paint) {
        self.state.stroke = paint;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.state.line_width = width;
    }

    fn set_char_spacing(&mut self, spacing: Pt) {
        self.state.char_spacing = spacing;
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            x,
            y,
            text: text.to_string(),
            font: self.state.font,
            size: self.state.size,
            fill: self.state.fill,
            char_spacing: self.state.char_spacing,
        });
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        self.ops.push(DrawOp::Line {
            page: self.page,
            from,
            to,
            stroke: self.state.stroke,
            width: self.state.line_width,
        });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: Pt, fill: bool, stroke: bool) {
        self.ops.push(DrawOp::Rect {
            page: self.page,
            rect,
            radius,
            fill: fill.then_some(self.state.fill),
            stroke: stroke.then_some(self.state.stroke),
        });
    }

    fn draw_block(&mut self, x: Pt, y: Pt, block: &TextBlock) {
        self.ops.push(DrawOp::Block {
            page: self.page,
            x,
            y,
            block: block.clone(),
        });
    }

    fn bookmark(&mut self, title: &str, top: Pt) {
        self.ops.push(DrawOp::Bookmark {
            page: self.page,
            title: title.to_string(),
            top,
        });
    }

    fn begin_new_page(&mut self) {
        self.page += 1;
        self.ops.push(DrawOp::NewPage);
    }

    fn finalize(&mut self) -> Result<(), Error> {
        self.finalize_count += 1;
        self.ops.push(DrawOp::Finalize);
        if self.fail_finalize {
            return Err(Error::SurfaceWrite {
                path: PathBuf::from("<recording>"),
                source: std::io::Error::other("finalize disabled"),
            });
        }
        if self.finalize_count > 1 {
            return Err(Error::AlreadyFinalized);
        }
        Ok(())
    }
}
