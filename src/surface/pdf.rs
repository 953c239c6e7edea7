use super::{DrawingSurface, GraphicsState};
use crate::document::Document;
use crate::info::Info;
use crate::layout::{PageGeometry, TextBlock};
use crate::page::{LineLayout, Page, ShapeLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::Error;
use std::path::{Path, PathBuf};

/// A surface that builds a PDF [Document] in memory and writes it to `path` when
/// finalized. Nothing touches the filesystem before [DrawingSurface::finalize].
pub struct PdfSurface {
    path: PathBuf,
    size: PageSize,
    margin: Pt,
    document: Document,
    current: Page,
    state: GraphicsState,
    finalized: bool,
}

impl PdfSurface {
    pub fn create<P: Into<PathBuf>>(path: P, geometry: &PageGeometry) -> PdfSurface {
        let size = geometry.size();
        let margin = geometry.margin();
        PdfSurface {
            path: path.into(),
            size,
            margin,
            document: Document::default(),
            current: Page::new(size, Some(margin)),
            state: GraphicsState::default(),
            finalized: false,
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pages started so far, including the one currently being drawn
    pub fn page_count(&self) -> usize {
        if self.finalized {
            self.document.page_count()
        } else {
            self.document.page_count() + 1
        }
    }

    fn span(&self, x: Pt, y: Pt, text: &str) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                font: self.state.font,
                size: self.state.size,
            },
            colour: self.state.fill,
            coords: (x, y),
            char_spacing: self.state.char_spacing,
            word_spacing: Pt(0.0),
        }
    }
}

impl DrawingSurface for PdfSurface {
    fn set_font(&mut self, font: crate::BuiltinFont, size: Pt) {
        self.state.font = font;
        self.state.size = size;
    }

    fn set_fill_colour(&mut self, paint: crate::Paint) {
        self.state.fill = paint;
    }

    fn set_stroke_colour(&mut self, paint: crate::Paint) {
        self.state.stroke = paint;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.state.line_width = width;
    }

    fn set_char_spacing(&mut self, spacing: Pt) {
        self.state.char_spacing = spacing;
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str) {
        let span = self.span(x, y, text);
        self.current.add_span(span);
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        self.current.add_line(LineLayout {
            from,
            to,
            colour: self.state.stroke,
            width: self.state.line_width,
        });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: Pt, fill: bool, stroke: bool) {
        self.current.add_shape(ShapeLayout {
            rect,
            radius,
            fill: fill.then_some(self.state.fill),
            stroke: stroke.then_some(self.state.stroke),
            line_width: self.state.line_width,
        });
    }

    fn draw_block(&mut self, x: Pt, y: Pt, block: &TextBlock) {
        let top = y + block.height;
        let style = &block.style;
        let spans = block
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| SpanLayout {
                text: line.text.clone(),
                font: SpanFont {
                    font: style.font,
                    size: style.size,
                },
                colour: style.colour.into(),
                coords: (x, block.baseline(top, i)),
                char_spacing: Pt(0.0),
                word_spacing: block.word_spacing(i),
            })
            .collect();
        self.current.add_spans(spans);
    }

    fn bookmark(&mut self, title: &str, top: Pt) {
        let page_index = self.document.page_count();
        self.document.add_bookmark(title, page_index, top);
    }

    fn begin_new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Page::new(self.size, Some(self.margin)));
        self.document.add_page(finished);
    }

    fn finalize(&mut self) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.finalized = true;

        // the page being drawn is always kept, even if a page break just emptied it
        let last = std::mem::replace(&mut self.current, Page::new(self.size, Some(self.margin)));
        self.document.add_page(last);

        let bytes = self.document.render()?;
        std::fs::write(&self.path, bytes).map_err(|source| Error::SurfaceWrite {
            path: self.path.clone(),
            source,
        })?;
        log::debug!(
            "wrote {} page(s) to {}",
            self.document.page_count(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    #[test]
    fn finalize_writes_every_page_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.pdf");
        let mut surface = PdfSurface::create(&path, &PageGeometry::default());

        surface.set_fill_colour(colours::BLACK.into());
        surface.draw_text(Pt(50.0), Pt(700.0), "first");
        surface.begin_new_page();
        surface.draw_text(Pt(50.0), Pt(700.0), "second");
        assert_eq!(surface.page_count(), 2);

        surface.finalize().expect("writes");
        assert_eq!(surface.page_count(), 2);
        let bytes = std::fs::read(&path).expect("file exists");
        assert!(bytes.starts_with(b"%PDF-"));

        assert!(matches!(surface.finalize(), Err(Error::AlreadyFinalized)));
    }

    #[test]
    fn unwritable_destinations_surface_as_write_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("out.pdf");
        let mut surface = PdfSurface::create(&path, &PageGeometry::default());

        match surface.finalize() {
            Err(Error::SurfaceWrite { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected a write error, got {other:?}"),
        }
    }
}
