use crate::colour::Paint;
use crate::content::render_contents;
use crate::font::BuiltinFont;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::Error;
use pdf_writer::{Finish, Name, Pdf, Ref};
use std::collections::BTreeSet;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub font: BuiltinFont,
    pub size: Pt,
}

/// A single run of text placed at a baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Paint,
    pub coords: (Pt, Pt),
    /// Extra space added after every character
    pub char_spacing: Pt,
    /// Extra space added to every space character, used to justify lines
    pub word_spacing: Pt,
}

/// A (possibly rounded) rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeLayout {
    pub rect: Rect,
    pub radius: Pt,
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub line_width: Pt,
}

/// A straight stroked line segment
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub colour: Paint,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Shape(ShapeLayout),
    Line(LineLayout),
}

/// A single page of the document. Contents are drawn in the order they were added.
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create an empty page. The content box is inset from every edge by `margin`, if given.
    pub fn new(size: PageSize, margin: Option<Pt>) -> Page {
        let (width, height) = size;
        let margin = margin.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margin,
                y1: margin,
                x2: width - margin,
                y2: height - margin,
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    /// Add several spans that share one text block, such as the lines of a paragraph
    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Every font referenced by text on this page
    pub fn fonts(&self) -> BTreeSet<BuiltinFont> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans.iter().map(|s| s.font.font)),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every translucent opacity used on this page, keyed as in [RefType::ExtGState]
    pub fn alpha_keys(&self) -> BTreeSet<u16> {
        let mut keys = BTreeSet::new();
        let mut note = |paint: &Paint| {
            if !paint.is_opaque() {
                keys.insert(paint.alpha_key());
            }
        };
        for content in self.contents.iter() {
            match content {
                PageContents::Text(spans) => spans.iter().for_each(|s| note(&s.colour)),
                PageContents::Shape(shape) => {
                    shape.fill.iter().chain(shape.stroke.iter()).for_each(&mut note)
                }
                PageContents::Line(line) => note(&line.colour),
            }
        }
        keys
    }

    /// Write the page object `id` and its content stream. Font and graphics state refs
    /// must already have been generated by the document.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        id: Ref,
        page_tree: Ref,
        page_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for font in self.fonts() {
            if let Some(font_ref) = refs.get(RefType::Font(font)) {
                resource_fonts.pair(Name(format!("F{}", font.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_states = resources.ext_g_states();
        for key in self.alpha_keys() {
            if let Some(state_ref) = refs.get(RefType::ExtGState(key)) {
                resource_states.pair(Name(format!("GS{key}").as_bytes()), state_ref);
            }
        }
        resource_states.finish();
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents).map_err(Error::Render)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}
