use super::PageGeometry;
use crate::colour::{colours, Paint};
use crate::rect::Rect;
use crate::style::{FontRole, StyleSet};
use crate::surface::DrawingSurface;
use crate::units::Pt;
use crate::Error;
use serde::Deserialize;

/// Height of the coloured banner drawn by [FlowEngine::draw_header_strip]
pub const HEADER_STRIP_HEIGHT: Pt = Pt(10.0);
/// Extra space added before a section title and removed again after it
pub const SECTION_PADDING: Pt = Pt(10.0);
/// Horizontal padding between a chip's edge and its label
pub const CHIP_PADDING: Pt = Pt(5.0);
pub const CHIP_HEIGHT: Pt = Pt(20.0);
pub const CHIP_RADIUS: Pt = Pt(8.0);
/// Horizontal space between neighbouring chips
pub const CHIP_GAP: Pt = Pt(10.0);
/// Extra space added when a row of chips wraps
pub const CHIP_ROW_GAP: Pt = Pt(10.0);
/// How far the first chip of a row is indented from the margin
pub const CHIP_INSET: Pt = Pt(5.0);
/// Height of a chip's label baseline above its bottom edge
pub const CHIP_LABEL_RISE: Pt = Pt(6.0);
pub const CHIP_ALPHA: f32 = 0.3;
pub const RULE_WIDTH: Pt = Pt(0.5);
pub const SECTION_CHAR_SPACING: Pt = Pt(1.0);

/// When the cursor decides that the current page is full
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationPolicy {
    /// Break when the cursor is *already* at or below the bottom margin before moving.
    /// Content may be placed up to one step past the margin before the break happens.
    #[default]
    Lagging,
    /// Break when moving would put the cursor at or below the bottom margin
    Proactive,
}

/// What an [advance](FlowEngine::advance) did to the cursor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved,
    PageBreak,
}

/// The vertical write position on the current page, measured up from the bottom edge
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    y: Pt,
}

impl LayoutCursor {
    pub fn y(&self) -> Pt {
        self.y
    }
}

/// A block that was taller than an entire page body. It was drawn anyway and
/// overflows its page.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverflowWarning {
    /// Zero-based index of the page the block was drawn on
    pub page: usize,
    pub block_height: Pt,
    pub available_height: Pt,
}

/// Places content top to bottom on fixed-size pages, starting new pages as they
/// fill up.
///
/// The engine owns the [LayoutCursor] and is the only thing that moves it. All
/// drawing goes through the [DrawingSurface] it was constructed with. The surface
/// is finalized exactly once, either by [FlowEngine::finish] or, failing that,
/// when the engine is dropped.
pub struct FlowEngine<S: DrawingSurface> {
    surface: S,
    geometry: PageGeometry,
    style: StyleSet,
    policy: PaginationPolicy,
    cursor: LayoutCursor,
    page_index: usize,
    warnings: Vec<OverflowWarning>,
    finished: bool,
}

impl<S: DrawingSurface> FlowEngine<S> {
    pub fn new(
        surface: S,
        geometry: PageGeometry,
        style: StyleSet,
        policy: PaginationPolicy,
    ) -> FlowEngine<S> {
        FlowEngine {
            surface,
            cursor: LayoutCursor {
                y: geometry.height(),
            },
            geometry,
            style,
            policy,
            page_index: 0,
            warnings: Vec::new(),
            finished: false,
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    /// Zero-based index of the page currently being drawn
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        self.page_index + 1
    }

    pub fn warnings(&self) -> &[OverflowWarning] {
        &self.warnings
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &StyleSet {
        &self.style
    }

    pub fn policy(&self) -> PaginationPolicy {
        self.policy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Move the cursor down by one line plus `extra`, or start a new page if the
    /// current one is full. Negative `extra` tightens the spacing.
    pub fn advance(&mut self, extra: Pt) -> Advance {
        let step = self.geometry.line_spacing() + extra;
        let margin = self.geometry.margin();
        let full = match self.policy {
            PaginationPolicy::Lagging => self.cursor.y <= margin,
            PaginationPolicy::Proactive => self.cursor.y - step <= margin,
        };

        if full {
            self.page_break();
            Advance::PageBreak
        } else {
            self.cursor.y -= step;
            Advance::Moved
        }
    }

    fn page_break(&mut self) {
        self.surface.begin_new_page();
        self.page_index += 1;
        self.cursor.y = self.geometry.top();
        log::debug!("page break, now on page {}", self.page_count());
    }

    fn move_down(&mut self, distance: Pt) {
        self.cursor.y -= distance;
    }

    /// The baseline closest to `y` at which a line of `role` text at `size` keeps its
    /// glyphs below the top margin. Under [PaginationPolicy::Lagging] this is always `y`.
    pub fn clamp_baseline(&self, y: Pt, role: FontRole, size: Pt) -> Pt {
        match self.policy {
            PaginationPolicy::Lagging => y,
            PaginationPolicy::Proactive => {
                let ceiling = self.geometry.top() - self.style.font(role).ascent(size);
                if y > ceiling {
                    ceiling
                } else {
                    y
                }
            }
        }
    }

    /// Under [PaginationPolicy::Proactive], move the cursor so a line set on it has
    /// its ascenders below the top margin and its descenders above the bottom one
    fn fit_line(&mut self, role: FontRole, size: Pt) {
        if self.policy != PaginationPolicy::Proactive {
            return;
        }
        let descent = self.style.font(role).descent(size);
        if self.cursor.y + descent < self.geometry.margin() {
            self.page_break();
        }
        let baseline = self.clamp_baseline(self.cursor.y, role, size);
        self.move_down(self.cursor.y - baseline);
    }

    /// Fill a band in the highlight colour across the full width of the page, with
    /// its top at the cursor
    pub fn draw_header_strip(&mut self) {
        let rect = Rect::from_xywh(
            Pt(0.0),
            self.cursor.y - HEADER_STRIP_HEIGHT,
            self.geometry.width(),
            HEADER_STRIP_HEIGHT,
        );
        self.surface.set_fill_colour(self.style.highlight.into());
        self.surface.draw_rounded_rect(rect, Pt(0.0), true, false);
        self.move_down(HEADER_STRIP_HEIGHT);
    }

    /// Draw a section title and register it as a bookmark
    pub fn draw_section_header(&mut self, text: &str) {
        self.advance(SECTION_PADDING);
        self.fit_line(FontRole::Bold, self.style.section_size);

        let (x, y) = (self.geometry.margin(), self.cursor.y);
        self.surface.bookmark(text, y + self.style.section_size);
        self.surface
            .set_font(self.style.font(FontRole::Bold), self.style.section_size);
        self.surface.set_fill_colour(self.style.text.into());
        self.surface.set_char_spacing(SECTION_CHAR_SPACING);
        self.surface.draw_text(x, y, text);
        self.surface.set_char_spacing(Pt(0.0));

        self.advance(-SECTION_PADDING);
    }

    /// Draw a single line of text with its baseline at `(x, y)`. The cursor is not moved.
    pub fn draw_text_at(&mut self, x: Pt, y: Pt, role: FontRole, size: Pt, text: &str) {
        self.surface.set_font(self.style.font(role), size);
        self.surface.set_fill_colour(self.style.text.into());
        self.surface.draw_text(x, y, text);
    }

    /// Draw a single line of text at the left margin on the cursor's baseline
    pub fn draw_text_line(&mut self, role: FontRole, size: Pt, text: &str) {
        self.fit_line(role, size);
        let (x, y) = (self.geometry.margin(), self.cursor.y);
        self.draw_text_at(x, y, role, size, text);
    }

    /// Draw a thin horizontal rule between the margins at the cursor
    pub fn draw_rule(&mut self) {
        let margin = self.geometry.margin();
        let y = self.cursor.y;
        self.surface.set_stroke_colour(self.style.text.into());
        self.surface.set_line_width(RULE_WIDTH);
        self.surface
            .draw_line((margin, y), (self.geometry.width() - margin, y));
    }

    /// Draw justified body text wrapped to the width between the margins.
    ///
    /// Every line of `text` (separated by `\n`, `\r\n`, or `\r`) becomes its own block.
    /// A block that does not fit above the bottom margin is moved to a new page first,
    /// so blocks are never split across pages. The cursor ends up directly below the
    /// last block.
    pub fn draw_wrapped_paragraph(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let style = self.style.paragraph(self.geometry.line_spacing());
        let max_width = self.geometry.usable_width();

        for line in text.split('\n') {
            let block = self.surface.wrap_and_measure(line, &style, max_width);
            if block.is_empty() {
                continue;
            }
            let height = block.height;

            if self.cursor.y <= self.geometry.margin() + height {
                self.page_break();
            }

            let available = self.geometry.body_height();
            if height > available {
                log::warn!(
                    "a paragraph {height} tall does not fit on one page ({available} available)"
                );
                self.warnings.push(OverflowWarning {
                    page: self.page_index,
                    block_height: height,
                    available_height: available,
                });
            }

            self.surface
                .draw_block(self.geometry.margin(), self.cursor.y - height, &block);
            self.advance(height - self.geometry.line_spacing());
        }
    }

    /// Lay out labelled chips left to right, wrapping onto new rows at the right margin.
    ///
    /// The bottom of the first row sits at the cursor. Row wrapping advances the
    /// cursor, so a full page continues the chips on the next one.
    pub fn draw_tag_row<T: AsRef<str>>(&mut self, tags: &[T]) {
        let font = self.style.font(FontRole::Body);
        let size = self.style.small_size;
        let start = self.geometry.margin() + CHIP_INSET;
        let right = self.geometry.width() - self.geometry.margin();
        let paint = Paint::new(colours::CHIP_GREY, CHIP_ALPHA);

        // keep the first row below the top margin
        let ceiling = self.geometry.top() - CHIP_HEIGHT;
        if self.cursor.y > ceiling {
            let overshoot = self.cursor.y - ceiling;
            self.move_down(overshoot);
        }

        let mut x = start;
        for tag in tags {
            let tag = tag.as_ref();
            let width = self.surface.measure_text_width(tag, font, size) + CHIP_PADDING * 2.0;

            if x + width > right && x > start {
                x = start;
                if self.advance(CHIP_ROW_GAP) == Advance::PageBreak {
                    self.move_down(CHIP_HEIGHT);
                }
            }

            let y = self.cursor.y;
            self.draw_bordered_rect(x, y, width, CHIP_HEIGHT, CHIP_RADIUS, paint, Some(paint));
            self.surface.set_font(font, size);
            self.surface.set_fill_colour(self.style.text.into());
            self.surface.draw_text(x + CHIP_PADDING, y + CHIP_LABEL_RISE, tag);

            x += width + CHIP_GAP;
        }
    }

    /// Draw a rounded rectangle with its bottom-left corner at `(x, y)`. The cursor is
    /// not moved.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bordered_rect(
        &mut self,
        x: Pt,
        y: Pt,
        w: Pt,
        h: Pt,
        radius: Pt,
        fill: Paint,
        stroke: Option<Paint>,
    ) {
        self.surface.set_fill_colour(fill);
        if let Some(stroke) = stroke {
            self.surface.set_stroke_colour(stroke);
        }
        self.surface
            .draw_rounded_rect(Rect::from_xywh(x, y, w, h), radius, true, stroke.is_some());
    }

    /// Finalize the surface. Only the first call does anything; later calls return
    /// [Error::AlreadyFinalized].
    pub fn finish(&mut self) -> Result<(), Error> {
        if self.finished {
            return Err(Error::AlreadyFinalized);
        }
        self.finished = true;
        log::debug!("finalizing document with {} page(s)", self.page_count());
        self.surface.finalize()
    }
}

impl<S: DrawingSurface> Drop for FlowEngine<S> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.finish() {
                log::error!("failed to finalize document: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;
    use crate::surface::{DrawOp, RecordingSurface};

    fn geometry(height: f32) -> PageGeometry {
        PageGeometry::new((pagesize::A4.0, Pt(height)), Pt(50.0), Pt(15.0)).unwrap()
    }

    fn engine(
        surface: &mut RecordingSurface,
        height: f32,
        policy: PaginationPolicy,
    ) -> FlowEngine<&mut RecordingSurface> {
        FlowEngine::new(surface, geometry(height), StyleSet::default(), policy)
    }

    #[test]
    fn cursor_starts_at_the_top_edge() {
        let mut surface = RecordingSurface::new();
        let engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
        assert_eq!(engine.cursor().y(), Pt(842.0));
        assert_eq!(engine.page_count(), 1);
    }

    #[test]
    fn lagging_policy_breaks_only_once_past_the_margin() {
        let mut surface = RecordingSurface::new();
        let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Lagging);

        // 200 -> 185 -> ... -> 50
        for _ in 0..10 {
            assert_eq!(engine.advance(Pt(0.0)), Advance::Moved);
        }
        assert_eq!(engine.cursor().y(), Pt(50.0));

        assert_eq!(engine.advance(Pt(0.0)), Advance::PageBreak);
        assert_eq!(engine.cursor().y(), Pt(150.0));
        assert_eq!(engine.page_index(), 1);
    }

    #[test]
    fn proactive_policy_never_crosses_the_margin() {
        let mut surface = RecordingSurface::new();
        let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Proactive);

        for _ in 0..9 {
            assert_eq!(engine.advance(Pt(0.0)), Advance::Moved);
        }
        assert_eq!(engine.cursor().y(), Pt(65.0));

        assert_eq!(engine.advance(Pt(0.0)), Advance::PageBreak);
        assert_eq!(engine.cursor().y(), Pt(150.0));
    }

    #[test]
    fn proactive_lines_after_a_break_sit_below_the_top_margin() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Proactive);
            for _ in 0..10 {
                engine.advance(Pt(0.0));
            }
            assert_eq!(engine.page_index(), 1);
            engine.draw_text_line(FontRole::Bold, Pt(12.0), "MIT");
        }
        let (page, _, y, _) = surface.texts().next().expect("line drawn");
        let ascent = StyleSet::default().font(FontRole::Bold).ascent(Pt(12.0));
        assert_eq!(page, 1);
        assert!(y + ascent <= Pt(150.01), "glyphs reach {}", y + ascent);
        assert!(y < Pt(150.0));
    }

    #[test]
    fn proactive_lines_keep_descenders_above_the_bottom_margin() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Proactive);
            // 200 -> 51
            engine.advance(Pt(134.0));
            assert_eq!(engine.cursor().y(), Pt(51.0));
            engine.draw_text_line(FontRole::Body, Pt(12.0), "low");
            assert_eq!(engine.page_index(), 1);
        }
        let (page, ..) = surface.texts().next().expect("line drawn");
        assert_eq!(page, 1);
    }

    #[test]
    fn lagging_lines_use_the_cursor_as_is() {
        let mut surface = RecordingSurface::new();
        let engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
        assert_eq!(
            engine.clamp_baseline(Pt(792.0), FontRole::Bold, Pt(24.0)),
            Pt(792.0)
        );
    }

    #[test]
    fn advance_applies_extra_spacing() {
        let mut surface = RecordingSurface::new();
        let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
        engine.advance(Pt(10.0));
        assert_eq!(engine.cursor().y(), Pt(817.0));
        engine.advance(Pt(-10.0));
        assert_eq!(engine.cursor().y(), Pt(812.0));
    }

    #[test]
    fn header_strip_spans_the_page_and_moves_the_cursor() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.draw_header_strip();
            assert_eq!(engine.cursor().y(), Pt(832.0));
        }
        let rect = surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Rect { rect, fill, .. } => Some((*rect, *fill)),
                _ => None,
            })
            .expect("strip drawn");
        assert_eq!(rect.0, Rect::from_xywh(Pt(0.0), Pt(832.0), pagesize::A4.0, Pt(10.0)));
        assert_eq!(rect.1, Some(StyleSet::default().highlight.into()));
    }

    #[test]
    fn section_headers_pad_then_tighten() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.draw_section_header("Skills");
            assert_eq!(engine.cursor().y(), Pt(812.0));
        }
        assert!(surface.ops().iter().any(|op| matches!(
            op,
            DrawOp::Text { text, y, char_spacing, .. }
                if text == "Skills" && *y == Pt(817.0) && *char_spacing == Pt(1.0)
        )));
        assert!(surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Bookmark { title, .. } if title == "Skills")));
    }

    #[test]
    fn paragraphs_move_the_cursor_by_their_height() {
        let mut surface = RecordingSurface::new();
        let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
        engine.advance(Pt(0.0));
        let before = engine.cursor().y();
        engine.draw_wrapped_paragraph(&lipsum::lipsum(80));
        let block_height = before - engine.cursor().y();
        assert!(block_height > Pt(15.0));
        assert_eq!(block_height / Pt(15.0), (block_height / Pt(15.0)).round());
    }

    #[test]
    fn empty_paragraph_lines_draw_nothing() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.draw_wrapped_paragraph("\r\n  \n");
            assert_eq!(engine.cursor().y(), Pt(842.0));
        }
        assert_eq!(surface.blocks().count(), 0);
    }

    #[test]
    fn paragraphs_that_do_not_fit_start_a_new_page() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 300.0, PaginationPolicy::Lagging);
            for _ in 0..15 {
                engine.advance(Pt(0.0));
            }
            // cursor at 75, any block of two or more lines needs a new page
            engine.draw_wrapped_paragraph(&lipsum::lipsum(40));
            assert_eq!(engine.page_index(), 1);
        }
        let (page, _, top, _) = surface.blocks().next().expect("block drawn");
        assert_eq!(page, 1);
        assert_eq!(top, Pt(250.0));
    }

    #[test]
    fn oversized_paragraphs_are_drawn_with_a_warning() {
        let mut surface = RecordingSurface::new();
        let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Lagging);
        engine.draw_wrapped_paragraph(&lipsum::lipsum(300));
        assert_eq!(engine.warnings().len(), 1);
        let warning = engine.warnings()[0];
        assert_eq!(warning.page, 1);
        assert_eq!(warning.available_height, Pt(100.0));
        assert!(warning.block_height > warning.available_height);
    }

    #[test]
    fn chip_rows_wrap_at_the_right_margin() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.advance(Pt(0.0));
            let tags: Vec<String> = (0..30).map(|i| format!("skill number {i}")).collect();
            engine.draw_tag_row(&tags);
        }
        let chips: Vec<Rect> = surface.rects().map(|(_, rect)| rect).collect();
        assert_eq!(chips.len(), 30);
        assert!(chips.iter().all(|r| r.x2 <= pagesize::A4.0 - Pt(50.0)));
        assert!(chips.iter().all(|r| r.height() == CHIP_HEIGHT));
        let rows: std::collections::BTreeSet<_> = chips.iter().map(|r| r.y1.0 as i32).collect();
        assert!(rows.len() > 1);
    }

    #[test]
    fn chip_rows_continue_on_a_new_page() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 200.0, PaginationPolicy::Lagging);
            let tags: Vec<String> = (0..80).map(|i| format!("tag {i}")).collect();
            engine.draw_tag_row(&tags);
            assert!(engine.page_index() > 0);
        }
        for (page, rect) in surface.rects() {
            if page > 0 {
                assert!(rect.y2 <= Pt(150.0), "chip above the top margin: {rect:?}");
            }
        }
    }

    #[test]
    fn finish_only_finalizes_once() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.finish().expect("first finish");
            assert!(matches!(engine.finish(), Err(Error::AlreadyFinalized)));
        }
        assert_eq!(surface.finalize_count(), 1);
    }

    #[test]
    fn dropping_an_unfinished_engine_finalizes() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = engine(&mut surface, 842.0, PaginationPolicy::Lagging);
            engine.draw_text_line(FontRole::Body, Pt(12.0), "hello");
        }
        assert_eq!(surface.finalize_count(), 1);
    }
}
