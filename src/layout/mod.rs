//! Vertical flow layout: page geometry, text wrapping, and the cursor-driven
//! [`FlowEngine`] that places content onto pages.
//!
//! The engine keeps a single [`LayoutCursor`] that moves down the page as content is
//! placed. When a page fills up the engine asks its [`DrawingSurface`](crate::surface::DrawingSurface)
//! for a new page and resets the cursor to the top margin. *When* a page counts as
//! full is decided by the [`PaginationPolicy`].
//!
//! # Example
//!
//! ```
//! use resume_pdf::layout::{FlowEngine, PageGeometry, PaginationPolicy};
//! use resume_pdf::surface::RecordingSurface;
//! use resume_pdf::{Pt, StyleSet};
//!
//! let mut surface = RecordingSurface::new();
//! let mut engine = FlowEngine::new(
//!     &mut surface,
//!     PageGeometry::default(),
//!     StyleSet::default(),
//!     PaginationPolicy::Proactive,
//! );
//!
//! engine.draw_section_header("Skills");
//! engine.advance(Pt(10.0));
//! engine.draw_tag_row(&["Rust", "PDF", "Typesetting"]);
//! engine.finish().expect("surface finalizes");
//! drop(engine);
//!
//! assert_eq!(surface.rects().count(), 3);
//! ```

mod flow;
mod geometry;
mod text;

pub use flow::*;
pub use geometry::*;
pub use text::*;
