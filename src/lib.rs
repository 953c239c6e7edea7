//! Render structured resumes into paginated PDF documents.
//!
//! A [`ResumeRecord`](resume::ResumeRecord) is laid out top to bottom by a
//! [`FlowEngine`](layout::FlowEngine), which tracks a vertical cursor, wraps paragraphs,
//! lays out skill chips, and starts new pages as they fill up. Everything is drawn
//! through a [`DrawingSurface`](surface::DrawingSurface); [`PdfSurface`](surface::PdfSurface)
//! writes a PDF using the standard Helvetica and Times fonts.
//!
//! ```no_run
//! use resume_pdf::{resume::{generate, ResumeRecord}, Config};
//!
//! let record = ResumeRecord::from_path("resume.json")?;
//! let summary = generate(&record, &Config::default())?;
//! println!("{} page(s)", summary.pages);
//! # Ok::<(), resume_pdf::Error>(())
//! ```

mod colour;
pub use colour::*;

mod config;
pub use config::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Page geometry, text wrapping, and the flow engine that places content on pages
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// The resume model and the assembler that draws it
pub mod resume;

mod style;
pub use style::*;

pub mod surface;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
