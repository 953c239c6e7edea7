//! The resume data model and the assembler that lays it out.

mod assembler;
mod record;

pub use assembler::*;
pub use record::{date_range, Education, Experience, Header, ResumeRecord};

use crate::config::Config;
use crate::info::Info;
use crate::layout::{FlowEngine, OverflowWarning};
use crate::surface::{DrawingSurface, PdfSurface};
use crate::Result;

/// What a finished render produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub pages: usize,
    /// Paragraphs too tall to fit on a single page
    pub warnings: Vec<OverflowWarning>,
}

/// Lay out `record` onto `surface` and finalize it
pub fn render_resume<S: DrawingSurface>(
    record: &ResumeRecord,
    surface: S,
    config: &Config,
) -> Result<RenderSummary> {
    let mut engine = FlowEngine::new(
        surface,
        config.geometry,
        config.style.clone(),
        config.pagination,
    );
    DocumentAssembler::new(record)
        .with_header_strip(config.header_strip)
        .assemble(&mut engine)?;

    Ok(RenderSummary {
        pages: engine.page_count(),
        warnings: engine.warnings().to_vec(),
    })
}

/// Render `record` to a PDF file at `config.output`
pub fn generate(record: &ResumeRecord, config: &Config) -> Result<RenderSummary> {
    let mut surface = PdfSurface::create(&config.output, &config.geometry);

    let mut info = Info::new();
    info.subject("Resume");
    if let Some(name) = record.header.name.as_deref() {
        info.title(format!("{name} - Resume")).author(name);
    }
    surface.set_info(info);

    let summary = render_resume(record, surface, config)?;
    log::info!(
        "wrote {} page(s) to {}",
        summary.pages,
        config.output.display()
    );
    Ok(summary)
}
