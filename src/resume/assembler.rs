use super::record::{required, text, ResumeRecord};
use crate::layout::FlowEngine;
use crate::style::FontRole;
use crate::surface::DrawingSurface;
use crate::units::Pt;
use crate::Result;

/// Extra space between the name and the first contact line, on top of the margin
const NAME_GAP: Pt = Pt(5.0);
/// Space between the skills title and the first row of chips
const SKILLS_GAP: Pt = Pt(10.0);
const EDUCATION_GAP: Pt = Pt(5.0);
const DESIGNATION_GAP: Pt = Pt(2.0);
/// Pulls a role's description up towards its date line
const ROLE_TIGHTENING: Pt = Pt(-10.0);

/// Drives a [FlowEngine] through the sections of a [ResumeRecord] in order: header,
/// about, skills, education, work experience.
pub struct DocumentAssembler<'r> {
    record: &'r ResumeRecord,
    header_strip: bool,
}

impl<'r> DocumentAssembler<'r> {
    pub fn new(record: &'r ResumeRecord) -> DocumentAssembler<'r> {
        DocumentAssembler {
            record,
            header_strip: false,
        }
    }

    /// Draw a band in the highlight colour above the header
    pub fn with_header_strip(mut self, header_strip: bool) -> Self {
        self.header_strip = header_strip;
        self
    }

    /// Draw every section, then finalize the engine's surface.
    ///
    /// The surface is finalized even when a section fails. If both drawing and
    /// finalizing fail, the drawing error is returned.
    pub fn assemble<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) -> Result<()> {
        let drawn = self.draw_sections(engine);
        let finished = engine.finish();
        match (drawn, finished) {
            (Err(e), Err(finalize)) => {
                log::error!("failed to finalize after an error: {finalize}");
                Err(e)
            }
            (drawn, finished) => drawn.and(finished),
        }
    }

    fn draw_sections<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) -> Result<()> {
        if self.header_strip {
            engine.draw_header_strip();
        }
        self.draw_header(engine)?;
        self.draw_about(engine);
        self.draw_skills(engine);
        self.draw_education(engine)?;
        self.draw_experience(engine)?;
        Ok(())
    }

    /// Name, contact details, and a rule underneath
    pub fn draw_header<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) -> Result<()> {
        let header = &self.record.header;
        let name = required(&header.name, "header.name")?;
        let margin = engine.geometry().margin();
        let style = engine.style().clone();

        let y = engine.cursor().y() - margin;
        let baseline = engine.clamp_baseline(y, FontRole::Bold, style.header_size);
        engine.draw_text_at(margin, baseline, FontRole::Bold, style.header_size, name);
        engine.advance(margin + NAME_GAP + (y - baseline));

        let contacts = [
            ("Email", &header.email),
            ("Phone", &header.phone),
            ("Linkedin", &header.linkedin),
            ("Website", &header.website),
        ];
        for (label, value) in contacts {
            match text(value) {
                Some(value) => {
                    engine.draw_text_line(FontRole::Body, style.body_size, &format!("{label}: {value}"));
                    engine.advance(Pt(0.0));
                }
                None => log::trace!("no {label} given, skipping"),
            }
        }
        engine.draw_rule();
        Ok(())
    }

    pub fn draw_about<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) {
        let Some(about) = text(&self.record.header.about) else {
            log::trace!("no about text, skipping section");
            return;
        };
        log::debug!("drawing about section");
        engine.draw_section_header("About");
        engine.draw_wrapped_paragraph(about);
    }

    pub fn draw_skills<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) {
        let skills: Vec<&str> = self
            .record
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if skills.is_empty() {
            log::trace!("no skills, skipping section");
            return;
        }
        log::debug!("drawing {} skill(s)", skills.len());
        engine.draw_section_header("Skills");
        engine.advance(SKILLS_GAP);
        engine.draw_tag_row(&skills);
    }

    pub fn draw_education<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) -> Result<()> {
        if self.record.education.is_empty() {
            log::trace!("no education, skipping section");
            return Ok(());
        }
        log::debug!("drawing {} education entries", self.record.education.len());
        engine.draw_section_header("Education");
        let size = engine.style().body_size;

        for (i, entry) in self.record.education.iter().enumerate() {
            engine.advance(EDUCATION_GAP);
            let course = required(&entry.course, &format!("education[{i}].course"))?;
            engine.draw_text_line(FontRole::Bold, size, course);

            engine.advance(Pt(0.0));
            let university = required(&entry.university, &format!("education[{i}].university"))?;
            engine.draw_text_line(FontRole::Body, size, university);

            engine.advance(Pt(0.0));
            if let Some(dates) = entry.date_range() {
                engine.draw_text_line(FontRole::Body, size, &dates);
            }
        }
        Ok(())
    }

    pub fn draw_experience<S: DrawingSurface>(&self, engine: &mut FlowEngine<S>) -> Result<()> {
        if self.record.experience.is_empty() {
            log::trace!("no experience, skipping section");
            return Ok(());
        }
        log::debug!("drawing {} experience entries", self.record.experience.len());
        engine.draw_section_header("Work Experience");
        let size = engine.style().body_size;

        for (i, entry) in self.record.experience.iter().enumerate() {
            engine.advance(Pt(0.0));
            let designation = required(&entry.designation, &format!("experience[{i}].designation"))?;
            engine.draw_text_line(FontRole::Bold, size, designation);

            engine.advance(DESIGNATION_GAP);
            let organization =
                required(&entry.organization, &format!("experience[{i}].organization"))?;
            engine.draw_text_line(FontRole::Body, size, organization);

            engine.advance(Pt(0.0));
            if let Some(dates) = entry.date_range() {
                engine.draw_text_line(FontRole::Body, size, &dates);
            }

            engine.advance(ROLE_TIGHTENING);
            if let Some(about) = text(&entry.about_role) {
                engine.draw_wrapped_paragraph(about);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageGeometry, PaginationPolicy};
    use crate::resume::{Education, Experience, Header};
    use crate::surface::{DrawOp, RecordingSurface};
    use crate::{Error, StyleSet};

    fn record() -> ResumeRecord {
        ResumeRecord {
            header: Header {
                name: Some("Grace Hopper".into()),
                email: Some("grace@example.com".into()),
                phone: Some("555 0100".into()),
                linkedin: None,
                website: Some("example.com".into()),
                about: Some("Computer scientist.\nCompiler pioneer.".into()),
            },
            skills: vec!["COBOL".into(), "  ".into(), "Compilers".into()],
            education: vec![Education {
                course: Some("PhD Mathematics".into()),
                university: Some("Yale".into()),
                from_date: Some("1930".into()),
                to_date: Some("1934".into()),
            }],
            experience: vec![Experience {
                designation: Some("Rear Admiral".into()),
                organization: Some("US Navy".into()),
                from_date: Some("1943".into()),
                to_date: None,
                currently_working: true,
                about_role: Some("Led the development of programming languages.".into()),
            }],
        }
    }

    fn assemble(record: &ResumeRecord, surface: &mut RecordingSurface) -> Result<()> {
        let mut engine = FlowEngine::new(
            surface,
            PageGeometry::default(),
            StyleSet::default(),
            PaginationPolicy::Lagging,
        );
        DocumentAssembler::new(record).assemble(&mut engine)
    }

    #[test]
    fn sections_are_drawn_in_order() {
        let mut surface = RecordingSurface::new();
        assemble(&record(), &mut surface).expect("renders");

        let titles: Vec<_> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Bookmark { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["About", "Skills", "Education", "Work Experience"]);

        let lines = surface.rendered_lines();
        assert_eq!(lines[0], "Grace Hopper");
        assert_eq!(
            &lines[1..4],
            &["Email: grace@example.com", "Phone: 555 0100", "Website: example.com"]
        );
        assert!(lines.contains(&"1930 to 1934"));
        assert!(lines.contains(&"1943 to present"));
        assert!(!lines.iter().any(|l| l.starts_with("Linkedin")));
        assert_eq!(surface.rects().count(), 2);
        assert_eq!(surface.finalize_count(), 1);
    }

    #[test]
    fn header_places_the_name_one_margin_below_the_top() {
        let mut surface = RecordingSurface::new();
        assemble(&record(), &mut surface).expect("renders");
        let (_, x, y, _) = surface.texts().next().expect("name drawn");
        assert_eq!((x, y), (Pt(50.0), PageGeometry::default().height() - Pt(50.0)));
        assert!(surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Line { width, .. } if *width == Pt(0.5))));
    }

    #[test]
    fn proactive_header_keeps_the_name_inside_the_margin() {
        let mut surface = RecordingSurface::new();
        {
            let mut engine = FlowEngine::new(
                &mut surface,
                PageGeometry::default(),
                StyleSet::default(),
                PaginationPolicy::Proactive,
            );
            DocumentAssembler::new(&record()).assemble(&mut engine).expect("renders");
        }
        let style = StyleSet::default();
        let top = PageGeometry::default().top();
        let mut texts = surface.texts();
        let (_, _, name_y, _) = texts.next().expect("name drawn");
        let (_, _, email_y, email) = texts.next().expect("email drawn");
        assert_eq!(email, "Email: grace@example.com");

        let bold = style.font(FontRole::Bold);
        assert!(name_y + bold.ascent(style.header_size) <= top + Pt(0.01));
        let body = style.font(FontRole::Body);
        assert!(email_y + body.ascent(style.body_size) < name_y + bold.descent(style.header_size));
    }

    #[test]
    fn empty_sections_are_skipped() {
        let record = ResumeRecord {
            header: Header {
                name: Some("Nobody".into()),
                ..Header::default()
            },
            ..ResumeRecord::default()
        };
        let mut surface = RecordingSurface::new();
        assemble(&record, &mut surface).expect("renders");
        assert!(!surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Bookmark { .. })));
        assert_eq!(surface.rendered_lines(), vec!["Nobody"]);
    }

    #[test]
    fn missing_required_fields_still_finalize() {
        let mut record = record();
        record.experience[0].designation = None;
        let mut surface = RecordingSurface::new();

        match assemble(&record, &mut surface) {
            Err(Error::MissingField(path)) => assert_eq!(path, "experience[0].designation"),
            other => panic!("expected a missing field, got {other:?}"),
        }
        assert_eq!(surface.finalize_count(), 1);
    }

    #[test]
    fn drawing_errors_win_over_finalize_errors() {
        let mut record = record();
        record.header.name = Some(" ".into());
        let mut surface = RecordingSurface::failing();

        assert!(matches!(
            assemble(&record, &mut surface),
            Err(Error::MissingField(_))
        ));
        assert_eq!(surface.finalize_count(), 1);
    }

    #[test]
    fn finalize_errors_are_reported() {
        let mut surface = RecordingSurface::failing();
        assert!(matches!(
            assemble(&record(), &mut surface),
            Err(Error::SurfaceWrite { .. })
        ));
        assert_eq!(surface.finalize_count(), 1);
    }
}
