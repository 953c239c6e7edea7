use crate::{
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    units::Pt,
    Error,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::BTreeSet;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::render]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its ID
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a bookmark in the document outline pointing at a position on the page with the
    /// given index
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize, top: Pt) {
        self.outline.add_bookmark(title.to_string(), page_index, top);
    }

    /// Render the whole document into bytes. Fonts and graphics states are only written
    /// if at least one page uses them.
    pub fn render(&self) -> Result<Vec<u8>, Error> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let pages: Vec<&Page> = self
            .page_order
            .iter()
            .map(|id| &self.pages[*id])
            .collect();

        let fonts: BTreeSet<_> = pages.iter().flat_map(|page| page.fonts()).collect();
        for font in fonts {
            font.write(&mut refs, &mut writer);
        }

        let alpha_keys: BTreeSet<u16> = pages.iter().flat_map(|page| page.alpha_keys()).collect();
        for key in alpha_keys {
            let alpha = key as f32 / 1000.0;
            let id = refs.gen(RefType::ExtGState(key));
            writer
                .ext_graphics(id)
                .non_stroking_alpha(alpha)
                .stroking_alpha(alpha);
        }

        for (page_index, (page, id)) in pages.iter().zip(page_refs.iter()).enumerate() {
            page.write(&mut refs, *id, page_tree_id, page_index, &mut writer)?;
        }

        let outlines_id = self.outline.write(&mut refs, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        Ok(writer.finish())
    }
}
