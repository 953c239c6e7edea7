use pdf_writer::{Pdf, Ref, TextStr};

use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;

/// The document outline (bookmarks panel). Entries form a flat list in the
/// order they were added.
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// 0-based index of the page the entry points at
    pub page_index: usize,
    /// Vertical position on the page to scroll to
    pub top: Pt,
}

impl Outline {
    pub fn add_bookmark(&mut self, title: String, page_index: usize, top: Pt) {
        self.entries.push(OutlineEntry {
            title,
            page_index,
            top,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the outline root and its items. Page references must already be generated;
    /// entries pointing at pages that don't exist are dropped.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<Ref> {
        let entries: Vec<(&OutlineEntry, Ref)> = self
            .entries
            .iter()
            .filter_map(|entry| match refs.get(RefType::Page(entry.page_index)) {
                Some(page_ref) => Some((entry, page_ref)),
                None => {
                    log::warn!(
                        "dropping bookmark `{}`: page {} does not exist",
                        entry.title,
                        entry.page_index
                    );
                    None
                }
            })
            .collect();
        if entries.is_empty() {
            return None;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<Ref> = (0..entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        writer
            .outline(outlines_id)
            .first(item_ids[0])
            .last(item_ids[item_ids.len() - 1])
            .count(item_ids.len() as i32);

        for (i, (entry, page_ref)) in entries.into_iter().enumerate() {
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if i + 1 < item_ids.len() {
                item.next(item_ids[i + 1]);
            }
            item.dest().page(page_ref).xyz(0.0, entry.top.0, None);
        }

        Some(outlines_id)
    }
}
