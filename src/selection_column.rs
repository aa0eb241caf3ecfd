//! The column mirroring what has been chosen so far.

use std::rc::Rc;

use crate::{
    category::{CategoryCatalog, CategoryId},
    column_model::{ColumnKind, ColumnModel},
    entry::Entry,
    preset::SelectionColumnPreset,
    types::ScrollDirection,
};

impl ColumnModel {
    pub fn new_selection(category: CategoryId) -> Self {
        Self::new(Rc::new(SelectionColumnPreset::default()))
            .with_kind(ColumnKind::Selection { category })
    }

    pub fn is_selection(&self) -> bool {
        matches!(self.kind(), ColumnKind::Selection { .. })
    }

    fn mirror(&self, entry: &Entry) -> Option<Entry> {
        let ColumnKind::Selection { category } = *self.kind() else {
            return None;
        };

        let mut mirrored = entry.with_category(category);
        mirrored.set_stack_size(entry.chosen_count());
        mirrored.custom_invlet_update(None);
        Some(mirrored)
    }

    /// Reserves room for `entry` as if it was chosen in full.
    pub fn reserve_for(&mut self, entry: &Entry, catalog: &CategoryCatalog) {
        if let Some(mut mirrored) = self.mirror(entry) {
            mirrored.chosen_count_update(entry.get_available_count());
            self.expand_to_fit(&mirrored, catalog);
        }
    }

    /// Inserts, updates or removes the mirror of `entry` after its chosen
    /// count changed.
    pub fn on_change(&mut self, entry: &Entry, catalog: &CategoryCatalog) {
        let Some(mirrored) = self.mirror(entry) else {
            return;
        };

        let position = self.entries().iter().position(|current| *current == mirrored);

        match (position, entry.chosen_count()) {
            (Some(_), 0) => {
                log::debug!("Unselected {:?}", entry.location());
                self.remove_entry(&mirrored);
            }
            (Some(index), count) => {
                if let Some(current) = self.entry_mut(index) {
                    current.set_stack_size(count);
                    current.chosen_count_update(count);
                }
            }
            (None, 0) => return,
            (None, _) => {
                log::debug!("Selected {:?}", entry.location());
                self.add_entry(mirrored.clone(), catalog);
            }
        }

        self.prepare_paging(catalog);

        if let Some(index) = self.entries().iter().position(|current| *current == mirrored) {
            self.select(index, ScrollDirection::Forward);
        }
    }
}
