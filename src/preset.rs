//! Policies deciding which items a selector shows and how.

use ratatui::style::Color;
use std::{cmp::Ordering, fmt};

use crate::{
    category::CategoryCatalog,
    entry::Entry,
    host::ItemLocation,
    utils::text_width,
};

type CellFn = Box<dyn Fn(&Entry) -> String>;

/// A column of text shown to the right of the caption.
pub struct Cell {
    func: CellFn,
    title: String,
    /// The cell is not "revealed" when every item shows only this text.
    stub: String,
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("title", &self.title)
            .field("stub", &self.stub)
            .finish_non_exhaustive()
    }
}

/// Cells registered by a preset, in display order.
///
/// The caption is not part of this list, it is always cell `0`.
#[derive(Debug, Default)]
pub struct PresetCells {
    cells: Vec<Cell>,
}

impl PresetCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn append_cell<F>(mut self, func: F, title: &str, stub: &str) -> Self
    where
        F: Fn(&Entry) -> String + 'static,
    {
        self.cells.push(Cell {
            func: Box::new(func),
            title: title.to_string(),
            stub: stub.to_string(),
        });
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn append_location_cell<F>(self, func: F, title: &str, stub: &str) -> Self
    where
        F: Fn(&ItemLocation) -> String + 'static,
    {
        self.append_cell(
            move |entry: &Entry| entry.location().as_ref().map(&func).unwrap_or_default(),
            title,
            stub,
        )
    }

    fn get(&self, cell_index: usize) -> Option<&Cell> {
        cell_index.checked_sub(1).and_then(|index| self.cells.get(index))
    }
}

/// Filtering, denial, ordering, coloring and cell text of a selector.
///
/// Selectors and columns share a preset through `Rc<dyn Preset>`.
pub trait Preset: fmt::Debug {
    fn cells(&self) -> &PresetCells;

    /// Whether an item becomes an entry at all.
    fn is_shown(&self, _location: &ItemLocation) -> bool {
        true
    }

    /// Why the item cannot be selected, empty when it can.
    fn get_denial(&self, _location: &ItemLocation) -> String {
        String::new()
    }

    fn sort_compare(&self, lhs: &ItemLocation, rhs: &ItemLocation) -> Ordering {
        lhs.item().natural_cmp(rhs.item())
    }

    fn get_color(&self, entry: &Entry) -> Color {
        if entry.is_category() {
            Color::Magenta
        } else if entry.enabled() {
            Color::Gray
        } else {
            Color::DarkGray
        }
    }

    /// Text of cell `0`.
    fn get_caption(&self, entry: &Entry) -> String {
        let Some(location) = entry.location() else {
            return String::new();
        };

        let count = entry.stack_size();
        if count > 1 {
            format!("{} {}", count, location.item().name)
        } else {
            location.item().name.clone()
        }
    }

    fn get_cells_count(&self) -> usize {
        self.cells().len() + 1
    }

    fn get_cell_title(&self, cell_index: usize) -> &str {
        self.cells()
            .get(cell_index)
            .map(|cell| cell.title.as_str())
            .unwrap_or_default()
    }

    fn get_cell_text(&self, entry: &Entry, cell_index: usize, catalog: &CategoryCatalog) -> String {
        if cell_index >= self.get_cells_count() || entry.is_null() {
            return String::new();
        }

        if entry.is_category() {
            return match (cell_index, entry.category()) {
                (0, Some(category)) => catalog.name(category).to_string(),
                _ => self.get_cell_title(cell_index).to_string(),
            };
        }

        match self.cells().get(cell_index) {
            Some(cell) => (cell.func)(entry),
            None => self.get_caption(entry),
        }
    }

    fn get_cell_width(&self, entry: &Entry, cell_index: usize, catalog: &CategoryCatalog) -> usize {
        text_width(&self.get_cell_text(entry, cell_index, catalog))
    }

    fn is_stub_cell(&self, entry: &Entry, cell_index: usize, catalog: &CategoryCatalog) -> bool {
        if entry.is_category() || cell_index == 0 {
            return false;
        }

        let text = self.get_cell_text(entry, cell_index, catalog);
        match self.cells().get(cell_index) {
            Some(cell) => text.is_empty() || text == cell.stub,
            None => true,
        }
    }
}

/// Shows everything, captions only.
#[derive(Debug, Default)]
pub struct DefaultPreset {
    cells: PresetCells,
}

impl Preset for DefaultPreset {
    fn cells(&self) -> &PresetCells {
        &self.cells
    }
}

/// Captions plus per-stack weight and volume.
#[derive(Debug)]
pub struct StatsPreset {
    cells: PresetCells,
}

impl Default for StatsPreset {
    fn default() -> Self {
        let cells = PresetCells::new()
            .append_cell(
                |entry: &Entry| match entry.location() {
                    Some(location) => format!(
                        "{:.2}",
                        f64::from(location.item().weight_g) * entry.stack_size() as f64 / 1000.0
                    ),
                    None => String::new(),
                },
                "WEIGHT",
                "0.00",
            )
            .append_cell(
                |entry: &Entry| match entry.location() {
                    Some(location) => format!(
                        "{:.2}",
                        f64::from(location.item().volume_ml) * entry.stack_size() as f64 / 1000.0
                    ),
                    None => String::new(),
                },
                "VOLUME",
                "0.00",
            );

        Self { cells }
    }
}

impl Preset for StatsPreset {
    fn cells(&self) -> &PresetCells {
        &self.cells
    }
}

/// Preset of the column listing what has been chosen so far.
#[derive(Debug, Default)]
pub struct SelectionColumnPreset {
    cells: PresetCells,
}

impl Preset for SelectionColumnPreset {
    fn cells(&self) -> &PresetCells {
        &self.cells
    }

    fn get_caption(&self, entry: &Entry) -> String {
        let Some(location) = entry.location() else {
            return String::new();
        };

        format!("{} {}", entry.chosen_count(), location.item().name)
    }

    fn get_color(&self, entry: &Entry) -> Color {
        if entry.is_category() {
            Color::Magenta
        } else {
            Color::White
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        category::CategoryCatalog,
        host::{Item, ItemCategory, ItemId, ItemPlace},
    };
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn pebble(weight_g: u32) -> ItemLocation {
        ItemLocation::new(
            ItemPlace::Carried,
            Rc::new(Item {
                id: ItemId(7),
                name: "pebble".to_string(),
                category: ItemCategory::new("other", "OTHER", 0),
                weight_g,
                volume_ml: 0,
                invlet: None,
            }),
        )
    }

    #[test]
    fn caption_mentions_stack_size() {
        let mut catalog = CategoryCatalog::new();
        let other = catalog.intern(&ItemCategory::new("other", "OTHER", 0));
        let preset = DefaultPreset::default();

        let single = Entry::new_item(pebble(10), 1, other, true);
        let stack = Entry::new_item(pebble(10), 4, other, true);

        assert_eq!(preset.get_cells_count(), 1);
        assert_eq!(preset.get_cell_text(&single, 0, &catalog), "pebble");
        assert_eq!(preset.get_cell_text(&stack, 0, &catalog), "4 pebble");
        assert_eq!(preset.get_cell_width(&stack, 0, &catalog), 8);
    }

    #[test]
    fn category_rows_show_titles() {
        let mut catalog = CategoryCatalog::new();
        let other = catalog.intern(&ItemCategory::new("other", "OTHER", 0));
        let preset = StatsPreset::default();
        let header = Entry::new_category(other);

        assert_eq!(preset.get_cells_count(), 3);
        assert_eq!(preset.get_cell_text(&header, 0, &catalog), "OTHER");
        assert_eq!(preset.get_cell_text(&header, 1, &catalog), "WEIGHT");
        assert_eq!(preset.get_cell_text(&header, 2, &catalog), "VOLUME");
        assert!(!preset.is_stub_cell(&header, 1, &catalog));
    }

    #[test]
    fn stub_cells_are_detected() {
        let mut catalog = CategoryCatalog::new();
        let other = catalog.intern(&ItemCategory::new("other", "OTHER", 0));
        let preset = StatsPreset::default();
        let entry = Entry::new_item(pebble(250), 2, other, true);

        assert_eq!(preset.get_cell_text(&entry, 1, &catalog), "0.50");
        assert!(!preset.is_stub_cell(&entry, 1, &catalog));
        assert_eq!(preset.get_cell_text(&entry, 2, &catalog), "0.00");
        assert!(preset.is_stub_cell(&entry, 2, &catalog));
        assert_eq!(preset.get_cell_text(&entry, 3, &catalog), "");
    }
}
