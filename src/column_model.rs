use impl_helper::ImplHelper;
use ratatui::{layout::Rect, Frame};
use std::rc::Rc;

use crate::{
    category::{CategoryCatalog, CategoryId},
    column_view::ColumnView,
    entry::Entry,
    input::InputAction,
    invlet::InvletAllocator,
    paginator::Paginator,
    preset::Preset,
    render::Render,
    host::Character,
    types::{NavigationMode, ScrollDirection},
};

/// Gap between two neighbouring cells.
pub const CELL_GAP: usize = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CellWidth {
    /// Width after fitting into the column, zero when the cell is dropped.
    current_width: usize,
    /// Width that embraces the text of every entry.
    real_width: usize,
    /// Some item shows something other than the stub in this cell.
    revealed: bool,
}

impl CellWidth {
    fn visible(&self) -> bool {
        self.current_width > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Regular,
    /// Mirrors chosen entries of other columns under its own category.
    Selection { category: CategoryId },
}

/// An ordered, paginated list of entries with a cursor.
///
/// Structural changes invalidate paging; [`ColumnModel::prepare_paging`] has
/// to run before the cursor and the pages are trusted again.
#[derive(Debug, ImplHelper)]
pub struct ColumnModel {
    preset: Rc<dyn Preset>,

    #[helper(get)]
    kind: ColumnKind,

    #[helper(get)]
    entries: Vec<Entry>,

    #[helper(copy)]
    mode: NavigationMode,

    #[helper(copy)]
    active: bool,

    #[helper(copy)]
    multiselect: bool,

    #[helper(copy)]
    paging_is_valid: bool,

    #[helper(copy)]
    visibility: bool,

    #[helper(copy)]
    selected_index: usize,

    #[helper(copy)]
    paginator: Paginator,

    #[helper(copy)]
    reserved_width: usize,

    /// `selected_index` points into sorted entries, not insertion order.
    cursor_is_placed: bool,

    cells: Vec<CellWidth>,
}

impl ColumnModel {
    pub fn new(preset: Rc<dyn Preset>) -> Self {
        let cells = vec![CellWidth::default(); preset.get_cells_count()];

        Self {
            preset,
            kind: ColumnKind::Regular,
            entries: Vec::default(),
            mode: NavigationMode::Item,
            active: false,
            multiselect: false,
            paging_is_valid: false,
            visibility: true,
            selected_index: 0,
            paginator: Paginator::default(),
            reserved_width: 0,
            cursor_is_placed: false,
            cells,
        }
    }

    pub(crate) fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn preset(&self) -> &Rc<dyn Preset> {
        &self.preset
    }

    pub fn empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn has_selectable(&self) -> bool {
        self.entries.iter().any(Entry::is_selectable)
    }

    /// Whether the column can hold the cursor.
    pub fn activatable(&self) -> bool {
        match self.kind {
            ColumnKind::Regular => self.has_selectable(),
            ColumnKind::Selection { .. } => self.has_selectable() && self.pages_count() > 1,
        }
    }

    pub fn visible(&self) -> bool {
        let has_content = match self.kind {
            ColumnKind::Regular => !self.empty(),
            ColumnKind::Selection { .. } => self.entries.iter().any(Entry::is_item),
        };

        has_content && self.visibility && self.preset.get_cells_count() > 0
    }

    /// Whether toggling entries of this column means anything.
    pub fn allows_selecting(&self) -> bool {
        match self.kind {
            ColumnKind::Regular => self.activatable(),
            ColumnKind::Selection { .. } => false,
        }
    }

    pub fn page_index(&self) -> usize {
        self.paginator.page_index()
    }

    pub fn pages_count(&self) -> usize {
        self.paginator.pages_count()
    }

    pub fn entries_per_page(&self) -> usize {
        self.paginator.size()
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    pub fn is_selected(&self, entry: &Entry) -> bool {
        self.get_selected().is_some_and(|selected| selected == entry)
    }

    /// In category mode every item of the cursor's category counts as selected.
    pub fn is_selected_by_category(&self, entry: &Entry) -> bool {
        match self.mode {
            NavigationMode::Item => self.is_selected(entry),
            NavigationMode::Category => {
                entry.is_item()
                    && self
                        .get_selected()
                        .is_some_and(|selected| selected.category() == entry.category())
            }
        }
    }

    /// The entry under the cursor, if paging is valid and anything is selectable.
    pub fn get_selected(&self) -> Option<&Entry> {
        if !self.paging_is_valid {
            return None;
        }

        self.entries
            .get(self.selected_index)
            .filter(|entry| entry.is_selectable())
    }

    /// Indices of the entries an action on the cursor applies to. Empty for
    /// columns that do not allow selecting.
    pub fn selected_indices(&self) -> Vec<usize> {
        if !self.allows_selecting() {
            return Vec::default();
        }

        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_selectable() && self.is_selected_by_category(entry))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn get_all_selected(&self) -> Vec<&Entry> {
        self.selected_indices()
            .into_iter()
            .filter_map(|index| self.entries.get(index))
            .collect()
    }

    pub fn find_by_invlet(&self, invlet: char) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.is_selectable() && entry.get_invlet() == Some(invlet))
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, catalog: &CategoryCatalog) {
        ColumnView::new(self, catalog).render(frame, area);
    }

    pub fn add_entry(&mut self, entry: Entry, catalog: &CategoryCatalog) {
        if entry.is_null() {
            log::warn!("Refused to add a null entry");
            return;
        }

        if self.entries.contains(&entry) {
            log::warn!("Refused to add a duplicate entry: {:?}", entry.location());
            return;
        }

        self.expand_to_fit(&entry, catalog);
        self.entries.push(entry);
        self.paging_is_valid = false;
    }

    pub fn remove_entry(&mut self, entry: &Entry) {
        if let Some(index) = self.entries.iter().position(|current| current == entry) {
            self.entries.remove(index);

            if index < self.selected_index {
                self.selected_index -= 1;
            }

            self.paging_is_valid = false;
        }
    }

    /// Moves every item into `dest`, leaving this column empty.
    pub fn move_entries_to(&mut self, dest: &mut ColumnModel, catalog: &CategoryCatalog) {
        for entry in self.entries.drain(..).filter(Entry::is_item) {
            dest.add_entry(entry, catalog);
        }

        self.clear();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected_index = 0;
        self.paginator = Paginator::new(self.paginator.size(), 0, 0);
        self.cells.iter_mut().for_each(|cell| *cell = CellWidth::default());
        self.paging_is_valid = false;
        self.cursor_is_placed = false;
    }

    pub fn set_multiselect(&mut self, multiselect: bool) {
        self.multiselect = multiselect;
    }

    pub fn set_mode(&mut self, mode: NavigationMode) {
        self.mode = mode;
    }

    pub fn set_visibility(&mut self, visibility: bool) {
        self.visibility = visibility;
    }

    pub fn on_activate(&mut self) {
        self.active = true;
    }

    pub fn on_deactivate(&mut self) {
        self.active = false;
    }

    /// Narrows (or widens) the column, dropping cells that do not fit.
    pub fn set_width(&mut self, width: usize) {
        self.reserved_width = width;
        self.fit_cells(width);
    }

    /// Rows available to the column. When the entries do not fit, the last
    /// row is kept for the page indicator.
    pub fn set_height(&mut self, height: usize) {
        let height = height.max(1);
        let rows = if self.entries.len() > height && height > 1 {
            height - 1
        } else {
            height
        };

        self.paginator.size_update(rows);
        self.paginator.follow(self.selected_index);
    }

    pub fn get_width(&self) -> usize {
        self.get_cells_width().max(self.reserved_width)
    }

    pub fn get_height(&self) -> usize {
        let rows = self.entries.len().min(self.paginator.size());

        if self.pages_count() > 1 {
            rows + 1
        } else {
            rows
        }
    }

    /// Grows the minimal cell widths so that `entry` is not truncated.
    pub fn expand_to_fit(&mut self, entry: &Entry, catalog: &CategoryCatalog) {
        if entry.is_null() {
            return;
        }

        for (index, cell) in self.cells.iter_mut().enumerate() {
            let width = self.preset.get_cell_width(entry, index, catalog);
            cell.real_width = cell.real_width.max(width);

            if entry.is_item() && !self.preset.is_stub_cell(entry, index, catalog) && width > 0 {
                cell.revealed = true;
            }

            if cell.revealed && self.reserved_width == 0 {
                cell.current_width = cell.real_width;
            }
        }

        if self.reserved_width > 0 {
            self.fit_cells(self.reserved_width);
        }
    }

    /// Restores the natural width of every cell.
    pub fn reset_width(&mut self) {
        self.reserved_width = 0;

        for cell in self.cells.iter_mut() {
            cell.current_width = if cell.revealed { cell.real_width } else { 0 };
        }
    }

    pub fn get_entry_indent(&self, entry: &Entry) -> usize {
        if !entry.is_item() {
            0
        } else if self.multiselect {
            4
        } else {
            2
        }
    }

    fn max_indent(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| self.get_entry_indent(entry))
            .max()
            .unwrap_or_default()
    }

    /// Width of a cell including the indent or gap in front of it, zero when hidden.
    pub fn get_cell_width(&self, cell_index: usize) -> usize {
        match self.cells.get(cell_index) {
            Some(cell) if cell.visible() => {
                let gap = if cell_index == 0 {
                    self.max_indent()
                } else {
                    CELL_GAP
                };
                gap + cell.current_width
            }
            _ => 0,
        }
    }

    pub fn get_cells_width(&self) -> usize {
        (0..self.cells.len())
            .map(|index| self.get_cell_width(index))
            .sum()
    }

    /// Bare width of a cell's text area, zero when hidden.
    pub fn get_cell_text_width(&self, cell_index: usize) -> usize {
        self.cells
            .get(cell_index)
            .map(|cell| cell.current_width)
            .unwrap_or_default()
    }

    pub fn visible_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visible()).count()
    }

    /// Cells are placed left to right; the first one that would overflow
    /// `budget` is dropped along with everything after it. The caption is
    /// truncated rather than dropped.
    fn fit_cells(&mut self, budget: usize) {
        let indent = self.max_indent();
        let mut used = 0;
        let mut overflown = false;

        for (index, cell) in self.cells.iter_mut().enumerate() {
            if !cell.revealed || overflown {
                cell.current_width = 0;
                continue;
            }

            let gap = if index == 0 { indent } else { CELL_GAP };
            let wanted = gap + cell.real_width;

            if used + wanted <= budget {
                cell.current_width = cell.real_width;
                used += wanted;
            } else if index == 0 {
                cell.current_width = budget.saturating_sub(gap).max(1);
                used = budget;
            } else {
                cell.current_width = 0;
                overflown = true;
            }
        }
    }

    pub fn get_entry_denial(&self, entry: &Entry) -> String {
        match entry.location() {
            Some(location) => self.preset.get_denial(location),
            None => String::new(),
        }
    }

    /// Gives a key from `allocator` to every selectable item the character
    /// has no stable key for. Returns the key the next column would start with.
    pub fn reassign_custom_invlets(
        &mut self,
        character: &dyn Character,
        allocator: &mut InvletAllocator,
    ) -> Option<char> {
        for entry in self.entries.iter_mut() {
            let has_own_invlet = entry.location().as_ref().is_some_and(|location| {
                character.has_item(location.item())
                    && character.bound_invlet(location.item()).is_some()
            });

            let invlet = if entry.is_selectable() && !has_own_invlet {
                allocator.allocate()
            } else {
                None
            };

            entry.custom_invlet_update(invlet);
        }

        allocator.peek()
    }

    /// Sorts entries, restores category headers, revalidates the cursor and
    /// recomputes cell widths.
    pub fn prepare_paging(&mut self, catalog: &CategoryCatalog) {
        let selected = self
            .entries
            .get(self.selected_index)
            .filter(|entry| self.cursor_is_placed && entry.is_item())
            .cloned();

        self.entries.retain(Entry::is_item);

        let preset = Rc::clone(&self.preset);
        self.entries.sort_by(|lhs, rhs| {
            let lhs_key = lhs.category().map(|id| catalog.sort_key(id));
            let rhs_key = rhs.category().map(|id| catalog.sort_key(id));

            lhs_key.cmp(&rhs_key).then_with(|| match (lhs.location(), rhs.location()) {
                (Some(lhs), Some(rhs)) => preset.sort_compare(lhs, rhs),
                _ => std::cmp::Ordering::Equal,
            })
        });

        let mut with_headers = Vec::with_capacity(self.entries.len() * 2);
        let mut current_category = None;
        for entry in self.entries.drain(..) {
            if entry.category() != current_category {
                current_category = entry.category();
                if let Some(category) = current_category {
                    with_headers.push(Entry::new_category(category));
                }
            }
            with_headers.push(entry);
        }
        self.entries = with_headers;

        if let ColumnKind::Selection { category } = self.kind {
            if self.entries.is_empty() {
                self.entries.push(Entry::new_category(category));
            }
        }

        self.cells.iter_mut().for_each(|cell| *cell = CellWidth::default());
        let entries = std::mem::take(&mut self.entries);
        for entry in entries.iter() {
            self.expand_to_fit(entry, catalog);
        }
        self.entries = entries;

        if self.reserved_width > 0 {
            self.fit_cells(self.reserved_width);
        }

        self.paginator.total_update(self.entries.len());
        self.paging_is_valid = true;

        let index = match selected
            .and_then(|selected| self.entries.iter().position(|entry| *entry == selected))
        {
            Some(index) => index,
            None if self.cursor_is_placed => self.selected_index,
            None => 0,
        };
        self.cursor_is_placed = true;
        self.select(index, ScrollDirection::Forward);
    }

    pub fn on_input(&mut self, action: InputAction) {
        if self.empty() || !self.active {
            return;
        }

        match action {
            InputAction::Down => self.move_selection(ScrollDirection::Forward),
            InputAction::Up => self.move_selection(ScrollDirection::Backward),
            InputAction::PageDown => self.move_selection_page(ScrollDirection::Forward),
            InputAction::PageUp => self.move_selection_page(ScrollDirection::Backward),
            InputAction::Home => self.select(0, ScrollDirection::Forward),
            InputAction::End => self.select(self.entries.len() - 1, ScrollDirection::Backward),
            _ => {}
        }
    }

    /// Puts the cursor on `new_index`, or on the nearest selectable entry in
    /// direction `dir` when that one cannot be selected.
    pub fn select(&mut self, new_index: usize, dir: ScrollDirection) {
        if self.entries.is_empty() {
            self.selected_index = 0;
            self.paginator.follow(0);
            return;
        }

        let index = new_index.min(self.entries.len() - 1);
        self.selected_index = if self.entries[index].is_selectable() {
            index
        } else {
            self.next_selectable_index(index, dir)
        };

        self.paginator.follow(self.selected_index);
    }

    /// The closest selectable entry after `index` in direction `dir`,
    /// wrapping around; `index` itself when there is nothing else.
    pub fn next_selectable_index(&self, index: usize, dir: ScrollDirection) -> usize {
        let len = self.entries.len();
        let mut current = index;

        for _ in 0..len {
            current = dir.step(current, len);
            if self.entries[current].is_selectable() {
                return current;
            }
        }

        index
    }

    pub fn move_selection(&mut self, dir: ScrollDirection) {
        if !self.paging_is_valid || self.entries.is_empty() {
            return;
        }

        match self.mode {
            NavigationMode::Item => {
                let index = self.next_selectable_index(self.selected_index, dir);
                self.select(index, dir);
            }
            NavigationMode::Category => {
                let len = self.entries.len();
                let current_category = self.entries[self.selected_index].category();
                let mut index = self.selected_index;
                let mut target_category = None;

                for _ in 0..len {
                    index = dir.step(index, len);
                    let entry = &self.entries[index];
                    if entry.is_selectable() && entry.category() != current_category {
                        target_category = entry.category();
                        break;
                    }
                }

                if let Some(target_category) = target_category {
                    let first = self.entries.iter().position(|entry| {
                        entry.is_selectable() && entry.category() == Some(target_category)
                    });

                    if let Some(first) = first {
                        self.select(first, dir);
                    }
                }
            }
        }
    }

    /// Jumps to the first selectable entry of the next (previous) page,
    /// wrapping around at the ends.
    pub fn move_selection_page(&mut self, dir: ScrollDirection) {
        if !self.paging_is_valid || self.entries.is_empty() {
            return;
        }

        let pages = self.pages_count().max(1);
        let page = match dir {
            ScrollDirection::Forward => (self.page_index() + 1) % pages,
            ScrollDirection::Backward => (self.page_index() + pages - 1) % pages,
        };

        self.select(self.paginator.page_start(page), ScrollDirection::Forward);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        host::{Item, ItemCategory, ItemId, ItemLocation, ItemPlace},
        preset::{DefaultPreset, StatsPreset},
    };
    use pretty_assertions::assert_eq;

    pub fn location(id: u64, name: &str, category: &ItemCategory) -> ItemLocation {
        ItemLocation::new(
            ItemPlace::Ground(Default::default()),
            Rc::new(Item {
                id: ItemId(id),
                name: name.to_string(),
                category: category.clone(),
                weight_g: 1000,
                volume_ml: 250,
                invlet: None,
            }),
        )
    }

    struct Fixture {
        catalog: CategoryCatalog,
        tools: ItemCategory,
        food: ItemCategory,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: CategoryCatalog::new(),
                tools: ItemCategory::new("tools", "TOOLS", 10),
                food: ItemCategory::new("food", "FOOD", 5),
            }
        }

        fn item(&mut self, id: u64, name: &str, food: bool, enabled: bool) -> Entry {
            let category = if food { &self.food } else { &self.tools };
            let category_id = self.catalog.intern(category);
            Entry::new_item(location(id, name, category), 1, category_id, enabled)
        }
    }

    fn names(column: &ColumnModel, catalog: &CategoryCatalog) -> Vec<String> {
        column
            .entries()
            .iter()
            .map(|entry| column.preset().get_cell_text(entry, 0, catalog))
            .collect()
    }

    fn selected_name(column: &ColumnModel) -> Option<String> {
        column
            .get_selected()
            .and_then(|entry| entry.location().as_ref())
            .map(|location| location.item().name.clone())
    }

    #[test]
    fn prepare_paging_sorts_and_adds_headers() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for entry in [
            fixture.item(1, "saw", false, true),
            fixture.item(2, "apple", true, true),
            fixture.item(3, "hammer", false, true),
        ] {
            column.add_entry(entry, &fixture.catalog);
        }

        assert!(!column.paging_is_valid());
        column.prepare_paging(&fixture.catalog);

        assert_eq!(
            names(&column, &fixture.catalog),
            ["FOOD", "apple", "TOOLS", "hammer", "saw"]
        );
        assert_eq!(column.selected_index(), 1);
        assert_eq!(selected_name(&column).as_deref(), Some("apple"));
    }

    #[test]
    fn cursor_follows_its_entry_after_resort() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for entry in [fixture.item(1, "saw", false, true), fixture.item(2, "hammer", false, true)] {
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);
        column.on_activate();
        assert_eq!(selected_name(&column).as_deref(), Some("hammer"));

        column.move_selection(ScrollDirection::Forward);
        assert_eq!(selected_name(&column).as_deref(), Some("saw"));

        column.add_entry(fixture.item(3, "drill", false, true), &fixture.catalog);
        column.prepare_paging(&fixture.catalog);
        assert_eq!(names(&column, &fixture.catalog), ["TOOLS", "drill", "hammer", "saw"]);
        assert_eq!(selected_name(&column).as_deref(), Some("saw"));

        column.clear();
        column.add_entry(fixture.item(4, "wrench", false, true), &fixture.catalog);
        column.add_entry(fixture.item(5, "axe", false, true), &fixture.catalog);
        column.prepare_paging(&fixture.catalog);
        assert_eq!(selected_name(&column).as_deref(), Some("axe"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));
        let saw = fixture.item(1, "saw", false, true);

        column.add_entry(saw.clone(), &fixture.catalog);
        column.add_entry(saw, &fixture.catalog);

        assert_eq!(column.entries().len(), 1);
    }

    #[test]
    fn cursor_skips_disabled_entries_and_wraps() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for entry in [
            fixture.item(1, "axe", false, true),
            fixture.item(2, "bolt", false, false),
            fixture.item(3, "crowbar", false, true),
        ] {
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);
        column.on_activate();

        assert_eq!(selected_name(&column).as_deref(), Some("axe"));

        column.move_selection(ScrollDirection::Forward);
        assert_eq!(selected_name(&column).as_deref(), Some("crowbar"));

        column.move_selection(ScrollDirection::Forward);
        assert_eq!(selected_name(&column).as_deref(), Some("axe"));

        column.move_selection(ScrollDirection::Backward);
        assert_eq!(selected_name(&column).as_deref(), Some("crowbar"));
    }

    #[test]
    fn forward_cycle_returns_to_start() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for id in 0..5 {
            let entry = fixture.item(id, &format!("item {id}"), id % 2 == 0, true);
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);

        let start = column.selected_index();
        for _ in 0..5 {
            column.move_selection(ScrollDirection::Forward);
        }
        assert_eq!(column.selected_index(), start);

        column.move_selection(ScrollDirection::Forward);
        column.move_selection(ScrollDirection::Backward);
        assert_eq!(column.selected_index(), start);
    }

    #[test]
    fn nothing_selectable_means_not_activatable() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        column.add_entry(fixture.item(1, "anvil", false, false), &fixture.catalog);
        column.prepare_paging(&fixture.catalog);

        assert!(!column.activatable());
        assert!(!column.allows_selecting());
        assert!(column.get_selected().is_none());
    }

    #[test]
    fn category_mode_jumps_between_categories() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for entry in [
            fixture.item(1, "apple", true, true),
            fixture.item(2, "bread", true, true),
            fixture.item(3, "hammer", false, true),
            fixture.item(4, "saw", false, true),
        ] {
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);
        column.set_mode(NavigationMode::Category);

        column.move_selection(ScrollDirection::Forward);
        assert_eq!(selected_name(&column).as_deref(), Some("hammer"));
        assert_eq!(column.get_all_selected().len(), 2);

        column.move_selection(ScrollDirection::Forward);
        assert_eq!(selected_name(&column).as_deref(), Some("apple"));

        column.move_selection(ScrollDirection::Backward);
        assert_eq!(selected_name(&column).as_deref(), Some("hammer"));

        let bread = column.entries()[2].clone();
        let saw = column.entries()[5].clone();
        assert!(!column.is_selected_by_category(&bread));
        assert!(column.is_selected_by_category(&saw));
        assert!(!column.is_selected(&saw));
    }

    #[test]
    fn pages_follow_the_cursor() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for id in 0..7 {
            let entry = fixture.item(id, &format!("tool {id}"), false, true);
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);
        column.set_height(4);

        // 8 rows, 3 per page, the fourth row shows the page number.
        assert_eq!(column.entries_per_page(), 3);
        assert_eq!(column.pages_count(), 3);
        assert_eq!(column.get_height(), 4);

        column.move_selection_page(ScrollDirection::Forward);
        assert_eq!(column.page_index(), 1);
        assert_eq!(column.selected_index(), 3);
        assert_eq!(column.paginator().start() % column.entries_per_page(), 0);

        column.move_selection_page(ScrollDirection::Backward);
        column.move_selection_page(ScrollDirection::Backward);
        assert_eq!(column.page_index(), 2);
        assert_eq!(column.selected_index(), 6);

        column.move_selection_page(ScrollDirection::Forward);
        assert_eq!(column.page_index(), 0);
        assert_eq!(column.selected_index(), 1);
    }

    #[test]
    fn home_and_end_land_on_selectable_entries() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        for entry in [
            fixture.item(1, "apple", true, true),
            fixture.item(2, "hammer", false, true),
            fixture.item(3, "saw", false, false),
        ] {
            column.add_entry(entry, &fixture.catalog);
        }
        column.prepare_paging(&fixture.catalog);
        column.on_activate();

        column.on_input(InputAction::End);
        assert_eq!(selected_name(&column).as_deref(), Some("hammer"));

        column.on_input(InputAction::Home);
        assert_eq!(selected_name(&column).as_deref(), Some("apple"));

        column.on_deactivate();
        column.on_input(InputAction::Down);
        assert_eq!(selected_name(&column).as_deref(), Some("apple"));
    }

    #[test]
    fn cells_are_dropped_left_to_right() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(StatsPreset::default()));

        column.add_entry(fixture.item(1, "hammer", false, true), &fixture.catalog);
        column.prepare_paging(&fixture.catalog);

        // "  " + "hammer" (header "TOOLS" is shorter), then "  WEIGHT", "  VOLUME".
        assert_eq!(column.visible_cells(), 3);
        assert_eq!(column.get_width(), 8 + 8 + 8);

        column.set_width(18);
        assert_eq!(column.visible_cells(), 2);
        assert!(column.get_cells_width() <= 18);

        column.set_width(10);
        assert_eq!(column.visible_cells(), 1);

        column.reset_width();
        assert_eq!(column.visible_cells(), 3);
    }

    #[test]
    fn find_by_invlet_ignores_disabled_entries() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));

        let mut usable = fixture.item(1, "axe", false, true);
        usable.custom_invlet_update(Some('1'));
        let mut denied = fixture.item(2, "bolt", false, false);
        denied.custom_invlet_update(Some('2'));

        column.add_entry(usable, &fixture.catalog);
        column.add_entry(denied, &fixture.catalog);
        column.prepare_paging(&fixture.catalog);

        assert_eq!(column.find_by_invlet('1'), Some(1));
        assert_eq!(column.find_by_invlet('2'), None);
        assert_eq!(column.find_by_invlet('9'), None);
    }

    #[test]
    fn remove_and_move_entries() {
        let mut fixture = Fixture::new();
        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));
        let mut other = ColumnModel::new(Rc::new(DefaultPreset::default()));

        let axe = fixture.item(1, "axe", false, true);
        column.add_entry(axe.clone(), &fixture.catalog);
        column.add_entry(fixture.item(2, "bolt", false, true), &fixture.catalog);
        column.prepare_paging(&fixture.catalog);

        column.remove_entry(&axe);
        assert!(!column.paging_is_valid());
        column.prepare_paging(&fixture.catalog);
        assert_eq!(names(&column, &fixture.catalog), ["TOOLS", "bolt"]);

        column.move_entries_to(&mut other, &fixture.catalog);
        other.prepare_paging(&fixture.catalog);
        assert!(column.empty());
        assert_eq!(names(&other, &fixture.catalog), ["TOOLS", "bolt"]);
    }
}
