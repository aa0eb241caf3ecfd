use impl_helper::ImplHelper;
use ratatui::{backend::Backend, layout::Rect, style::Color, Frame};
use std::rc::Rc;

use wrap_context::{arg_context, liab, raw_context};

use crate::{
    category::{items_worn_category, selected_items_category, weapon_held_category, CategoryCatalog, CategoryId},
    column_layout::ColumnLayout,
    column_model::ColumnModel,
    entry::Entry,
    host::{Character, ItemCategory, ItemLocation, ItemPlace, Tripoint, World},
    input::{InputAction, InputSource},
    invlet::InvletAllocator,
    policy::{SelectionPolicy, SelectorOutcome},
    preferences::Preferences,
    preset::Preset,
    render::Render,
    selector_view::SelectorView,
    tui::Tui,
    types::{NavigationMode, ScrollDirection},
    utils::text_width,
};

pub const OWN_INV_COLUMN: usize = 0;
pub const OWN_GEAR_COLUMN: usize = 1;
pub const MAP_COLUMN: usize = 2;
pub const SELECTION_COLUMN: usize = 3;

const MAP_CATEGORY_RANK: i32 = 100;
const BORDER_WIDTH: usize = 1;
const FOOTER_HEIGHT: usize = 1;

/// Multi-column item selector.
///
/// Columns are, in order of layout priority: the character's inventory,
/// the character's gear, items around the character and, for policies that
/// choose several items, the column of chosen items.
#[derive(Debug, ImplHelper)]
pub struct SelectorModel<'a> {
    character: &'a dyn Character,

    preset: Rc<dyn Preset>,

    #[helper(get)]
    preferences: Preferences,

    #[helper(get)]
    columns: Vec<ColumnModel>,

    #[helper(get)]
    catalog: CategoryCatalog,

    #[helper(get)]
    policy: SelectionPolicy,

    #[helper(get)]
    title: String,

    #[helper(get)]
    hint: String,

    #[helper(copy)]
    display_stats: bool,

    #[helper(copy)]
    active_column_index: usize,

    #[helper(copy)]
    mode: NavigationMode,

    #[helper(copy)]
    layout_is_valid: bool,

    #[helper(get)]
    layout: ColumnLayout,

    /// Placement of the window inside the terminal.
    #[helper(copy)]
    window: Rect,

    /// One-off message replacing the footer until the next action.
    #[helper(get)]
    notice: Option<String>,

    terminal_area: Rect,
}

impl<'a> SelectorModel<'a> {
    pub fn new(
        character: &'a dyn Character,
        preset: Rc<dyn Preset>,
        preferences: Preferences,
        policy: SelectionPolicy,
    ) -> Self {
        let mut catalog = CategoryCatalog::new();
        let mode = preferences.navigation_mode();

        let mut columns = [OWN_INV_COLUMN, OWN_GEAR_COLUMN, MAP_COLUMN]
            .iter()
            .map(|_| ColumnModel::new(Rc::clone(&preset)))
            .collect::<Vec<_>>();

        if policy.is_multiselect() {
            columns
                .iter_mut()
                .for_each(|column| column.set_multiselect(true));

            let category = catalog.intern(&selected_items_category());
            columns.push(ColumnModel::new_selection(category));
        }

        columns.iter_mut().for_each(|column| column.set_mode(mode));

        Self {
            character,
            preset,
            display_stats: preferences.display_stats(),
            preferences,
            columns,
            catalog,
            policy,
            title: String::default(),
            hint: String::default(),
            active_column_index: OWN_INV_COLUMN,
            mode,
            layout_is_valid: false,
            layout: ColumnLayout::default(),
            window: Rect::default(),
            notice: None,
            terminal_area: Rect::default(),
        }
    }

    pub fn pick(character: &'a dyn Character, preset: Rc<dyn Preset>, preferences: Preferences) -> Self {
        Self::new(character, preset, preferences, SelectionPolicy::PickOne)
    }

    pub fn multi(character: &'a dyn Character, preset: Rc<dyn Preset>, preferences: Preferences) -> Self {
        Self::new(character, preset, preferences, SelectionPolicy::MultiWithQuantity)
    }

    pub fn compare(character: &'a dyn Character, preset: Rc<dyn Preset>, preferences: Preferences) -> Self {
        Self::new(character, preset, preferences, SelectionPolicy::compare_pair())
    }

    pub fn drop(character: &'a dyn Character, preset: Rc<dyn Preset>, preferences: Preferences) -> Self {
        Self::new(character, preset, preferences, SelectionPolicy::drop_with_quantity())
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.layout_is_valid = false;
    }

    pub fn set_hint(&mut self, hint: &str) {
        self.hint = hint.to_string();
        self.layout_is_valid = false;
    }

    pub fn set_display_stats(&mut self, display_stats: bool) {
        self.display_stats = display_stats;
        self.layout_is_valid = false;
    }

    /// Adds an item to `column_index`, filed under `category` or the item's own category.
    pub fn add_item(
        &mut self,
        column_index: usize,
        location: ItemLocation,
        stack_size: usize,
        category: Option<CategoryId>,
    ) -> anyhow::Result<()> {
        if !self.preset.is_shown(&location) {
            return anyhow::Ok(());
        }

        let category = match category {
            Some(category) => category,
            None => self.catalog.intern(&location.item().category),
        };
        let enabled = self.preset.get_denial(&location).is_empty();
        let entry = Entry::new_item(location, stack_size, category, enabled);

        let Some(column) = self.columns.get_mut(column_index) else {
            liab!("No column with index {}", column_index);
        };
        column.add_entry(entry.clone(), &self.catalog);

        self.on_entry_add(&entry);
        self.layout_is_valid = false;

        anyhow::Ok(())
    }

    fn on_entry_add(&mut self, entry: &Entry) {
        if let Some(selection) = self.columns.get_mut(SELECTION_COLUMN) {
            selection.reserve_for(entry, &self.catalog);
        }
    }

    /// Adds the wielded weapon and worn items to the gear column and the
    /// carried stacks to the inventory column.
    pub fn add_character_items(&mut self) -> anyhow::Result<()> {
        let character = self.character;

        if let Some(weapon) = character.wielded_item() {
            let category = self.catalog.intern(&weapon_held_category());
            let location = ItemLocation::new(ItemPlace::Wielded, weapon);
            raw_context!(self.add_item(OWN_GEAR_COLUMN, location, 1, Some(category)))?;
        }

        let worn = self.catalog.intern(&items_worn_category());
        for item in character.worn_items() {
            let location = ItemLocation::new(ItemPlace::Worn, item);
            raw_context!(self.add_item(OWN_GEAR_COLUMN, location, 1, Some(worn)))?;
        }

        for stack in character.carried_stacks() {
            let location = ItemLocation::new(ItemPlace::Carried, stack.item);
            raw_context!(self.add_item(OWN_INV_COLUMN, location, stack.count, None))?;
        }

        anyhow::Ok(())
    }

    fn place_category(&mut self, prefix: &str, name: &str, pos: Tripoint) -> CategoryId {
        let name = name.to_uppercase();
        let category = ItemCategory {
            id: format!("{}_{}", prefix, name),
            name,
            sort_rank: MAP_CATEGORY_RANK,
        };

        self.catalog.naturalize(&category, pos, self.character.position())
    }

    /// Adds the items lying at `pos` to the map column.
    pub fn add_map_items(&mut self, world: &dyn World, pos: Tripoint) -> anyhow::Result<()> {
        let stacks = world.stacks_at(pos);
        if stacks.is_empty() {
            return anyhow::Ok(());
        }

        let category = self.place_category("MAP", &world.tile_name(pos), pos);
        for stack in stacks {
            let location = ItemLocation::new(ItemPlace::Ground(pos), stack.item);
            raw_context!(self.add_item(MAP_COLUMN, location, stack.count, Some(category)))?;
        }

        anyhow::Ok(())
    }

    /// Adds the cargo of the vehicle at `pos` to the map column.
    pub fn add_vehicle_items(&mut self, world: &dyn World, pos: Tripoint) -> anyhow::Result<()> {
        let Some((name, stacks)) = world.vehicle_at(pos) else {
            return anyhow::Ok(());
        };

        let category = self.place_category("VEHICLE", &name, pos);
        for stack in stacks {
            let location = ItemLocation::new(ItemPlace::Vehicle(pos), stack.item);
            raw_context!(self.add_item(MAP_COLUMN, location, stack.count, Some(category)))?;
        }

        anyhow::Ok(())
    }

    /// Adds items from every tile within `radius` of the character.
    pub fn add_nearby_items(&mut self, world: &dyn World, radius: i32) -> anyhow::Result<()> {
        let origin = self.character.position();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let pos = origin.offset(dx, dy);
                arg_context!(self.add_map_items(world, pos))?;
                arg_context!(self.add_vehicle_items(world, pos))?;
            }
        }

        anyhow::Ok(())
    }

    pub fn empty(&self) -> bool {
        self.columns.iter().all(ColumnModel::empty)
    }

    pub fn has_available_choices(&self) -> bool {
        self.columns.iter().any(ColumnModel::allows_selecting)
    }

    pub fn get_active_column(&self) -> Option<&ColumnModel> {
        self.columns
            .get(self.active_column_index)
            .filter(|column| column.active())
    }

    pub fn toggle_navigation_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::debug!("Navigation mode: {:?}", self.mode);

        for column in self.columns.iter_mut() {
            column.set_mode(self.mode);
        }
    }

    /// Activates the next (previous) column able to hold the cursor, wrapping
    /// around. Nothing changes when there is no such column.
    pub fn toggle_active_column(&mut self, dir: ScrollDirection) {
        let len = self.columns.len();
        let mut index = self.active_column_index;

        for _ in 0..len {
            index = dir.step(index, len);
            if self.columns[index].activatable() {
                self.set_active_column(index);
                return;
            }
        }
    }

    pub fn set_active_column(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }

        if index != self.active_column_index {
            log::debug!("Active column: {} -> {}", self.active_column_index, index);
        }

        if let Some(column) = self.columns.get_mut(self.active_column_index) {
            column.on_deactivate();
        }

        self.active_column_index = index;
        self.columns[index].on_activate();
    }

    /// Moves the cursor away from a column that cannot hold it anymore.
    pub fn refresh_active_column(&mut self) {
        if self
            .columns
            .get(self.active_column_index)
            .is_some_and(ColumnModel::activatable)
        {
            self.set_active_column(self.active_column_index);
            return;
        }

        if let Some(column) = self.columns.get_mut(self.active_column_index) {
            column.on_deactivate();
        }

        if let Some(index) = self.columns.iter().position(ColumnModel::activatable) {
            self.set_active_column(index);
        }
    }

    /// Hands out shortcut keys to items without one, one allocator shared by
    /// every column in display order.
    pub fn reassign_custom_invlets(&mut self) {
        let (min, max) = (self.preferences.min_invlet(), self.preferences.max_invlet());
        let character = self.character;

        let mut allocator = InvletAllocator::new(
            min,
            max,
            (min..=max).filter(|invlet| character.is_invlet_bound(*invlet)),
        );

        for column in self.columns.iter_mut() {
            column.reassign_custom_invlets(character, &mut allocator);
        }
    }

    /// Column and entry index of the selectable entry bound to `invlet`.
    pub fn find_entry_by_invlet(&self, invlet: char) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.allows_selecting())
            .find_map(|(column_index, column)| {
                column
                    .find_by_invlet(invlet)
                    .map(|entry_index| (column_index, entry_index))
            })
    }

    fn visible_column_widths(&self) -> Vec<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.visible())
            .map(|(index, column)| {
                let min_width = if column.is_selection() {
                    0
                } else {
                    self.preferences.min_column_width()
                };
                (index, column.get_width().max(min_width))
            })
            .collect()
    }

    /// Width of every visible column side by side.
    pub fn get_columns_width(&self) -> usize {
        let widths = self.visible_column_widths();
        let gaps = self.preferences.column_gap() * widths.len().saturating_sub(1);
        widths.iter().map(|(_, width)| width).sum::<usize>() + gaps
    }

    pub fn get_columns_occupancy_ratio(&self, client_width: usize) -> f64 {
        if client_width == 0 {
            return f64::INFINITY;
        }

        self.get_columns_width() as f64 / client_width as f64
    }

    pub fn is_overflown(&self, client_width: usize) -> bool {
        self.get_columns_occupancy_ratio(client_width) > 1.0
    }

    pub fn are_columns_centered(&self, client_width: usize) -> bool {
        self.layout.width() < client_width
    }

    /// Places visible columns into rows no wider than `client_width`.
    pub fn rearrange_columns(&mut self, client_width: usize) {
        self.columns.iter_mut().for_each(ColumnModel::reset_width);

        let widths = self.visible_column_widths();
        self.layout = ColumnLayout::arrange(&widths, client_width, self.preferences.column_gap());

        if self.is_overflown(client_width) {
            log::debug!(
                "Columns overflow {} cells, using {} rows",
                client_width,
                self.layout.rows().len()
            );
        }

        for (index, _) in widths {
            if let Some(width) = self.layout.column_width(index) {
                self.columns[index].set_width(width);
            }
        }

        if self.are_columns_centered(client_width) {
            log::debug!(
                "Columns take {} of {} cells, centering",
                self.layout.width(),
                client_width
            );
        }
    }

    pub fn get_header_height(&self) -> usize {
        if self.hint.is_empty() {
            1
        } else {
            2
        }
    }

    pub fn get_stats(&self) -> Vec<String> {
        if !self.display_stats {
            return Vec::default();
        }

        self.character.stats(&self.policy.dropping())
    }

    pub fn get_footer(&self, mode: NavigationMode) -> (String, Color) {
        if let Some(notice) = &self.notice {
            return (notice.clone(), Color::Yellow);
        }

        if !self.has_available_choices() {
            return ("There are no available choices".to_string(), Color::Red);
        }

        let (text, color) = mode.footer();
        (text.to_string(), color)
    }

    fn get_header_width(&self) -> usize {
        let stats = self.get_stats();
        let stats_width =
            stats.iter().map(|stat| text_width(stat)).sum::<usize>() + stats.len().saturating_sub(1);

        let title_line = match (text_width(&self.title), stats_width) {
            (title, 0) => title,
            (title, stats) => title + 1 + stats,
        };

        title_line.max(text_width(&self.hint))
    }

    /// Lays out the columns and centers the window inside `terminal`.
    pub fn prepare_layout(&mut self, terminal: Rect) {
        let margin = usize::from(self.preferences.margin());
        let frame = 2 * (BORDER_WIDTH + margin);

        let client_width = usize::from(terminal.width).saturating_sub(frame);
        let client_height = usize::from(terminal.height)
            .saturating_sub(frame + self.get_header_height() + FOOTER_HEIGHT);

        self.rearrange_columns(client_width.max(1));

        let columns = &self.columns;
        self.layout.fit_heights(
            |index| columns.get(index).map(|column| column.entries().len()).unwrap_or_default(),
            client_height,
        );

        for row in self.layout.rows() {
            for (index, _) in row.columns.iter() {
                self.columns[*index].set_height(row.height);
            }
        }

        let (footer, _) = self.get_footer(self.mode);
        let content_width = self
            .layout
            .width()
            .max(self.get_header_width())
            .max(text_width(&footer));

        let width = (content_width + 2 * BORDER_WIDTH).min(usize::from(terminal.width));
        let height = (self.layout.height() + self.get_header_height() + FOOTER_HEIGHT + 2 * BORDER_WIDTH)
            .min(usize::from(terminal.height));

        let (width, height) = (width as u16, height as u16);
        self.window = Rect::new(
            terminal.x + (terminal.width - width) / 2,
            terminal.y + (terminal.height - height) / 2,
            width,
            height,
        );

        log::debug!("Layout prepared: window {:?}, {} rows", self.window, self.layout.rows().len());
    }

    fn ensure_paging(&mut self) {
        for column in self.columns.iter_mut() {
            if !column.paging_is_valid() {
                column.prepare_paging(&self.catalog);
                self.layout_is_valid = false;
            }
        }
    }

    /// Brings paging, shortcut keys and layout up to date before drawing.
    pub fn update(&mut self, terminal: Rect) {
        if terminal != self.terminal_area {
            self.terminal_area = terminal;
            self.layout_is_valid = false;
        }

        self.ensure_paging();

        if !self.layout_is_valid {
            self.reassign_custom_invlets();
            self.prepare_layout(terminal);
            self.refresh_active_column();
            self.layout_is_valid = true;
        }
    }

    fn selected_location(&self, column_index: usize, entry_index: usize) -> Option<ItemLocation> {
        self.columns
            .get(column_index)
            .and_then(|column| column.entries().get(entry_index))
            .and_then(|entry| entry.location().clone())
    }

    /// Sets the chosen count of the item at `location` in every column and
    /// mirrors it into the selection column.
    pub fn set_chosen_count(&mut self, location: &ItemLocation, count: usize) {
        let mut changed = Vec::default();

        for column in self.columns.iter_mut().filter(|column| !column.is_selection()) {
            let Some(index) = column
                .entries()
                .iter()
                .position(|entry| entry.location().as_ref() == Some(location))
            else {
                continue;
            };

            if let Some(entry) = column.entry_mut(index) {
                let count = count.min(entry.get_available_count());
                entry.chosen_count_update(count);
                changed.push(entry.clone());
            }
        }

        for entry in changed.iter() {
            self.on_change(entry);
        }
    }

    fn on_change(&mut self, entry: &Entry) {
        if let Some(selection) = self.columns.get_mut(SELECTION_COLUMN) {
            selection.on_change(entry, &self.catalog);
            self.layout_is_valid = false;
        }
    }

    fn toggle_entries(&mut self, column_index: usize, indices: &[usize]) {
        let entries = indices
            .iter()
            .filter_map(|index| {
                self.columns
                    .get(column_index)
                    .and_then(|column| column.entries().get(*index))
            })
            .filter(|entry| entry.is_selectable())
            .cloned()
            .collect::<Vec<_>>();

        let Some(first) = entries.first() else {
            return;
        };

        match self.policy {
            SelectionPolicy::PickOne => {}
            SelectionPolicy::MultiWithQuantity => {
                let all_chosen = entries
                    .iter()
                    .all(|entry| entry.chosen_count() >= entry.get_available_count());

                for entry in entries.iter() {
                    let count = if all_chosen { 0 } else { entry.get_available_count() };
                    if let Some(location) = entry.location() {
                        self.set_chosen_count(location, count);
                    }
                }
            }
            SelectionPolicy::ComparePair { .. } => {
                if let Some(location) = first.location() {
                    for (location, count) in self.policy.toggle_compared(location) {
                        self.set_chosen_count(&location, count);
                    }
                }
            }
            SelectionPolicy::DropWithQuantity { .. } => {
                let Some(location) = first.location().clone() else {
                    return;
                };

                if self.policy.dropping_count(&location) > 0 {
                    self.policy.set_dropping(&location, 0);
                    self.set_chosen_count(&location, 0);
                } else if first.get_available_count() <= 1 {
                    self.policy.set_dropping(&location, 1);
                    self.set_chosen_count(&location, 1);
                } else {
                    log::debug!("Asking how many of {} to drop", location);
                    self.policy.open_prompt(location, first.get_available_count());
                }

                self.layout_is_valid = false;
            }
        }
    }

    fn on_prompt_input(&mut self, action: InputAction) {
        match action {
            InputAction::Invlet(c) => {
                if let Some(prompt) = self.policy.prompt_mut() {
                    prompt.push(c);
                }
            }
            InputAction::Erase => {
                if let Some(prompt) = self.policy.prompt_mut() {
                    prompt.erase();
                }
            }
            InputAction::Confirm => {
                if let Some(prompt) = self.policy.close_prompt() {
                    let count = prompt.value();
                    self.policy.set_dropping(&prompt.location, count);
                    self.set_chosen_count(&prompt.location, count);
                    self.layout_is_valid = false;
                }
            }
            InputAction::Quit => {
                self.policy.close_prompt();
            }
            _ => {}
        }
    }

    fn on_confirm(&mut self) -> Option<SelectorOutcome> {
        match &self.policy {
            SelectionPolicy::PickOne => {
                let location = self
                    .get_active_column()
                    .and_then(ColumnModel::get_selected)
                    .and_then(|entry| entry.location().clone())?;
                Some(SelectorOutcome::Picked(Some(location)))
            }
            SelectionPolicy::MultiWithQuantity => {
                let chosen = self
                    .columns
                    .iter()
                    .filter(|column| !column.is_selection())
                    .flat_map(|column| column.entries().iter())
                    .filter(|entry| entry.chosen_count() > 0)
                    .filter_map(|entry| {
                        entry
                            .location()
                            .clone()
                            .map(|location| (location, entry.chosen_count()))
                    })
                    .collect();
                Some(SelectorOutcome::Chosen(chosen))
            }
            SelectionPolicy::ComparePair { .. } => match self.policy.compared_pair() {
                Some(pair) => Some(SelectorOutcome::Compared(Some(pair))),
                None => {
                    self.notice = Some("Select two items to compare".to_string());
                    None
                }
            },
            SelectionPolicy::DropWithQuantity { .. } => {
                Some(SelectorOutcome::Dropped(self.policy.dropping()))
            }
        }
    }

    /// Applies one action. Returns the outcome once the selector is done.
    pub fn on_input(&mut self, action: InputAction) -> anyhow::Result<Option<SelectorOutcome>> {
        if self.policy.prompt().is_some() {
            self.on_prompt_input(action);
            return anyhow::Ok(None);
        }

        if !matches!(action, InputAction::Tick | InputAction::Resize(..)) {
            self.notice = None;
        }

        match action {
            InputAction::Up
            | InputAction::Down
            | InputAction::PageUp
            | InputAction::PageDown
            | InputAction::Home
            | InputAction::End => {
                if let Some(column) = self.columns.get_mut(self.active_column_index) {
                    column.on_input(action);
                }
            }
            InputAction::Left => self.toggle_active_column(ScrollDirection::Backward),
            InputAction::Right => self.toggle_active_column(ScrollDirection::Forward),
            InputAction::CategorySelection => self.toggle_navigation_mode(),
            InputAction::Quit => {
                log::info!("Selector cancelled");
                return anyhow::Ok(Some(self.policy.cancelled()));
            }
            InputAction::Confirm => {
                let outcome = self.on_confirm();
                if let Some(outcome) = &outcome {
                    log::info!("Selector confirmed: {:?}", outcome);
                }
                return anyhow::Ok(outcome);
            }
            InputAction::ToggleEntry => {
                let indices = self
                    .get_active_column()
                    .map(ColumnModel::selected_indices)
                    .unwrap_or_default();
                self.toggle_entries(self.active_column_index, &indices);
            }
            InputAction::Invlet(invlet) => {
                let Some((column_index, entry_index)) = self.find_entry_by_invlet(invlet) else {
                    log::debug!("No entry bound to {:?}", invlet);
                    return anyhow::Ok(None);
                };

                self.set_active_column(column_index);
                self.columns[column_index].select(entry_index, ScrollDirection::Forward);

                if let SelectionPolicy::PickOne = self.policy {
                    let location = self.selected_location(column_index, entry_index);
                    log::info!("Selector picked {:?}", location);
                    return anyhow::Ok(Some(SelectorOutcome::Picked(location)));
                }

                self.toggle_entries(column_index, &[entry_index]);
            }
            InputAction::Erase | InputAction::Resize(..) | InputAction::Tick => {}
        }

        anyhow::Ok(None)
    }

    /// Runs the interaction loop until the selector is confirmed or cancelled.
    pub async fn execute<B: Backend, I: InputSource>(
        &mut self,
        tui: &mut Tui<B>,
        input: &mut I,
    ) -> anyhow::Result<SelectorOutcome> {
        log::info!(
            "Selector {:?} started with the {} policy",
            self.title,
            self.policy.name()
        );

        loop {
            let terminal = arg_context!(tui.size())?;
            self.update(terminal);
            raw_context!(tui.draw(self))?;

            let action = raw_context!(input.next_action().await)?;
            if let Some(outcome) = arg_context!(self.on_input(action))? {
                return anyhow::Ok(outcome);
            }
        }
    }
}

impl<'a> Render for SelectorModel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        SelectorView::new(self).render(frame, area);
    }
}
