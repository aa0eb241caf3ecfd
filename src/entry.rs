use impl_helper::ImplHelper;
use ratatui::style::Color;

use crate::{category::CategoryId, host::ItemLocation};

/// A single row of a column: an item stack or a category header.
///
/// An entry without a category is a null placeholder. Null entries are only
/// used as sentinels and never end up in a column.
#[derive(Debug, Default, Clone, ImplHelper)]
pub struct Entry {
    #[helper(get)]
    location: Option<ItemLocation>,

    #[helper(copy)]
    stack_size: usize,

    #[helper(copy, upd)]
    chosen_count: usize,

    /// Key handed out by the selector when the item has no stable one.
    #[helper(copy, upd)]
    custom_invlet: Option<char>,

    #[helper(copy)]
    category: Option<CategoryId>,

    #[helper(copy)]
    enabled: bool,
}

impl Entry {
    pub fn new_item(
        location: ItemLocation,
        stack_size: usize,
        category: CategoryId,
        enabled: bool,
    ) -> Self {
        Self {
            location: Some(location),
            stack_size,
            chosen_count: 0,
            custom_invlet: None,
            category: Some(category),
            enabled,
        }
    }

    pub fn new_category(category: CategoryId) -> Self {
        Self {
            location: None,
            stack_size: 0,
            chosen_count: 0,
            custom_invlet: None,
            category: Some(category),
            enabled: true,
        }
    }

    /// A copy of this entry filed under another category.
    pub fn with_category(&self, category: CategoryId) -> Self {
        Self {
            category: Some(category),
            ..self.clone()
        }
    }

    pub fn is_null(&self) -> bool {
        self.category.is_none()
    }

    pub fn is_item(&self) -> bool {
        self.location.is_some()
    }

    pub fn is_category(&self) -> bool {
        !self.is_null() && !self.is_item()
    }

    pub fn is_selectable(&self) -> bool {
        self.is_item() && self.enabled
    }

    pub fn get_available_count(&self) -> usize {
        if self.is_item() {
            self.stack_size
        } else {
            0
        }
    }

    pub fn get_invlet(&self) -> Option<char> {
        self.custom_invlet.or_else(|| {
            self.location
                .as_ref()
                .and_then(|location| location.item().invlet)
        })
    }

    pub fn get_invlet_color(&self) -> Color {
        if !self.is_selectable() {
            Color::DarkGray
        } else if self.custom_invlet.is_some() {
            Color::Gray
        } else {
            Color::White
        }
    }

    pub(crate) fn set_stack_size(&mut self, stack_size: usize) {
        self.stack_size = stack_size;
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        match (&self.location, &other.location) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            (None, None) => self.category == other.category,
            _ => false,
        }
    }
}
