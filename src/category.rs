use crate::{
    host::{ItemCategory, Tripoint},
    utils::{direction_suffix, square_dist},
};

pub const WEAPON_HELD_CATEGORY: &str = "WEAPON_HELD";
pub const ITEMS_WORN_CATEGORY: &str = "ITEMS_WORN";
pub const SELECTED_ITEMS_CATEGORY: &str = "SELECTED_ITEMS";

pub fn weapon_held_category() -> ItemCategory {
    ItemCategory::new(WEAPON_HELD_CATEGORY, "WEAPON HELD", -200)
}

pub fn items_worn_category() -> ItemCategory {
    ItemCategory::new(ITEMS_WORN_CATEGORY, "ITEMS WORN", -100)
}

pub fn selected_items_category() -> ItemCategory {
    ItemCategory::new(SELECTED_ITEMS_CATEGORY, "SELECTED ITEMS", 0)
}

/// Index of a category inside a [`CategoryCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(usize);

/// Owns every category an entry can refer to.
///
/// Categories are only ever appended, so a [`CategoryId`] stays valid for the
/// lifetime of the catalog.
#[derive(Debug, Default, Clone)]
pub struct CategoryCatalog {
    categories: Vec<ItemCategory>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&ItemCategory> {
        self.categories.get(id.0)
    }

    pub fn find(&self, category_id: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|category| category.id == category_id)
            .map(CategoryId)
    }

    /// Returns the id of an equal category, adding it first if needed.
    pub fn intern(&mut self, category: &ItemCategory) -> CategoryId {
        if let Some(id) = self.find(&category.id) {
            return id;
        }

        self.categories.push(category.clone());
        CategoryId(self.categories.len() - 1)
    }

    pub fn name(&self, id: CategoryId) -> &str {
        self.get(id).map(|category| category.name.as_str()).unwrap_or_default()
    }

    /// Categories go by rank, ties are broken by the order they were added in.
    pub fn sort_key(&self, id: CategoryId) -> (i32, usize) {
        (
            self.get(id).map(|category| category.sort_rank).unwrap_or(i32::MAX),
            id.0,
        )
    }

    /// Makes a per-position copy of `category` for items lying at `pos`.
    ///
    /// Items on the character's own tile keep the plain category. Anything
    /// further away gets a compass suffix and sinks in the ordering with
    /// distance.
    pub fn naturalize(
        &mut self,
        category: &ItemCategory,
        pos: Tripoint,
        origin: Tripoint,
    ) -> CategoryId {
        let dist = square_dist(origin, pos);

        if dist == 0 {
            return self.intern(category);
        }

        let suffix = direction_suffix(origin, pos);

        self.intern(&ItemCategory {
            id: format!("{}_{}", category.id, suffix),
            name: format!("{} {}", category.name, suffix),
            sort_rank: category.sort_rank + dist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_deduplicates_by_id() {
        let mut catalog = CategoryCatalog::new();
        let tools = ItemCategory::new("tools", "TOOLS", 10);

        let first = catalog.intern(&tools);
        let second = catalog.intern(&ItemCategory::new("tools", "TOOLS (again)", 99));

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.name(first), "TOOLS");
    }

    #[test]
    fn naturalize_adds_direction_and_distance() {
        let mut catalog = CategoryCatalog::new();
        let ground = ItemCategory::new("dirt", "DIRT", 100);
        let origin = Tripoint::new(0, 0, 0);

        let here = catalog.naturalize(&ground, origin, origin);
        let north = catalog.naturalize(&ground, Tripoint::new(0, -1, 0), origin);
        let north_again = catalog.naturalize(&ground, Tripoint::new(0, -1, 0), origin);

        assert_eq!(catalog.name(here), "DIRT");
        assert_eq!(catalog.name(north), "DIRT N");
        assert_eq!(north, north_again);
        assert_eq!(catalog.sort_key(north), (101, 1));
    }
}
