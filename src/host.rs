//! Interfaces of the host game model.
//!
//! The selector never decides what an item weighs, where it lies or which
//! shortcut key the character already uses for it. It asks the host through
//! [`Character`] and [`World`], and refers to items through [`ItemLocation`].

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, hash::Hash, rc::Rc};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tripoint {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl Tripoint {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z)
    }
}

impl fmt::Display for Tripoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_rank: i32,
}

impl ItemCategory {
    pub fn new(id: &str, name: &str, sort_rank: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sort_rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub weight_g: u32,
    #[serde(default)]
    pub volume_ml: u32,
    /// The shortcut key the host already uses for this item, if any.
    #[serde(default)]
    pub invlet: Option<char>,
}

impl Item {
    /// Ordering used when a preset has no opinion of its own.
    pub fn natural_cmp(&self, other: &Item) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Identical items the host considers a single stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Rc<Item>,
    #[serde(default = "one")]
    pub count: usize,
}

fn one() -> usize {
    1
}

impl ItemStack {
    pub fn new(item: Rc<Item>, count: usize) -> Self {
        Self { item, count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemPlace {
    Carried,
    Worn,
    Wielded,
    Ground(Tripoint),
    Vehicle(Tripoint),
}

/// A reference to an item together with the place it is reachable from.
///
/// Two locations are equal when they point at the same item in the same place.
#[derive(Debug, Clone)]
pub struct ItemLocation {
    place: ItemPlace,
    item: Rc<Item>,
}

impl ItemLocation {
    pub fn new(place: ItemPlace, item: Rc<Item>) -> Self {
        Self { place, item }
    }

    pub fn place(&self) -> ItemPlace {
        self.place
    }

    pub fn item(&self) -> &Item {
        &self.item
    }
}

impl PartialEq for ItemLocation {
    fn eq(&self, other: &Self) -> bool {
        self.place == other.place && self.item.id == other.item.id
    }
}

impl Eq for ItemLocation {}

impl Hash for ItemLocation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.place.hash(state);
        self.item.id.hash(state);
    }
}

impl fmt::Display for ItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.place {
            ItemPlace::Carried => write!(f, "{} (carried)", self.item.name),
            ItemPlace::Worn => write!(f, "{} (worn)", self.item.name),
            ItemPlace::Wielded => write!(f, "{} (wielded)", self.item.name),
            ItemPlace::Ground(pos) => write!(f, "{} (ground {})", self.item.name, pos),
            ItemPlace::Vehicle(pos) => write!(f, "{} (vehicle {})", self.item.name, pos),
        }
    }
}

/// The acting character as seen by the selector.
pub trait Character: fmt::Debug {
    fn name(&self) -> &str;

    fn position(&self) -> Tripoint;

    fn carried_stacks(&self) -> Vec<ItemStack>;

    fn worn_items(&self) -> Vec<Rc<Item>>;

    fn wielded_item(&self) -> Option<Rc<Item>>;

    fn has_item(&self, item: &Item) -> bool;

    /// The stable shortcut key the character uses for `item`.
    fn bound_invlet(&self, item: &Item) -> Option<char>;

    /// Whether `invlet` is already taken by one of the character's items.
    fn is_invlet_bound(&self, invlet: char) -> bool;

    /// Header lines describing carried weight and volume.
    ///
    /// `excluded` lists items (with quantities) that should be treated as gone.
    fn stats(&self, excluded: &[(ItemLocation, usize)]) -> Vec<String>;
}

/// Enumerates items around the character.
pub trait World: fmt::Debug {
    fn tile_name(&self, pos: Tripoint) -> String;

    fn stacks_at(&self, pos: Tripoint) -> Vec<ItemStack>;

    /// Name of the vehicle part at `pos` and the stacks stored in it.
    fn vehicle_at(&self, pos: Tripoint) -> Option<(String, Vec<ItemStack>)>;
}
