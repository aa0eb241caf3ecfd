//! A JSON-described character and the tiles around them.

use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path, rc::Rc};

use wrap_context::{arg_context, raw_context};

use crate::host::{Character, Item, ItemLocation, ItemStack, Tripoint, World};

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCharacter {
    pub name: String,
    #[serde(default)]
    pub position: Tripoint,
    #[serde(default)]
    pub carried: Vec<ItemStack>,
    #[serde(default)]
    pub worn: Vec<Rc<Item>>,
    #[serde(default)]
    pub wielded: Option<Rc<Item>>,
    #[serde(default = "default_weight_capacity")]
    pub weight_capacity_g: u32,
    #[serde(default = "default_volume_capacity")]
    pub volume_capacity_ml: u32,
}

fn default_weight_capacity() -> u32 {
    45_000
}

fn default_volume_capacity() -> u32 {
    20_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tile {
    pub pos: Tripoint,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemStack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub pos: Tripoint,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemStack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub character: ScenarioCharacter,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = arg_context!(File::open(path))?;
        let scenario = raw_context!(serde_json::from_reader(BufReader::new(file)))?;
        anyhow::Ok(scenario)
    }

    fn possessed(&self) -> impl Iterator<Item = &Item> {
        let character = &self.character;

        character
            .carried
            .iter()
            .map(|stack| stack.item.as_ref())
            .chain(character.worn.iter().map(Rc::as_ref))
            .chain(character.wielded.iter().map(Rc::as_ref))
    }
}

impl Character for Scenario {
    fn name(&self) -> &str {
        &self.character.name
    }

    fn position(&self) -> Tripoint {
        self.character.position
    }

    fn carried_stacks(&self) -> Vec<ItemStack> {
        self.character.carried.clone()
    }

    fn worn_items(&self) -> Vec<Rc<Item>> {
        self.character.worn.clone()
    }

    fn wielded_item(&self) -> Option<Rc<Item>> {
        self.character.wielded.clone()
    }

    fn has_item(&self, item: &Item) -> bool {
        self.possessed().any(|own| own.id == item.id)
    }

    fn bound_invlet(&self, item: &Item) -> Option<char> {
        self.possessed()
            .find(|own| own.id == item.id)
            .and_then(|own| own.invlet)
    }

    fn is_invlet_bound(&self, invlet: char) -> bool {
        self.possessed().any(|own| own.invlet == Some(invlet))
    }

    fn stats(&self, excluded: &[(ItemLocation, usize)]) -> Vec<String> {
        let character = &self.character;

        let stacks = character
            .carried
            .iter()
            .map(|stack| (stack.item.as_ref(), stack.count))
            .chain(character.worn.iter().map(|item| (item.as_ref(), 1)))
            .chain(character.wielded.iter().map(|item| (item.as_ref(), 1)));

        let (mut weight_g, mut volume_ml) = (0u64, 0u64);
        for (item, count) in stacks {
            let dropped = excluded
                .iter()
                .filter(|(location, _)| location.item().id == item.id)
                .map(|(_, count)| *count)
                .sum::<usize>();
            let count = count.saturating_sub(dropped) as u64;

            weight_g += u64::from(item.weight_g) * count;
            volume_ml += u64::from(item.volume_ml) * count;
        }

        vec![
            format!(
                "Weight (kg): {:.1}/{:.1}",
                weight_g as f64 / 1000.0,
                f64::from(character.weight_capacity_g) / 1000.0
            ),
            format!(
                "Volume (L): {:.2}/{:.2}",
                volume_ml as f64 / 1000.0,
                f64::from(character.volume_capacity_ml) / 1000.0
            ),
        ]
    }
}

impl World for Scenario {
    fn tile_name(&self, pos: Tripoint) -> String {
        self.tiles
            .iter()
            .find(|tile| tile.pos == pos)
            .map(|tile| tile.name.clone())
            .unwrap_or("ground".to_string())
    }

    fn stacks_at(&self, pos: Tripoint) -> Vec<ItemStack> {
        self.tiles
            .iter()
            .filter(|tile| tile.pos == pos)
            .flat_map(|tile| tile.items.iter().cloned())
            .collect()
    }

    fn vehicle_at(&self, pos: Tripoint) -> Option<(String, Vec<ItemStack>)> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.pos == pos)
            .map(|vehicle| (vehicle.name.clone(), vehicle.items.clone()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::host::{ItemId, ItemPlace};
    use pretty_assertions::assert_eq;

    pub const SCENARIO: &str = r#"{
        "character": {
            "name": "Survivor",
            "position": { "x": 5, "y": 5 },
            "carried": [
                { "item": { "id": 1, "name": "aspirin", "category": { "id": "drugs", "name": "DRUGS", "sort_rank": 10 }, "weight_g": 10, "volume_ml": 10 }, "count": 20 },
                { "item": { "id": 2, "name": "crowbar", "category": { "id": "tools", "name": "TOOLS", "sort_rank": 20 }, "weight_g": 1500, "volume_ml": 750, "invlet": "c" } },
                { "item": { "id": 3, "name": "bandage", "category": { "id": "drugs", "name": "DRUGS", "sort_rank": 10 }, "weight_g": 20, "volume_ml": 50 }, "count": 4 }
            ],
            "worn": [
                { "id": 4, "name": "jeans", "category": { "id": "clothing", "name": "CLOTHING", "sort_rank": 30 }, "weight_g": 600, "volume_ml": 1500 },
                { "id": 5, "name": "backpack", "category": { "id": "clothing", "name": "CLOTHING", "sort_rank": 30 }, "weight_g": 800, "volume_ml": 2000 }
            ]
        },
        "tiles": [
            { "pos": { "x": 6, "y": 5 }, "name": "grass", "items": [
                { "item": { "id": 6, "name": "rock", "category": { "id": "other", "name": "OTHER", "sort_rank": 50 }, "weight_g": 500, "volume_ml": 250 }, "count": 3 }
            ] }
        ],
        "vehicles": [
            { "pos": { "x": 5, "y": 4 }, "name": "shopping cart", "items": [
                { "item": { "id": 7, "name": "can of beans", "category": { "id": "food", "name": "FOOD", "sort_rank": 5 }, "weight_g": 400, "volume_ml": 250 } }
            ] }
        ]
    }"#;

    pub fn scenario() -> Scenario {
        serde_json::from_str(SCENARIO).unwrap()
    }

    #[test]
    fn character_queries() {
        let scenario = scenario();

        assert_eq!(scenario.carried_stacks().len(), 3);
        assert_eq!(scenario.worn_items().len(), 2);
        assert!(scenario.wielded_item().is_none());
        assert!(scenario.is_invlet_bound('c'));
        assert!(!scenario.is_invlet_bound('0'));

        let crowbar = scenario.carried_stacks()[1].item.clone();
        assert_eq!(scenario.bound_invlet(&crowbar), Some('c'));
    }

    #[test]
    fn stats_exclude_dropped_items() {
        let scenario = scenario();
        let aspirin = scenario.carried_stacks()[0].item.clone();

        assert_eq!(
            scenario.stats(&[]),
            ["Weight (kg): 3.2/45.0", "Volume (L): 4.65/20.00"]
        );
        assert_eq!(
            scenario.stats(&[(ItemLocation::new(ItemPlace::Carried, aspirin), 20)]),
            ["Weight (kg): 3.0/45.0", "Volume (L): 4.45/20.00"]
        );
        assert_eq!(scenario.possessed().filter(|item| item.id == ItemId(6)).count(), 0);
    }

    #[test]
    fn world_queries() {
        let scenario = scenario();

        assert_eq!(scenario.tile_name(Tripoint::new(6, 5, 0)), "grass");
        assert_eq!(scenario.tile_name(Tripoint::new(0, 0, 0)), "ground");
        assert_eq!(scenario.stacks_at(Tripoint::new(6, 5, 0))[0].count, 3);
        assert!(scenario.vehicle_at(Tripoint::new(5, 4, 0)).is_some());
        assert!(scenario.vehicle_at(Tripoint::new(5, 5, 0)).is_none());
    }
}
