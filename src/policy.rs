//! What a selector does when entries are toggled and when it is confirmed.

use indexmap::IndexMap;

use crate::host::ItemLocation;

/// Inline prompt asking how many items of a stack to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityPrompt {
    pub location: ItemLocation,
    pub max: usize,
    pub input: String,
}

impl QuantityPrompt {
    pub fn new(location: ItemLocation, max: usize) -> Self {
        Self {
            location,
            max,
            input: String::default(),
        }
    }

    /// Accepts digits only, as many as `max` has.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() && self.input.len() < self.max.to_string().len() {
            self.input.push(c);
        }
    }

    pub fn erase(&mut self) {
        self.input.pop();
    }

    /// The typed amount clamped to `[1, max]`, `max` when nothing was typed.
    pub fn value(&self) -> usize {
        match self.input.parse::<usize>() {
            Ok(value) => value.clamp(1, self.max.max(1)),
            Err(_) => self.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    PickOne,
    MultiWithQuantity,
    ComparePair {
        /// Oldest first.
        compared: Vec<ItemLocation>,
    },
    DropWithQuantity {
        dropping: IndexMap<ItemLocation, usize>,
        prompt: Option<QuantityPrompt>,
    },
}

impl SelectionPolicy {
    pub fn compare_pair() -> Self {
        Self::ComparePair {
            compared: Vec::default(),
        }
    }

    pub fn drop_with_quantity() -> Self {
        Self::DropWithQuantity {
            dropping: IndexMap::default(),
            prompt: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PickOne => "pick",
            Self::MultiWithQuantity => "multi",
            Self::ComparePair { .. } => "compare",
            Self::DropWithQuantity { .. } => "drop",
        }
    }

    /// Whether entries carry chosen counts mirrored in a selection column.
    pub fn is_multiselect(&self) -> bool {
        !matches!(self, Self::PickOne)
    }

    /// Outcome of a cancelled selector.
    pub fn cancelled(&self) -> SelectorOutcome {
        match self {
            Self::PickOne => SelectorOutcome::Picked(None),
            Self::MultiWithQuantity => SelectorOutcome::Chosen(Vec::default()),
            Self::ComparePair { .. } => SelectorOutcome::Compared(None),
            Self::DropWithQuantity { .. } => SelectorOutcome::Dropped(Vec::default()),
        }
    }

    /// Adds `location` to the compared pair, or removes it if it is already
    /// there. Returns the new chosen counts of every affected item.
    pub fn toggle_compared(&mut self, location: &ItemLocation) -> Vec<(ItemLocation, usize)> {
        let Self::ComparePair { compared } = self else {
            return Vec::default();
        };

        if let Some(position) = compared.iter().position(|current| current == location) {
            compared.remove(position);
            return vec![(location.clone(), 0)];
        }

        let mut changes = Vec::default();
        compared.push(location.clone());
        if compared.len() > 2 {
            changes.push((compared.remove(0), 0));
        }
        changes.push((location.clone(), 1));

        changes
    }

    pub fn compared_pair(&self) -> Option<(ItemLocation, ItemLocation)> {
        match self {
            Self::ComparePair { compared } if compared.len() == 2 => {
                Some((compared[0].clone(), compared[1].clone()))
            }
            _ => None,
        }
    }

    pub fn set_dropping(&mut self, location: &ItemLocation, count: usize) {
        if let Self::DropWithQuantity { dropping, .. } = self {
            if count == 0 {
                dropping.shift_remove(location);
            } else {
                dropping.insert(location.clone(), count);
            }
        }
    }

    pub fn dropping_count(&self, location: &ItemLocation) -> usize {
        match self {
            Self::DropWithQuantity { dropping, .. } => {
                dropping.get(location).copied().unwrap_or_default()
            }
            _ => 0,
        }
    }

    /// Items about to be dropped, in the order they were chosen.
    pub fn dropping(&self) -> Vec<(ItemLocation, usize)> {
        match self {
            Self::DropWithQuantity { dropping, .. } => dropping
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(location, count)| (location.clone(), *count))
                .collect(),
            _ => Vec::default(),
        }
    }

    pub fn prompt(&self) -> Option<&QuantityPrompt> {
        match self {
            Self::DropWithQuantity { prompt, .. } => prompt.as_ref(),
            _ => None,
        }
    }

    pub fn prompt_mut(&mut self) -> Option<&mut QuantityPrompt> {
        match self {
            Self::DropWithQuantity { prompt, .. } => prompt.as_mut(),
            _ => None,
        }
    }

    pub fn open_prompt(&mut self, location: ItemLocation, max: usize) {
        if let Self::DropWithQuantity { prompt, .. } = self {
            *prompt = Some(QuantityPrompt::new(location, max));
        }
    }

    pub fn close_prompt(&mut self) -> Option<QuantityPrompt> {
        match self {
            Self::DropWithQuantity { prompt, .. } => prompt.take(),
            _ => None,
        }
    }
}

/// What a selector returns. Cancelling yields `None` or an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    Picked(Option<ItemLocation>),
    Chosen(Vec<(ItemLocation, usize)>),
    Compared(Option<(ItemLocation, ItemLocation)>),
    Dropped(Vec<(ItemLocation, usize)>),
}

impl SelectorOutcome {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Picked(picked) => picked.is_none(),
            Self::Chosen(chosen) => chosen.is_empty(),
            Self::Compared(compared) => compared.is_none(),
            Self::Dropped(dropped) => dropped.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{column_model::tests::location, host::ItemCategory};
    use pretty_assertions::assert_eq;

    #[test]
    fn compare_evicts_the_oldest() {
        let category = ItemCategory::new("tools", "TOOLS", 0);
        let [a, b, c] = [1, 2, 3].map(|id| location(id, "tool", &category));
        let mut policy = SelectionPolicy::compare_pair();

        assert_eq!(policy.toggle_compared(&a), [(a.clone(), 1)]);
        assert_eq!(policy.toggle_compared(&b), [(b.clone(), 1)]);
        assert_eq!(policy.toggle_compared(&c), [(a.clone(), 0), (c.clone(), 1)]);
        assert_eq!(policy.compared_pair(), Some((b.clone(), c.clone())));

        assert_eq!(policy.toggle_compared(&b), [(b.clone(), 0)]);
        assert_eq!(policy.compared_pair(), None);
    }

    #[test]
    fn drop_keeps_only_non_zero_counts() {
        let category = ItemCategory::new("tools", "TOOLS", 0);
        let [a, b] = [1, 2].map(|id| location(id, "tool", &category));
        let mut policy = SelectionPolicy::drop_with_quantity();

        policy.set_dropping(&a, 3);
        policy.set_dropping(&b, 1);
        policy.set_dropping(&a, 0);

        assert_eq!(policy.dropping(), [(b.clone(), 1)]);
        assert_eq!(policy.dropping_count(&a), 0);
        assert!(policy.cancelled().is_empty());
    }

    #[test]
    fn prompt_clamps_the_amount() {
        let category = ItemCategory::new("ammo", "AMMO", 0);
        let mut prompt = QuantityPrompt::new(location(1, "bolt", &category), 12);
        assert_eq!(prompt.value(), 12);

        for c in ['x', '9', '9', '9'] {
            prompt.push(c);
        }
        assert_eq!(prompt.input, "99");
        assert_eq!(prompt.value(), 12);

        prompt.erase();
        assert_eq!(prompt.value(), 9);

        prompt.erase();
        prompt.push('0');
        assert_eq!(prompt.value(), 1);
    }
}
