use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Item,
    Category,
}

impl NavigationMode {
    pub fn toggled(self) -> Self {
        match self {
            NavigationMode::Item => NavigationMode::Category,
            NavigationMode::Category => NavigationMode::Item,
        }
    }

    /// Footer label and color shown while the mode is active.
    pub fn footer(self) -> (&'static str, Color) {
        match self {
            NavigationMode::Item => ("Item selection; [Tab] switch mode", Color::Gray),
            NavigationMode::Category => ("Category selection; [Tab] switch mode", Color::White),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// The neighbour of `index` in a ring of `len` elements.
    pub fn step(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }

        match self {
            ScrollDirection::Forward => (index + 1) % len,
            ScrollDirection::Backward => (index + len - 1) % len,
        }
    }
}
