use impl_helper::ImplHelper;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

use wrap_context::{arg_context, liab, raw_context};

use crate::types::NavigationMode;

pub const MIN_COLUMN_WIDTH: usize = 16;
pub const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ImplHelper)]
#[serde(default)]
pub struct Preferences {
    /// First key handed out to items without a key of their own.
    #[helper(copy, upd)]
    min_invlet: char,

    #[helper(copy, upd)]
    max_invlet: char,

    #[helper(copy, upd)]
    column_gap: usize,

    /// Built-in columns never get narrower than this.
    #[helper(copy, upd)]
    min_column_width: usize,

    #[helper(copy, upd)]
    display_stats: bool,

    #[helper(copy, upd)]
    navigation_mode: NavigationMode,

    #[helper(copy, upd)]
    nearby_radius: i32,

    /// Free cells kept between the window and the terminal edges.
    #[helper(copy, upd)]
    margin: u16,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            min_invlet: '0',
            max_invlet: '9',
            column_gap: COLUMN_GAP,
            min_column_width: MIN_COLUMN_WIDTH,
            display_stats: true,
            navigation_mode: NavigationMode::Item,
            nearby_radius: 1,
            margin: 1,
        }
    }
}

impl Preferences {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = arg_context!(File::open(path))?;
        let preferences: Self = raw_context!(serde_json::from_reader(BufReader::new(file)))?;
        arg_context!(preferences.validate())?;
        anyhow::Ok(preferences)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_invlet > self.max_invlet {
            liab!(
                "Empty invlet range: {:?}..={:?}",
                self.min_invlet,
                self.max_invlet
            );
        }

        if self.nearby_radius < 0 {
            liab!("Negative nearby radius: {}", self.nearby_radius);
        }

        anyhow::Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let preferences: Preferences =
            serde_json::from_str(r#"{ "max_invlet": "5", "navigation_mode": "category" }"#).unwrap();

        assert_eq!(preferences.min_invlet(), '0');
        assert_eq!(preferences.max_invlet(), '5');
        assert_eq!(preferences.navigation_mode(), NavigationMode::Category);
        assert_eq!(preferences.min_column_width(), MIN_COLUMN_WIDTH);
        assert!(preferences.validate().is_ok());
    }

    #[test]
    fn empty_invlet_range_is_rejected() {
        let preferences: Preferences =
            serde_json::from_str(r#"{ "min_invlet": "9", "max_invlet": "0" }"#).unwrap();

        assert!(preferences.validate().is_err());
    }
}
