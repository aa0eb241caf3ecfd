pub mod category;
pub mod column_layout;
pub mod column_model;
pub mod column_view;
pub mod entry;
pub mod event;
pub mod handler;
pub mod host;
pub mod input;
pub mod invlet;
pub mod paginator;
pub mod policy;
pub mod preferences;
pub mod preset;
pub mod render;
pub mod scenario;
pub mod selection_column;
pub mod selector_model;
pub mod selector_view;
pub mod textline_model;
pub mod textline_view;
pub mod tui;
pub mod types;
pub mod utils;
