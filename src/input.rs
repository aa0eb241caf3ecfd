use std::{collections::VecDeque, future::Future};

use wrap_context::{liab, raw_context};

use crate::{
    event::{Event, EventHandler},
    handler::key_to_action,
};

/// Semantic actions the selector understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Activates the previous column.
    Left,
    /// Activates the next column.
    Right,
    CategorySelection,
    Confirm,
    Quit,
    ToggleEntry,
    Invlet(char),
    Erase,
    Resize(u16, u16),
    Tick,
}

/// Blocking source of the next action.
pub trait InputSource {
    fn next_action(&mut self) -> impl Future<Output = anyhow::Result<InputAction>>;
}

/// Reads actions from the terminal.
#[derive(Debug)]
pub struct CrosstermInput {
    events: EventHandler,
}

impl CrosstermInput {
    pub fn new(events: EventHandler) -> Self {
        Self { events }
    }
}

impl InputSource for CrosstermInput {
    async fn next_action(&mut self) -> anyhow::Result<InputAction> {
        loop {
            let event = raw_context!(self.events.next().await)?;

            let action = match event {
                Event::Tick => Some(InputAction::Tick),
                Event::Key(key_event) => key_to_action(key_event),
                Event::Resize(width, height) => Some(InputAction::Resize(width, height)),
                Event::Mouse(_) => None,
            };

            if let Some(action) = action {
                return anyhow::Ok(action);
            }
        }
    }
}

/// Replays a fixed list of actions.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    actions: VecDeque<InputAction>,
}

impl ScriptedInput {
    pub fn new<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = InputAction>,
    {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl InputSource for ScriptedInput {
    async fn next_action(&mut self) -> anyhow::Result<InputAction> {
        match self.actions.pop_front() {
            Some(action) => anyhow::Ok(action),
            None => liab!("Scripted input is exhausted"),
        }
    }
}
