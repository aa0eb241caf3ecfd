use crossterm::terminal;
use ratatui::{
    backend::Backend,
    crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    layout::{Rect, Size},
    Terminal,
};
use std::io;

use wrap_context::{arg_context, raw_context};

use crate::render::Render;

#[derive(Debug)]
pub struct Tui<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> Tui<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        arg_context!(crossterm::execute!(io::stderr(), EnterAlternateScreen))?;
        arg_context!(terminal::enable_raw_mode())?;

        let panic_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = reset();
            panic_hook(panic_info);
        }));

        anyhow::Ok(())
    }

    pub fn size(&self) -> anyhow::Result<Rect> {
        let Size { width, height } = raw_context!(self.terminal.size())?;
        anyhow::Ok(Rect::new(0, 0, width, height))
    }

    pub fn draw<R: Render>(&mut self, widget: &mut R) -> anyhow::Result<()> {
        raw_context!(self.terminal.draw(|frame| {
            let area = frame.area();
            widget.render(frame, area);
        }))?;
        anyhow::Ok(())
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn exit(&mut self) -> anyhow::Result<()> {
        arg_context!(reset())?;
        arg_context!(self.terminal.show_cursor())?;
        anyhow::Ok(())
    }
}

fn reset() -> anyhow::Result<()> {
    arg_context!(crossterm::execute!(io::stderr(), LeaveAlternateScreen))?;
    arg_context!(terminal::disable_raw_mode())?;
    anyhow::Ok(())
}
