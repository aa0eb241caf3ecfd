use ratatui::{layout::Rect, Frame};

pub trait Render {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
