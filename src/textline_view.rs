use itertools::Itertools;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use crate::{render::Render, textline_model::TextLineModel};

#[derive(Debug, Default)]
pub struct TextLineView<'a> {
    area: Rect,
    left_line: Line<'a>,
    rght_line: Line<'a>,
}

impl<'a> From<&TextLineModel> for TextLineView<'a> {
    fn from(model: &TextLineModel) -> Self {
        let area = model.area();

        let left_line = Line::from(
            model
                .show_left_spans()
                .iter()
                .map(|(content, style)| Span::styled(content.clone(), *style))
                .collect_vec(),
        )
        .style(model.style())
        .left_aligned();

        let rght_line = Line::from(
            model
                .show_rght_spans()
                .iter()
                .map(|(content, style)| Span::styled(content.clone(), *style))
                .collect_vec(),
        )
        .style(model.style())
        .right_aligned();

        Self {
            area,
            left_line,
            rght_line,
        }
    }
}

impl<'a> Render for TextLineView<'a> {
    /// Draws into the model's own area; `_area` is the frame's.
    fn render(&mut self, frame: &mut Frame, _area: Rect) {
        frame.render_widget(&self.left_line, self.area);
        frame.render_widget(&self.rght_line, self.area);
    }
}
