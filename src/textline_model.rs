use impl_helper::ImplHelper;
use ratatui::{layout::Rect, style::Style};

use crate::utils::{clip_string, text_width};

pub type TextSpan = (String, Style);

/// One row of text: spans pinned to the left edge and spans pinned to the
/// right edge. The right side wins when the row is too narrow for both.
#[derive(Default, Debug, Clone, ImplHelper)]
pub struct TextLineModel {
    #[helper(copy /* upd is custom */)]
    area: Rect,

    #[helper(/* upd is custom */)]
    left_spans: Vec<TextSpan>,

    #[helper(/* upd is custom */)]
    rght_spans: Vec<TextSpan>,

    #[helper(get)]
    show_left_spans: Vec<TextSpan>,

    #[helper(get)]
    show_rght_spans: Vec<TextSpan>,

    #[helper(copy, set, upd)]
    style: Style,
}

fn clip_spans(spans: &[TextSpan], width: usize) -> Vec<TextSpan> {
    let mut remaining = width;

    spans
        .iter()
        .map(|(content, style)| {
            let content = clip_string(content.clone(), "…", remaining);
            remaining -= text_width(&content);
            (content, *style)
        })
        .filter(|(content, _)| !content.is_empty())
        .collect()
}

impl TextLineModel {
    fn make_show_spans(&mut self) {
        let width = usize::from(self.area.width);

        self.show_rght_spans = clip_spans(&self.rght_spans, width);

        let rght_width: usize = self
            .show_rght_spans
            .iter()
            .map(|(content, _)| text_width(content))
            .sum();
        let left_width = match rght_width {
            0 => width,
            _ => width.saturating_sub(rght_width + 1),
        };

        self.show_left_spans = clip_spans(&self.left_spans, left_width);
    }

    /// Width the row needs to show everything.
    pub fn desired_width(&self) -> usize {
        let width = |spans: &[TextSpan]| -> usize {
            spans.iter().map(|(content, _)| text_width(content)).sum()
        };

        match (width(&self.left_spans), width(&self.rght_spans)) {
            (left, 0) => left,
            (0, rght) => rght,
            (left, rght) => left + 1 + rght,
        }
    }

    pub fn area_update(&mut self, value: Rect) -> &mut Self {
        self.area = value;
        self.make_show_spans();
        self
    }

    pub fn left_spans_update(&mut self, value: Vec<TextSpan>) -> &mut Self {
        self.left_spans = value;
        self.make_show_spans();
        self
    }

    pub fn rght_spans_update(&mut self, value: Vec<TextSpan>) -> &mut Self {
        self.rght_spans = value;
        self.make_show_spans();
        self
    }
}
