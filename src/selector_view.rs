use itertools::Itertools;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Clear},
    Frame,
};

use crate::{
    category::CategoryCatalog,
    column_model::ColumnModel,
    render::Render,
    selector_model::SelectorModel,
    textline_model::TextLineModel,
    textline_view::TextLineView,
};

#[derive(Debug)]
pub struct SelectorView<'a> {
    window: Rect,
    block: Block<'a>,
    header: Vec<TextLineView<'a>>,
    columns: Vec<(Rect, &'a ColumnModel)>,
    catalog: &'a CategoryCatalog,
    footer_area: Rect,
    footer: Line<'a>,
}

impl<'a> SelectorView<'a> {
    pub fn new(model: &'a SelectorModel<'_>) -> Self {
        let window = model.window();
        let block = Block::bordered().border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(window);

        let header_height = (model.get_header_height() as u16).min(inner.height);
        let footer_height = u16::from(inner.height > header_height);

        let mut title_line = TextLineModel::default();
        title_line
            .left_spans_update(vec![(model.title().clone(), Style::default().bold())])
            .rght_spans_update(
                Itertools::intersperse(
                    model
                        .get_stats()
                        .into_iter()
                        .map(|stat| (stat, Style::default().fg(Color::Gray))),
                    (" ".to_string(), Style::default()),
                )
                .collect(),
            )
            .area_update(Rect::new(inner.x, inner.y, inner.width, header_height.min(1)));

        let mut header = vec![TextLineView::from(&title_line)];

        if header_height > 1 {
            let mut hint_line = TextLineModel::default();
            hint_line
                .left_spans_update(vec![(model.hint().clone(), Style::default().fg(Color::DarkGray))])
                .area_update(Rect::new(inner.x, inner.y + 1, inner.width, 1));
            header.push(TextLineView::from(&hint_line));
        }

        let columns_area = Rect::new(
            inner.x,
            inner.y + header_height,
            inner.width,
            inner.height - header_height - footer_height,
        );

        let columns = model
            .layout()
            .areas(columns_area)
            .into_iter()
            .filter_map(|(index, area)| {
                model
                    .columns()
                    .get(index)
                    .filter(|column| column.visible())
                    .map(|column| (area, column))
            })
            .collect_vec();

        let footer_area = Rect::new(
            inner.x,
            inner.bottom() - footer_height,
            inner.width,
            footer_height,
        );

        let footer = match model.policy().prompt() {
            Some(prompt) => Line::from(format!(
                "Drop how many {}? [1-{}]: {}",
                prompt.location.item().name,
                prompt.max,
                prompt.input
            ))
            .style(Style::default().fg(Color::White))
            .left_aligned(),
            None => {
                let (text, color) = model.get_footer(model.mode());
                Line::from(text).style(Style::default().fg(color)).centered()
            }
        };

        Self {
            window,
            block,
            header,
            columns,
            catalog: model.catalog(),
            footer_area,
            footer,
        }
    }
}

impl<'a> Render for SelectorView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let window = self.window.intersection(area);

        frame.render_widget(Clear, window);
        frame.render_widget(&self.block, window);

        for line in self.header.iter_mut() {
            line.render(frame, area);
        }

        for (column_area, column) in self.columns.iter() {
            column.draw(frame, *column_area, self.catalog);
        }

        frame.render_widget(&self.footer, self.footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::InputAction,
        policy::SelectionPolicy,
        preferences::Preferences,
        preset::DefaultPreset,
        scenario::tests::scenario,
    };
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn draws_frame_header_columns_and_footer() {
        let scenario = scenario();
        let mut selector = SelectorModel::new(
            &scenario,
            Rc::new(DefaultPreset::default()),
            Preferences::default(),
            SelectionPolicy::drop_with_quantity(),
        );
        selector.set_title("Drop what?");
        selector.add_character_items().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let area = Rect::new(0, 0, 80, 20);
        selector.update(area);
        terminal
            .draw(|frame| {
                let area = frame.area();
                selector.render(frame, area);
            })
            .unwrap();

        let screen = screen(&terminal);
        let window = selector.window();
        let top = &screen[usize::from(window.y)];
        let title_row = &screen[usize::from(window.y) + 1];

        assert!(top.contains('┌'));
        assert!(title_row.contains("Drop what?"));
        assert!(title_row.contains("Weight (kg): 3.2/45.0"));
        assert!(screen.iter().any(|row| row.contains("20 aspirin")));
        assert!(screen.iter().any(|row| row.contains("ITEMS WORN")));
        assert!(screen.iter().any(|row| row.contains("Item selection; [Tab] switch mode")));

        selector.on_input(InputAction::ToggleEntry).unwrap();
        selector.update(area);
        terminal
            .draw(|frame| {
                let area = frame.area();
                selector.render(frame, area);
            })
            .unwrap();

        let screen = self::screen(&terminal);
        assert!(screen.iter().any(|row| row.contains("Drop how many aspirin? [1-20]: ")));
        assert_eq!(window, selector.window());
    }
}
