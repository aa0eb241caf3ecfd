use itertools::Itertools;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::{
    category::CategoryCatalog,
    column_model::{ColumnModel, CELL_GAP},
    entry::Entry,
    render::Render,
    utils::{align_left, align_right, clip_string, text_width},
};

pub const ACTIVE_HIGHLIGHT: Color = Color::Rgb(214, 94, 14);
pub const INACTIVE_HIGHLIGHT: Color = Color::Rgb(80, 73, 69);

#[derive(Debug, Clone, Default)]
pub struct ColumnView<'a> {
    list: List<'a>,
    page_line: Option<Line<'a>>,
}

impl<'a> ColumnView<'a> {
    pub fn new(model: &ColumnModel, catalog: &CategoryCatalog) -> Self {
        let list = List::new(
            model
                .entries()
                .get(model.paginator().page_range())
                .unwrap_or_default()
                .iter()
                .map(|entry| {
                    let highlighted = model.allows_selecting();
                    let style = if highlighted && model.active() && model.is_selected_by_category(entry) {
                        Style::default().bg(ACTIVE_HIGHLIGHT)
                    } else if highlighted && !model.active() && model.is_selected(entry) {
                        Style::default().bg(INACTIVE_HIGHLIGHT)
                    } else {
                        Style::default()
                    };

                    let line = if entry.is_category() {
                        category_line(model, entry, catalog)
                    } else {
                        item_line(model, entry, catalog)
                    };

                    ListItem::new(line).style(style)
                })
                .collect_vec(),
        );

        let page_line = (model.pages_count() > 1).then(|| {
            Line::styled(
                format!("Page {}/{}", model.page_index() + 1, model.pages_count()),
                Style::default().fg(Color::DarkGray),
            )
            .right_aligned()
        });

        Self { list, page_line }
    }
}

fn category_line<'a>(model: &ColumnModel, entry: &Entry, catalog: &CategoryCatalog) -> Line<'a> {
    let preset = model.preset();
    let color = preset.get_color(entry);

    let mut spans = vec![Span::styled(
        align_left(&preset.get_cell_text(entry, 0, catalog), model.get_cell_width(0)),
        Style::default().fg(color),
    )];

    for cell_index in 1..preset.get_cells_count() {
        let width = model.get_cell_text_width(cell_index);
        if width == 0 {
            continue;
        }

        spans.push(Span::styled(
            format!(
                "{}{}",
                " ".repeat(CELL_GAP),
                align_right(preset.get_cell_title(cell_index), width)
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn item_line<'a>(model: &ColumnModel, entry: &Entry, catalog: &CategoryCatalog) -> Line<'a> {
    let preset = model.preset();
    let indent = model.get_entry_indent(entry);

    let mut spans = vec![Span::styled(
        entry.get_invlet().map(String::from).unwrap_or(" ".to_string()),
        Style::default().fg(entry.get_invlet_color()),
    )];

    if model.multiselect() {
        let marker = match entry.chosen_count() {
            0 => ' ',
            count if count >= entry.get_available_count() => '+',
            _ => '#',
        };
        spans.push(Span::raw(format!(" {}", marker)));
    }

    let prefix_width: usize = spans.iter().map(|span| text_width(&span.content)).sum();
    spans.push(Span::raw(" ".repeat(indent.saturating_sub(prefix_width))));

    spans.push(Span::styled(
        align_left(
            &preset.get_cell_text(entry, 0, catalog),
            model.get_cell_text_width(0),
        ),
        Style::default().fg(preset.get_color(entry)),
    ));

    let denial = model.get_entry_denial(entry);
    if !denial.is_empty() {
        let width = model.get_cells_width().saturating_sub(model.get_cell_width(0));
        if width > CELL_GAP {
            spans.push(Span::styled(
                format!(
                    "{}{}",
                    " ".repeat(CELL_GAP),
                    clip_string(denial, "…", width - CELL_GAP)
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        return Line::from(spans);
    }

    for cell_index in 1..preset.get_cells_count() {
        let width = model.get_cell_text_width(cell_index);
        if width == 0 {
            continue;
        }

        spans.push(Span::styled(
            format!(
                "{}{}",
                " ".repeat(CELL_GAP),
                align_right(&preset.get_cell_text(entry, cell_index, catalog), width)
            ),
            Style::default().fg(preset.get_color(entry)),
        ));
    }

    Line::from(spans)
}

impl<'a> Render for ColumnView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.list, area);

        if let Some(page_line) = &self.page_line {
            if area.height > 0 {
                let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
                frame.render_widget(page_line, row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        category::selected_items_category,
        column_model::tests::location,
        host::ItemCategory,
        preset::{DefaultPreset, StatsPreset},
    };
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_headers_invlets_and_cells() {
        let mut catalog = CategoryCatalog::new();
        let tools = ItemCategory::new("tools", "TOOLS", 0);
        let id = catalog.intern(&tools);

        let mut column = ColumnModel::new(Rc::new(StatsPreset::default()));
        let mut hammer = Entry::new_item(location(1, "hammer", &tools), 2, id, true);
        hammer.custom_invlet_update(Some('1'));
        column.add_entry(hammer, &catalog);
        column.prepare_paging(&catalog);
        column.on_activate();

        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                column.draw(frame, area, &catalog);
            })
            .unwrap();

        assert_eq!(row(&terminal, 0), "TOOLS       WEIGHT  VOLUME");
        assert_eq!(row(&terminal, 1), "1 2 hammer    2.00    0.50");
        assert_eq!(terminal.backend().buffer()[(2, 1)].bg, ACTIVE_HIGHLIGHT);
    }

    #[test]
    fn shows_page_indicator_and_markers() {
        let mut catalog = CategoryCatalog::new();
        let tools = ItemCategory::new("tools", "TOOLS", 0);
        let id = catalog.intern(&tools);

        let mut column = ColumnModel::new(Rc::new(DefaultPreset::default()));
        column.set_multiselect(true);
        for index in 0..4 {
            let mut entry =
                Entry::new_item(location(index, &format!("nail {index}"), &tools), 2, id, true);
            entry.chosen_count_update(index as usize % 3);
            column.add_entry(entry, &catalog);
        }
        column.prepare_paging(&catalog);
        column.set_height(3);

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                column.draw(frame, area, &catalog);
            })
            .unwrap();

        assert_eq!(row(&terminal, 0), "TOOLS");
        assert_eq!(row(&terminal, 1), "    2 nail 0");
        assert_eq!(row(&terminal, 2), "            Page 1/3");
    }

    #[test]
    fn selection_column_has_no_cursor_bar() {
        let mut catalog = CategoryCatalog::new();
        let selected = catalog.intern(&selected_items_category());
        let tools = ItemCategory::new("tools", "TOOLS", 0);
        let id = catalog.intern(&tools);

        let mut column = ColumnModel::new_selection(selected);
        for index in 0..4 {
            let mut entry =
                Entry::new_item(location(index, &format!("nail {index}"), &tools), 2, id, true);
            entry.chosen_count_update(1);
            column.on_change(&entry, &catalog);
        }
        column.set_height(3);
        column.on_activate();
        assert!(column.activatable());

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                column.draw(frame, area, &catalog);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!((0..3).all(|y| (0..20).all(|x| buffer[(x, y)].bg != ACTIVE_HIGHLIGHT)));

        column.on_deactivate();
        terminal
            .draw(|frame| {
                let area = frame.area();
                column.draw(frame, area, &catalog);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!((0..3).all(|y| (0..20).all(|x| buffer[(x, y)].bg != INACTIVE_HIGHLIGHT)));
    }
}
