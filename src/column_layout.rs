//! Placement of columns into rows.
//!
//! Columns are laid out left to right in priority order. A column that does
//! not fit next to the previous ones starts a new row instead of squeezing
//! them. Every row is centered horizontally.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    /// `(column index, width)` in display order.
    pub columns: Vec<(usize, usize)>,
    pub height: usize,
}

impl LayoutRow {
    pub fn width(&self, gap: usize) -> usize {
        let columns: usize = self.columns.iter().map(|(_, width)| width).sum();
        columns + gap * self.columns.len().saturating_sub(1)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    rows: Vec<LayoutRow>,
    gap: usize,
}

impl ColumnLayout {
    /// Fills rows greedily with `columns` (already in priority order) so that
    /// no row is wider than `client_width`. A single column wider than the
    /// client is clamped and keeps its row to itself.
    pub fn arrange(columns: &[(usize, usize)], client_width: usize, gap: usize) -> Self {
        let mut rows: Vec<LayoutRow> = Vec::default();

        for &(index, width) in columns {
            let width = width.min(client_width);

            match rows.last_mut() {
                Some(row) if row.width(gap) + gap + width <= client_width => {
                    row.columns.push((index, width));
                }
                _ => rows.push(LayoutRow {
                    columns: vec![(index, width)],
                    height: 0,
                }),
            }
        }

        Self { rows, gap }
    }

    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.width(self.gap))
            .max()
            .unwrap_or_default()
    }

    pub fn height(&self) -> usize {
        self.rows.iter().map(|row| row.height).sum()
    }

    /// Width assigned to column `index`, if it was placed.
    pub fn column_width(&self, index: usize) -> Option<usize> {
        self.rows
            .iter()
            .flat_map(|row| row.columns.iter())
            .find(|(column, _)| *column == index)
            .map(|(_, width)| *width)
    }

    /// Gives every row the height it needs, or a fair share of
    /// `available` when everything does not fit.
    pub fn fit_heights<F>(&mut self, needed: F, available: usize)
    where
        F: Fn(usize) -> usize,
    {
        let needs = self
            .rows
            .iter()
            .map(|row| {
                row.columns
                    .iter()
                    .map(|(index, _)| needed(*index))
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        for (row, height) in self.rows.iter_mut().zip(distribute(&needs, available)) {
            row.height = height;
        }
    }

    /// Screen areas of every placed column inside `area`.
    pub fn areas(&self, area: Rect) -> Vec<(usize, Rect)> {
        let mut result = Vec::default();
        let mut y = area.y;

        for row in self.rows.iter() {
            let height = (row.height as u16).min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }

            let row_area = Rect::new(area.x, y, area.width, height);
            let rects = Layout::horizontal(
                row.columns
                    .iter()
                    .map(|(_, width)| Constraint::Length(*width as u16)),
            )
            .flex(Flex::Center)
            .spacing(self.gap as u16)
            .split(row_area);

            result.extend(
                row.columns
                    .iter()
                    .zip(rects.iter())
                    .map(|((index, _), rect)| (*index, *rect)),
            );

            y += height;
        }

        result
    }
}

/// Splits `available` rows between `needs` so that small needs are met in
/// full and the rest is shared evenly.
fn distribute(needs: &[usize], available: usize) -> Vec<usize> {
    let mut order = (0..needs.len()).collect::<Vec<_>>();
    order.sort_by_key(|&index| needs[index]);

    let mut result = vec![0; needs.len()];
    let mut remaining = available;

    for (position, &index) in order.iter().enumerate() {
        let share = remaining / (needs.len() - position);
        result[index] = needs[index].min(share);
        remaining -= result[index];
    }

    result
}
