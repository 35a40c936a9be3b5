//! Scrollable table widget
//!
//! Holds pre-formatted display strings and a row cursor. Every row has
//! exactly one cell per column; `TableView::new` enforces it.

use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

/// Column header and advisory display width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: String,
    pub width: u16,
}

impl ColumnSpec {
    pub fn new(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width: width.max(1),
        }
    }
}

/// Table of display strings with a selected row
#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<String>>,
    selected_row: usize,
    page_size: usize,
}

impl TableView {
    pub fn new(columns: Vec<ColumnSpec>, mut rows: Vec<Vec<String>>) -> Self {
        for row in &mut rows {
            row.resize(columns.len(), String::new());
        }
        Self {
            columns,
            rows,
            selected_row: 0,
            page_size: 10,
        }
    }

    /// Zero columns, zero rows
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected_row
    }

    /// The highlighted row, if the table has any
    pub fn selected_row(&self) -> Option<&[String]> {
        self.rows.get(self.selected_row).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let count = self.rows.len();
        if count > 0 && self.selected_row < count - 1 {
            self.selected_row += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(self.page_size);
    }

    pub fn page_down(&mut self) {
        let count = self.rows.len();
        self.selected_row = (self.selected_row + self.page_size).min(count.saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.rows.len().saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if self.columns.is_empty() {
            frame.render_widget(Paragraph::new("No data").style(theme.table_empty), area);
            return;
        }

        self.render_header(frame, area, theme);
        if area.height < 2 {
            return;
        }

        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        if self.rows.is_empty() {
            frame.render_widget(Paragraph::new("No rows").style(theme.table_empty), body);
            return;
        }

        let visible_height = body.height as usize;
        // Keep the selected row on screen
        let scroll_offset = (self.selected_row + 1).saturating_sub(visible_height);

        for (vis_row, (row_idx, cells)) in self
            .rows
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .enumerate()
        {
            let y = body.y + vis_row as u16;
            let style = if row_idx == self.selected_row {
                theme.table_selected
            } else if vis_row % 2 == 0 {
                theme.table_row_even
            } else {
                theme.table_row_odd
            };
            self.render_line(frame, area, y, cells.iter().map(String::as_str), style);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.render_line(
            frame,
            area,
            area.y,
            self.columns.iter().map(|c| c.title.as_str()),
            theme.table_header,
        );
    }

    fn render_line<'a>(
        &self,
        frame: &mut Frame,
        area: Rect,
        y: u16,
        cells: impl Iterator<Item = &'a str>,
        style: Style,
    ) {
        let right = area.x + area.width;
        let mut x = area.x;
        for (col, text) in self.columns.iter().zip(cells) {
            if x >= right {
                break;
            }
            let w = col.width.min(right - x);
            let padded = fit(text, w as usize);
            frame.render_widget(Paragraph::new(padded).style(style), Rect::new(x, y, w, 1));
            x = x.saturating_add(w + 1); // +1 for column separator
        }
    }
}

/// Cut to a display width and pad to exactly that width
fn fit(text: &str, width: usize) -> String {
    let (cut, _) = text.unicode_truncate(width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(pad))
}
