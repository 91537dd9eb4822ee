use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{CellDescriptor, EventRecord, HolidayLabels, WeekLayout};
use crate::theme;

const HOUR_START: u8 = 6;
const HOUR_END: u8 = 23;

pub struct WeekView;

impl WeekView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        layout: &WeekLayout,
        selected_date: NaiveDate,
        labels: HolidayLabels,
    ) {
        let t = theme::current();
        let block = Block::default()
            .title(format!(" {} ", layout.title))
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 10 || inner.height < 4 {
            return;
        }

        let inner_w = inner.width as usize;
        let inner_h = inner.height as usize;

        // Time label column width
        let time_col_w: u16 = if inner_w >= 70 { 6 } else { 4 };
        let day_cols_w = inner.width.saturating_sub(time_col_w);
        let col_w = (day_cols_w / 7).max(1);

        // Layout: time label | 7 day columns
        let mut col_constraints = vec![Constraint::Length(time_col_w)];
        for _ in 0..7 {
            col_constraints.push(Constraint::Length(col_w));
        }
        col_constraints.push(Constraint::Min(0)); // absorb remainder

        let cols = Layout::horizontal(col_constraints).split(inner);

        // Day header, then as many all-day lines as the busiest day needs
        // (at most 3), then the hour grid.
        let all_day_rows = layout
            .cells
            .iter()
            .map(all_day_lines_len)
            .max()
            .unwrap_or(0)
            .min(3);
        let content_rows = inner_h.saturating_sub(1 + all_day_rows);
        let total_hours = (HOUR_END - HOUR_START + 1) as usize;
        let rows_per_hour = (content_rows / total_hours).max(1);
        let visible_hours = (content_rows / rows_per_hour).min(total_hours);

        let mut row_constraints = vec![Constraint::Length(1)]; // day header
        if all_day_rows > 0 {
            row_constraints.push(Constraint::Length(all_day_rows as u16));
        }
        for _ in 0..visible_hours {
            row_constraints.push(Constraint::Length(rows_per_hour as u16));
        }
        row_constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(row_constraints).split(inner);
        let first_hour_row = if all_day_rows > 0 { 2 } else { 1 };

        for (day_offset, cell) in layout.cells.iter().enumerate() {
            let col_idx = day_offset + 1;
            if col_idx >= cols.len() {
                break;
            }
            let Some(date) = cell.date else {
                continue;
            };

            // Day header
            let day_label = if col_w >= 10 {
                date.format("%a %d").to_string()
            } else if col_w >= 5 {
                date.format("%a").to_string()
            } else {
                date.format("%d").to_string()
            };
            let style = if date == selected_date && !cell.is_today {
                t.selected
            } else {
                match t.number(cell.number_style, cell.is_weekend) {
                    s if s == Style::default() => t.header,
                    s => s,
                }
            };
            let label = Paragraph::new(Line::from(Span::styled(
                format!("{:^width$}", day_label, width = col_w as usize),
                style,
            )));
            frame.render_widget(label, cols[col_idx].intersection(rows[0]));

            // All-day band
            if all_day_rows > 0 {
                let lines: Vec<Line> = all_day_lines(cell, labels, col_w as usize)
                    .into_iter()
                    .take(all_day_rows)
                    .collect();
                frame.render_widget(Paragraph::new(lines), cols[col_idx].intersection(rows[1]));
            }
        }

        // Render time labels and grid
        for hour_idx in 0..visible_hours {
            let hour = HOUR_START + hour_idx as u8;
            let row_idx = hour_idx + first_hour_row;
            if row_idx >= rows.len() {
                break;
            }

            let time_label = if time_col_w >= 6 {
                format!("{:>2}:00 ", hour)
            } else {
                format!("{:>2} ", hour)
            };
            let time_para = Paragraph::new(Line::from(Span::styled(time_label, t.dim)));
            frame.render_widget(time_para, cols[0].intersection(rows[row_idx]));

            for (day_offset, cell) in layout.cells.iter().enumerate() {
                let col_idx = day_offset + 1;
                if col_idx >= cols.len() {
                    break;
                }
                let cell_area = cols[col_idx].intersection(rows[row_idx]);
                if cell_area.width == 0 || cell_area.height == 0 {
                    continue;
                }

                // Early entries are pinned to the first visible row.
                let in_row: Vec<&EventRecord> = cell
                    .timed_events()
                    .filter(|ev| ev.hour().map(|h| h.max(HOUR_START)) == Some(hour))
                    .collect();

                if let Some(ev) = in_row.first() {
                    let width = cell_area.width as usize;
                    let mut title: String = ev.text.chars().take(width).collect();
                    if in_row.len() > 1 && width > 2 {
                        title = ev.text.chars().take(width - 2).collect();
                        title.push_str(&format!("+{}", (in_row.len() - 1).min(9)));
                    }
                    let display = format!("{:<width$}", title, width = width);
                    frame.render_widget(
                        Paragraph::new(Line::from(Span::styled(display, t.highlight))),
                        cell_area,
                    );
                }
            }
        }
    }
}

fn all_day_lines_len(cell: &CellDescriptor) -> usize {
    cell.holiday.iter().count() + cell.all_day_events().count()
}

fn all_day_lines(cell: &CellDescriptor, labels: HolidayLabels, width: usize) -> Vec<Line<'static>> {
    let t = theme::current();
    let clip = |s: &str| -> String { s.chars().take(width).collect() };

    let mut lines = Vec::new();
    if let Some(holiday) = cell.holiday {
        lines.push(Line::from(Span::styled(clip(holiday.label(labels)), t.holiday)));
    }
    for record in cell.all_day_events() {
        let (glyph, style) = if record.is_recurring() {
            (theme::BIRTHDAY_DOT, t.birthday_dot)
        } else {
            (theme::EVENT_DOT, t.event_dot)
        };
        lines.push(Line::from(vec![
            Span::styled(glyph, style),
            Span::raw(clip(&record.text)),
        ]));
    }
    lines
}
