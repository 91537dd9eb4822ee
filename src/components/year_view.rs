use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{CellDescriptor, MonthLayout, YearLayout};
use crate::theme;

/// Width of one month: 7 columns of 3.
const MONTH_W: u16 = 7 * 3 + 2;
const MONTH_H: u16 = 6 + 1 + 2;

pub struct YearView;

impl YearView {
    pub fn render(frame: &mut Frame, area: Rect, layout: &YearLayout, selected_date: NaiveDate) {
        let t = theme::current();
        let block = Block::default()
            .title(format!(" {} ", layout.title))
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // 4x3 when wide enough, otherwise 3x4, otherwise 2x6.
        let per_row = if inner.width >= MONTH_W * 4 {
            4
        } else if inner.width >= MONTH_W * 3 {
            3
        } else {
            2
        };
        let n_rows = layout.months.len().div_ceil(per_row);

        let rows = Layout::vertical(
            (0..n_rows)
                .map(|_| Constraint::Length(MONTH_H))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

        for (i, month) in layout.months.iter().enumerate() {
            let row = i / per_row;
            if row >= n_rows || rows[row].height == 0 {
                continue;
            }
            let cols = Layout::horizontal(
                (0..per_row)
                    .map(|_| Constraint::Length(MONTH_W))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(rows[row]);
            render_mini_month(frame, cols[i % per_row], month, selected_date);
        }
    }
}

fn render_mini_month(frame: &mut Frame, area: Rect, month: &MonthLayout, selected_date: NaiveDate) {
    let t = theme::current();
    let is_selected_month =
        month.year == selected_date.year() && month.month == selected_date.month();
    let name = month.title.split_whitespace().next().unwrap_or_default().to_string();

    let block = Block::default()
        .title(format!(" {} ", name))
        .title_style(if is_selected_month { t.selected } else { t.header })
        .borders(Borders::ALL)
        .border_style(if is_selected_month { t.selected } else { t.border });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|d| Span::styled(format!("{:>2} ", d), t.dim))
            .collect::<Vec<Span>>(),
    )];
    lines.extend(month.weeks().map(|week| {
        Line::from(
            week.iter()
                .map(|cell| mini_cell(cell, selected_date))
                .collect::<Vec<Span>>(),
        )
    }));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Days with entries are underlined; the month view shows which kind.
fn mini_cell(cell: &CellDescriptor, selected_date: NaiveDate) -> Span<'static> {
    let t = theme::current();
    let Some(day) = cell.day_number() else {
        return Span::raw("   ");
    };
    let mut style = if cell.date == Some(selected_date) {
        t.selected
    } else {
        t.number(cell.number_style, cell.is_weekend)
    };
    if cell.indicators.event || cell.indicators.birthday {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(format!("{:>2} ", day), style)
}
