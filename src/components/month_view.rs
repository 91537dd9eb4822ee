use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::grid::WEEKDAY_LABELS;
use crate::calendar::{CellDescriptor, HolidayLabels, MonthLayout};
use crate::theme;

const CELL_W: usize = 6;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        layout: &MonthLayout,
        selected_date: NaiveDate,
        labels: HolidayLabels,
    ) {
        let t = theme::current();

        let footer = layout
            .cell(selected_date)
            .and_then(|c| c.holiday)
            .map(|h| format!(" {} ", h.label(labels)))
            .unwrap_or_default();

        let block = Block::default()
            .title(format!(" {} ", layout.title))
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(footer, t.holiday)))
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Header row
        let header = Line::from(
            WEEKDAY_LABELS
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let style = if i >= 5 { t.weekend } else { t.header };
                    Span::styled(format!("{:^width$}", d, width = CELL_W), style)
                })
                .collect::<Vec<Span>>(),
        );

        let weeks: Vec<Line> = layout
            .weeks()
            .map(|week| {
                Line::from(
                    week.iter()
                        .flat_map(|cell| cell_spans(cell, selected_date))
                        .collect::<Vec<Span>>(),
                )
            })
            .collect();

        // Layout: header + weeks
        let mut constraints = vec![Constraint::Length(1)]; // header
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0)); // fill remaining

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

/// Day number plus up to three one-column markers, `CELL_W` columns total.
pub(crate) fn cell_spans(cell: &CellDescriptor, selected_date: NaiveDate) -> Vec<Span<'static>> {
    let t = theme::current();
    let Some(day) = cell.day_number() else {
        return vec![Span::raw(" ".repeat(CELL_W))];
    };

    let number_style = if cell.date == Some(selected_date) && !cell.is_today {
        t.selected
    } else if cell.date == Some(selected_date) {
        t.today.patch(t.highlight)
    } else {
        t.number(cell.number_style, cell.is_weekend)
    };

    let mut spans = vec![Span::raw(" "), Span::styled(format!("{:>2}", day), number_style)];
    let mut used = 3;
    for (on, glyph, style) in [
        (cell.indicators.holiday, theme::HOLIDAY_DOT, t.holiday),
        (cell.indicators.event, theme::EVENT_DOT, t.event_dot),
        (cell.indicators.birthday, theme::BIRTHDAY_DOT, t.birthday_dot),
    ] {
        if on {
            spans.push(Span::styled(glyph, style));
            used += 1;
        }
    }
    spans.push(Span::styled(" ".repeat(CELL_W - used), Style::default()));
    spans
}
