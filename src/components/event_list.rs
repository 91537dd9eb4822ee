use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::calendar::holidays::holiday_on;
use crate::calendar::{EventRecord, HolidayLabels};
use crate::theme;

/// Which day the entry list popup shows and which stored entry is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListState {
    pub date: NaiveDate,
    pub selected: usize,
}

impl EventListState {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, selected: 0 }
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection on an existing row after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub struct EventList;

impl EventList {
    /// `records` are the entries stored under the day, in store order, so the
    /// selection index is the store index. `birthdays` are yearly entries from
    /// other years and cannot be deleted here.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &EventListState,
        records: &[EventRecord],
        birthdays: &[EventRecord],
        labels: HolidayLabels,
    ) {
        let popup_w = area.width.min(56).max(30);
        let popup_h = area.height.min(18).max(8);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let t = theme::current();
        let block = Block::default()
            .title(format!(" {} ", state.date.format("%A, %-d %B %Y")))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(Span::styled(" n:New d:Delete Esc:Close ", t.dim)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner_w = popup_area.width.saturating_sub(2) as usize;
        let mut items: Vec<ListItem> = Vec::new();

        if let Some(holiday) = holiday_on(state.date) {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} {}", theme::HOLIDAY_DOT, holiday.label(labels)),
                t.holiday,
            ))));
            items.push(ListItem::new(Line::from("")));
        }

        if records.is_empty() && birthdays.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled("No entries", t.dim))));
        }

        for (i, record) in records.iter().enumerate() {
            let selected = i == state.selected;
            let marker = if record.is_recurring() {
                Span::styled(format!("{} ", theme::BIRTHDAY_DOT), t.birthday_dot)
            } else {
                Span::styled(format!("{} ", theme::EVENT_DOT), t.event_dot)
            };
            let time = match record.hour() {
                Some(_) => format!("{} ", record.time_display()),
                None => String::new(),
            };
            let text = truncate(&record.text, inner_w.saturating_sub(4 + time.len()));
            let style = if selected { t.selected } else { Style::default() };

            items.push(ListItem::new(Line::from(vec![
                marker,
                Span::styled(time, if selected { t.selected } else { t.dim }),
                Span::styled(text, style),
            ])));
        }

        if !birthdays.is_empty() {
            items.push(ListItem::new(Line::from("")));
            items.push(ListItem::new(Line::from(Span::styled(
                "Every year",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            for record in birthdays {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", theme::BIRTHDAY_DOT), t.birthday_dot),
                    Span::raw(truncate(&record.text, inner_w.saturating_sub(2))),
                ])));
            }
        }

        let list = List::new(items).block(block);
        frame.render_widget(list, popup_area);
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = EventListState::new(NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"));
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected, 1);
        state.clamp(1);
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("Geburtstag Jürgen", 10), "Geburts...");
        assert_eq!(truncate("kurz", 10), "kurz");
        assert_eq!(truncate("äöü", 2), "äö");
    }
}
