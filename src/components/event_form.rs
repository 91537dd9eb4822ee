use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use thiserror::Error;

use crate::calendar::{EventKind, EventRecord};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Text,
    UseHour,
    Hour,
    Yearly,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Text => FormField::UseHour,
            FormField::UseHour => FormField::Hour,
            FormField::Hour => FormField::Yearly,
            FormField::Yearly => FormField::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Text => FormField::Yearly,
            FormField::UseHour => FormField::Text,
            FormField::Hour => FormField::UseHour,
            FormField::Yearly => FormField::Hour,
        }
    }
}

/// Why the form could not be turned into an entry. The messages are shown
/// in the status bar as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Enter event text")]
    EmptyText,
    #[error("Hour must be between 0 and 23")]
    InvalidHour,
}

#[derive(Debug, Clone)]
pub struct EventFormState {
    pub date: NaiveDate,
    pub text: String,
    pub use_hour: bool,
    pub hour: String,
    pub yearly: bool,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: NaiveDate, hour: Option<u8>) -> Self {
        Self {
            date,
            text: String::new(),
            use_hour: hour.is_some(),
            hour: format!("{:02}", hour.unwrap_or(9)),
            yearly: false,
            active_field: FormField::Text,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Text => self.text.push(c),
            FormField::Hour if c.is_ascii_digit() && self.hour.len() < 2 => self.hour.push(c),
            FormField::Hour | FormField::UseHour | FormField::Yearly => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Text => { self.text.pop(); }
            FormField::Hour => { self.hour.pop(); }
            FormField::UseHour | FormField::Yearly => {}
        }
    }

    /// Space flips the checkbox under the cursor, or types a space.
    pub fn toggle_or_space(&mut self) {
        match self.active_field {
            FormField::UseHour => self.use_hour = !self.use_hour,
            FormField::Yearly => self.yearly = !self.yearly,
            FormField::Text => self.text.push(' '),
            FormField::Hour => {}
        }
    }

    pub fn parsed_hour(&self) -> Option<u8> {
        self.hour.parse::<u8>().ok().filter(|h| *h <= 23)
    }

    /// A yearly entry never keeps an hour, whatever the hour fields say.
    pub fn to_record(&self) -> Result<EventRecord, FormError> {
        let kind = if self.yearly {
            EventKind::RecurringYearly
        } else if self.use_hour {
            EventKind::Timed {
                hour: self.parsed_hour().ok_or(FormError::InvalidHour)?,
            }
        } else {
            EventKind::AllDay
        };
        EventRecord::new(self.text.as_str(), kind).map_err(|_| FormError::EmptyText)
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState) {
        // Center the form popup
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(11).max(9);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        // Clear background
        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(format!(" New Event: {} ", state.date.format("%a %-d %b %Y")))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // text
            Constraint::Length(1), // use hour
            Constraint::Length(1), // hour
            Constraint::Length(1), // yearly
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Text:", &state.text, state.active_field == FormField::Text);

        let use_hour = if state.use_hour { "[x] At hour" } else { "[ ] At hour" };
        render_field(frame, rows[1], "", use_hour, state.active_field == FormField::UseHour);

        if state.use_hour && !state.yearly {
            render_field(frame, rows[2], "Hour:", &state.hour, state.active_field == FormField::Hour);
        } else {
            render_field(frame, rows[2], "Hour:", "--", false);
        }

        let yearly = if state.yearly { "[x] Every year (birthday)" } else { "[ ] Every year (birthday)" };
        render_field(frame, rows[3], "", yearly, state.active_field == FormField::Yearly);

        let dim = theme::current().dim;
        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Toggle ", dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let label_w = if label.is_empty() { 0 } else { 7 };
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = Vec::new();
    if !label.is_empty() {
        spans.push(Span::styled(
            format!("{:<width$}", label, width = label_w),
            theme::current().dim,
        ));
    }
    spans.push(Span::styled(format!("{}{}", value, cursor), style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EventFormState {
        EventFormState::new(NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"), None)
    }

    #[test]
    fn all_day_by_default() {
        let mut state = form();
        state.text = "Trip".to_string();
        assert_eq!(state.to_record().map(|r| r.kind), Ok(EventKind::AllDay));
    }

    #[test]
    fn prefilled_hour_makes_a_timed_entry() {
        let mut state = EventFormState::new(form().date, Some(7));
        state.text = "Run".to_string();
        assert_eq!(state.hour, "07");
        assert_eq!(state.to_record().map(|r| r.kind), Ok(EventKind::Timed { hour: 7 }));
    }

    #[test]
    fn hour_field_takes_two_digits_only() {
        let mut state = form();
        state.active_field = FormField::Hour;
        state.backspace();
        state.backspace();
        for c in "2x37".chars() {
            state.input_char(c);
        }
        assert_eq!(state.hour, "23");
    }

    #[test]
    fn invalid_hour_is_reported() {
        let mut state = form();
        state.text = "Late".to_string();
        state.use_hour = true;
        state.hour = "24".to_string();
        assert_eq!(state.to_record(), Err(FormError::InvalidHour));
    }

    #[test]
    fn yearly_wins_over_hour() {
        let mut state = form();
        state.text = "Anna".to_string();
        state.use_hour = true;
        state.hour = "99".to_string();
        state.active_field = FormField::Yearly;
        state.toggle_or_space();
        assert_eq!(state.to_record().map(|r| r.kind), Ok(EventKind::RecurringYearly));
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut state = form();
        state.text = "   ".to_string();
        assert_eq!(state.to_record(), Err(FormError::EmptyText));
        assert_eq!(FormError::EmptyText.to_string(), "Enter event text");
    }
}
