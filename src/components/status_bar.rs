use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode, ViewMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        let mode_str = match app.view_mode {
            ViewMode::Day => "[1]Day",
            ViewMode::Week => "[2]Week",
            ViewMode::Month => "[3]Month",
            ViewMode::Year => "[4]Year",
        };

        let focus_indicator = match app.input_mode {
            InputMode::Form => " [New Event]",
            InputMode::EventList => " [Events]",
            InputMode::Normal => "",
        };

        let (title, subtitle) = app.title();
        let heading = match subtitle {
            Some(sub) if w >= 60 => format!(" {} \u{00b7} {}", title, sub),
            _ => format!(" {}", title),
        };

        let right_text = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            hints(app.input_mode, w).to_string()
        };

        let left = format!(" {}{}{} ", mode_str, focus_indicator, heading);
        let used = left.chars().count() + right_text.chars().count();
        let padding = " ".repeat(w.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right_text, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}

fn hints(mode: InputMode, w: usize) -> &'static str {
    match mode {
        InputMode::Form if w >= 60 => " Tab:Field Space:Toggle Enter:Save Esc:Cancel ",
        InputMode::Form => " Enter:Save Esc:Cancel ",
        InputMode::EventList if w >= 60 => " jk:Select n:New d:Delete Esc:Close ",
        InputMode::EventList => " d:Del Esc:Close ",
        InputMode::Normal if w >= 90 => {
            " hl:Prev/Next jk:Select t:Today Enter:Events n:New ?:Help q:Quit "
        }
        InputMode::Normal if w >= 60 => " hl:Nav t:Today n:New ?:Help q:Quit ",
        InputMode::Normal => " ?:Help q:Quit ",
    }
}
