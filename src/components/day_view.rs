use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::calendar::{DayLayout, EventRecord, HolidayLabels};
use crate::theme;

pub struct DayView;

impl DayView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        layout: &DayLayout,
        selected_hour: u8,
        labels: HolidayLabels,
    ) {
        let t = theme::current();
        let w = area.width as usize;
        let cell = &layout.cell;

        let title = match (&layout.subtitle, w >= 30) {
            (Some(sub), true) => format!(" {} \u{00b7} {} ", sub, layout.title),
            (Some(sub), false) => format!(" {} ", sub),
            (None, _) => format!(" {} ", layout.title),
        };

        let n_events = cell.normal_events.len();
        let n_birthdays = cell.recurring_events.len();
        let mut counts = Vec::new();
        if n_events > 0 {
            counts.push(format!("{} event{}", n_events, if n_events == 1 { "" } else { "s" }));
        }
        if n_birthdays > 0 {
            counts.push(format!("{} birthday{}", n_birthdays, if n_birthdays == 1 { "" } else { "s" }));
        }
        let count_str = if counts.is_empty() {
            String::new()
        } else {
            format!(" {} ", counts.join(", "))
        };

        let title_style = if cell.is_today { t.today } else { t.header };
        let block = Block::default()
            .title(title)
            .title_style(title_style)
            .title_bottom(Line::from(Span::styled(count_str, t.dim)))
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner_w = area.width.saturating_sub(2) as usize;
        let inner_h = area.height.saturating_sub(2) as usize;
        let section = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut items: Vec<ListItem> = Vec::new();

        if let Some(holiday) = cell.holiday {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} {}", theme::HOLIDAY_DOT, holiday.label(labels)),
                t.holiday,
            ))));
        }

        let all_day: Vec<&EventRecord> = cell.all_day_events().collect();
        if !all_day.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled("All Day", section))));
            for ev in &all_day {
                items.push(format_all_day(ev, inner_w));
            }
        }
        if !items.is_empty() {
            items.push(ListItem::new(Line::from("")));
        }
        let header_len = items.len();

        for slot in &layout.hours {
            let selected = slot.hour == selected_hour;
            let time = Span::styled(
                format!("{:02}:00 ", slot.hour),
                if selected { t.selected } else { t.dim },
            );
            let text = slot
                .events
                .iter()
                .map(|ev| ev.text.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let text_style = if selected { t.highlight } else { Style::default() };
            items.push(ListItem::new(Line::from(vec![
                time,
                Span::styled(
                    super::event_list::truncate(&text, inner_w.saturating_sub(6)),
                    text_style,
                ),
            ])));
        }

        // Keep the selected hour on screen; the all-day header scrolls away
        // first.
        let selected_row = header_len + selected_hour as usize;
        let scroll = (selected_row + 1).saturating_sub(inner_h);

        let visible_items: Vec<ListItem> = items.into_iter().skip(scroll).collect();
        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}

fn format_all_day(ev: &EventRecord, max_width: usize) -> ListItem<'static> {
    let t = theme::current();
    let (glyph, style) = if ev.is_recurring() {
        (theme::BIRTHDAY_DOT, t.birthday_dot)
    } else {
        (theme::EVENT_DOT, t.event_dot)
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", glyph), style),
        Span::raw(super::event_list::truncate(&ev.text, max_width.saturating_sub(3))),
    ]))
}
