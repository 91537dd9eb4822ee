use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::{error, info, warn};

use kalender_tui::app::{App, InputMode, ViewMode};
use kalender_tui::calendar::{EventStore, JsonFileBackend, MemoryBackend};
use kalender_tui::cli::Cli;
use kalender_tui::components;
use kalender_tui::config::Config;
use kalender_tui::event::{self, InputEvent, SwipeDirection, SwipeTracker};
use kalender_tui::{logging, theme, tui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const ROLLOVER_CHECK: Duration = Duration::from_secs(60);

/// Month grid plus borders; the day view takes the rest of the row.
const SIDE_MONTH_W: u16 = 44;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Logging needs the data dir, which the config may set, so a broken
    // config is only reported once the log is up.
    let (config, config_err) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.resolved_data_dir());

    logging::init_tracing(&data_dir, &config.log_level)?;
    if let Some(err) = config_err {
        warn!(error = ?err, "config not loaded, using defaults");
    }
    theme::init(&config.theme);

    let store = if cli.ephemeral {
        EventStore::load(Box::new(MemoryBackend::new()))
    } else {
        EventStore::load(Box::new(JsonFileBackend::open(&data_dir)?))
    };
    let view = cli.view.unwrap_or(config.default_view);
    info!(data_dir = %data_dir.display(), ?view, ephemeral = cli.ephemeral, "starting");

    let mut app = App::new(store, view, Local::now().date_naive(), config.holiday_labels);
    let mut swipes = SwipeTracker::new(config.swipe_threshold);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, &mut swipes);
    tui::restore()?;
    if let Err(ref err) = result {
        error!(error = ?err, "exited with error");
    }
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App, swipes: &mut SwipeTracker) -> Result<()> {
    let mut last_rollover_check = Instant::now();

    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if last_rollover_check.elapsed() >= ROLLOVER_CHECK {
            app.check_day_rollover(Local::now().date_naive());
            last_rollover_check = Instant::now();
        }

        match event::next_input_event(POLL_INTERVAL, swipes)? {
            Some(InputEvent::Key(key)) => handle_key(app, key),
            Some(InputEvent::Swipe(dir)) => {
                if app.input_mode == InputMode::Normal && !app.show_help {
                    match dir {
                        SwipeDirection::Right => app.go_to_previous(),
                        SwipeDirection::Left => app.go_to_next(),
                    }
                }
            }
            None => {}
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];
    let labels = app.holiday_labels;

    match app.view_mode {
        ViewMode::Month => render_month_layout(frame, content_area, app),
        ViewMode::Week => {
            components::WeekView::render(
                frame,
                content_area,
                &app.week_layout(),
                app.current_date,
                labels,
            );
        }
        ViewMode::Day => {
            components::DayView::render(
                frame,
                content_area,
                &app.day_layout(),
                app.selected_hour,
                labels,
            );
        }
        ViewMode::Year => {
            components::YearView::render(frame, content_area, &app.year_layout(), app.current_date);
        }
    }

    if let Some(ref list) = app.event_list {
        components::EventList::render(
            frame,
            area,
            list,
            app.list_records(),
            &app.list_foreign_birthdays(),
            labels,
        );
    }

    if let Some(ref form) = app.form_state {
        components::EventForm::render(frame, area, form);
    }

    if app.show_help {
        render_help(frame, area);
    }

    components::StatusBar::render(frame, layout[1], app);
}

fn render_month_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let month = app.month_layout();
    let labels = app.holiday_labels;

    if area.width < SIDE_MONTH_W + 30 {
        components::MonthView::render(frame, area, &month, app.current_date, labels);
        return;
    }

    let content =
        Layout::horizontal([Constraint::Length(SIDE_MONTH_W), Constraint::Min(20)]).split(area);
    components::MonthView::render(frame, content[0], &month, app.current_date, labels);
    components::DayView::render(
        frame,
        content[1],
        &app.day_layout(),
        app.selected_hour,
        labels,
    );
}

fn handle_key(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Form => handle_form_input(app, key.code),
        InputMode::EventList => handle_list_input(app, key.code, key.modifiers),
        InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.set_view(ViewMode::Day),
        (KeyCode::Char('2'), _) => app.set_view(ViewMode::Week),
        (KeyCode::Char('3'), _) => app.set_view(ViewMode::Month),
        (KeyCode::Char('4'), _) => app.set_view(ViewMode::Year),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_event_form(),
        (KeyCode::Enter, _) => app.open_event_list(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.go_to_previous(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.go_to_next(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
            if app.view_mode == ViewMode::Day {
                app.select_next_hour();
            } else {
                app.select_next_day();
            }
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
            if app.view_mode == ViewMode::Day {
                app.select_prev_hour();
            } else {
                app.select_prev_day();
            }
        }
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_list_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.running = false,
        (KeyCode::Esc, _) | (KeyCode::Enter, _) | (KeyCode::Char('q'), _) => {
            app.close_event_list()
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.list_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.list_prev(),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => app.delete_selected_event(),
        (KeyCode::Char('n'), _) => app.open_event_form(),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_event_form(),
        KeyCode::Enter => app.submit_event_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(' ') => app.form_toggle(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let t = theme::current();
    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(24).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(t.header)
        .borders(Borders::ALL)
        .border_style(t.border);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = t.highlight.add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        entry("h/l \u{2190}/\u{2192}", "Previous/next day, week, month or year"),
        entry("j/k \u{2191}/\u{2193}", "Move selected day (hour in day view)"),
        entry("drag", "Swipe right/left for previous/next"),
        entry("t", "Today, in month view"),
        Line::from(""),
        Line::from(Span::styled("Views", section_style)),
        entry("1/2/3/4", "Day / Week / Month / Year"),
        Line::from(""),
        Line::from(Span::styled("Entries", section_style)),
        entry("Enter", "List entries of the selected day"),
        entry("n", "New entry"),
        entry("d", "Delete highlighted entry (in list)"),
        entry("Space", "Toggle checkbox (in form)"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", t.dim),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
