use std::time::Duration;

use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Drag towards the left edge: show what comes next.
    Left,
    /// Drag towards the right edge: show what came before.
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Swipe(SwipeDirection),
}

/// Turns a left-button press/release pair into a swipe when the drag was
/// mostly horizontal and long enough.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    threshold: u16,
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold.max(1),
            start: None,
        }
    }

    pub fn observe(&mut self, mouse: &MouseEvent) -> Option<SwipeDirection> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.start.take()?;
                let dx = i32::from(mouse.column) - i32::from(x0);
                let dy = i32::from(mouse.row) - i32::from(y0);
                if dx.unsigned_abs() < u32::from(self.threshold) || dx.abs() <= dy.abs() {
                    return None;
                }
                let dir = if dx > 0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                };
                trace!(dx, dy, ?dir, "swipe");
                Some(dir)
            }
            _ => None,
        }
    }
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Wait up to `timeout` for a key press or a completed swipe. Other terminal
/// events (resize, focus, key release) are consumed and yield `None` so the
/// caller redraws.
pub fn next_input_event(
    timeout: Duration,
    swipes: &mut SwipeTracker,
) -> color_eyre::Result<Option<InputEvent>> {
    let event = match poll_event(timeout)? {
        Some(event) => event,
        None => return Ok(None),
    };
    Ok(match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key)),
        Event::Mouse(mouse) => swipes.observe(&mouse).map(InputEvent::Swipe),
        _ => None,
    })
}
