use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::calendar::compose::NumberStyle;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the `[theme]` table of the config.
/// Only the first call has an effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.clone().into_theme());
}

/// Get the active theme (defaults if `init` was never called).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Markers drawn next to day numbers and entries.
pub const EVENT_DOT: &str = "\u{2022}";
pub const BIRTHDAY_DOT: &str = "\u{2605}";
pub const HOLIDAY_DOT: &str = "\u{25c6}";

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub holiday: Style,
    pub weekend: Style,
    pub event_dot: Style,
    pub birthday_dot: Style,
}

/// The handful of colors a preset is made of.
struct Palette {
    name: &'static str,
    fg: Color,
    panel: Color,
    dim: Color,
    border: Color,
    today: Color,
    selected: Color,
    holiday: Color,
    weekend: Color,
    event: Color,
    birthday: Color,
}

const DEFAULT: Palette = Palette {
    name: "default",
    fg: Color::White,
    panel: Color::DarkGray,
    dim: Color::DarkGray,
    border: Color::Gray,
    today: Color::Yellow,
    selected: Color::Cyan,
    holiday: Color::Rgb(232, 69, 69),
    weekend: Color::Gray,
    event: Color::Green,
    birthday: Color::Magenta,
};

const PRESETS: [Palette; 3] = [
    Palette {
        name: "dracula",
        fg: Color::Rgb(248, 248, 242),
        panel: Color::Rgb(68, 71, 90),
        dim: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        today: Color::Rgb(189, 147, 249),
        selected: Color::Rgb(139, 233, 253),
        holiday: Color::Rgb(255, 85, 85),
        weekend: Color::Rgb(98, 114, 164),
        event: Color::Rgb(80, 250, 123),
        birthday: Color::Rgb(255, 121, 198),
    },
    Palette {
        name: "gruvbox",
        fg: Color::Rgb(235, 219, 178),
        panel: Color::Rgb(80, 73, 69),
        dim: Color::Rgb(146, 131, 116),
        border: Color::Rgb(102, 92, 84),
        today: Color::Rgb(250, 189, 47),
        selected: Color::Rgb(131, 165, 152),
        holiday: Color::Rgb(251, 73, 52),
        weekend: Color::Rgb(168, 153, 132),
        event: Color::Rgb(184, 187, 38),
        birthday: Color::Rgb(211, 134, 155),
    },
    Palette {
        name: "nord",
        fg: Color::Rgb(229, 233, 240),
        panel: Color::Rgb(67, 76, 94),
        dim: Color::Rgb(76, 86, 106),
        border: Color::Rgb(67, 76, 94),
        today: Color::Rgb(235, 203, 139),
        selected: Color::Rgb(136, 192, 208),
        holiday: Color::Rgb(191, 97, 106),
        weekend: Color::Rgb(129, 161, 193),
        event: Color::Rgb(163, 190, 140),
        birthday: Color::Rgb(180, 142, 173),
    },
];

impl Palette {
    fn theme(&self) -> Theme {
        let p = self;
        let bold = Modifier::BOLD;
        Theme {
            name: p.name.to_string(),
            today: Style::default().fg(Color::Black).bg(p.today),
            selected: Style::default().fg(Color::Black).bg(p.selected),
            header: Style::default().fg(p.fg).add_modifier(bold),
            dim: Style::default().fg(p.dim),
            border: Style::default().fg(p.border),
            status: Style::default().fg(p.fg).bg(p.panel),
            highlight: Style::default().bg(p.panel).add_modifier(bold),
            holiday: Style::default().fg(p.holiday).add_modifier(bold),
            weekend: Style::default().fg(p.weekend),
            event_dot: Style::default().fg(p.event),
            birthday_dot: Style::default().fg(p.birthday),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        DEFAULT.theme()
    }
}

impl Theme {
    /// A built-in preset by name; unknown names give the default look.
    pub fn preset(name: &str) -> Self {
        PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .map(Palette::theme)
            .unwrap_or_default()
    }

    /// Style for a day number, before selection is applied on top.
    pub fn number(&self, style: NumberStyle, is_weekend: bool) -> Style {
        match style {
            NumberStyle::Today => self.today,
            NumberStyle::Holiday => self.holiday,
            NumberStyle::Plain if is_weekend => self.weekend,
            NumberStyle::Plain => Style::default(),
        }
    }
}

// ── TOML config types ──

/// The `[theme]` table of `config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub holiday_fg: Option<String>,
    pub weekend_fg: Option<String>,
    pub event_dot_fg: Option<String>,
    pub birthday_dot_fg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg_overrides = [
            (&self.today_fg, &mut theme.today),
            (&self.selected_fg, &mut theme.selected),
            (&self.header_fg, &mut theme.header),
            (&self.dim_fg, &mut theme.dim),
            (&self.border_fg, &mut theme.border),
            (&self.status_fg, &mut theme.status),
            (&self.holiday_fg, &mut theme.holiday),
            (&self.weekend_fg, &mut theme.weekend),
            (&self.event_dot_fg, &mut theme.event_dot),
            (&self.birthday_dot_fg, &mut theme.birthday_dot),
        ];
        for (value, style) in fg_overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.fg(c);
            }
        }

        let bg_overrides = [
            (&self.today_bg, &mut theme.today),
            (&self.selected_bg, &mut theme.selected),
            (&self.status_bg, &mut theme.status),
            (&self.highlight_bg, &mut theme.highlight),
        ];
        for (value, style) in bg_overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.bg(c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#').filter(|h| h.len() == 6) {
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#e84545"), Some(Color::Rgb(232, 69, 69)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("nord".to_string()),
            holiday_fg: Some("red".to_string()),
            today_bg: Some("#000000".to_string()),
            ..ThemeConfig::default()
        };
        let theme = config.into_theme();
        assert_eq!(theme.name, "nord");
        assert_eq!(theme.holiday.fg, Some(Color::Red));
        assert_eq!(theme.today.bg, Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn preset_lookup_ignores_case_and_falls_back() {
        assert_eq!(Theme::preset("Dracula").name, "dracula");
        assert_eq!(Theme::preset("solarized").name, "default");
    }

    #[test]
    fn number_style_mapping() {
        let theme = Theme::default();
        assert_eq!(theme.number(NumberStyle::Today, true), theme.today);
        assert_eq!(theme.number(NumberStyle::Holiday, false), theme.holiday);
        assert_eq!(theme.number(NumberStyle::Plain, true), theme.weekend);
        assert_eq!(theme.number(NumberStyle::Plain, false), Style::default());
    }
}
