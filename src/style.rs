use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mode::Mode;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: ThemeColor) -> Self {
        Self { fg: Some(color), ..Default::default() }
    }

    pub fn with_bg(mut self, color: ThemeColor) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Complete theme configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Ranked slots
    pub slot: ElementStyle,
    pub slot_cursor: ElementStyle,
    pub slot_number: ElementStyle,
    pub placeholder: ElementStyle,

    // Sidebar
    pub list_name: ElementStyle,
    pub list_current: ElementStyle,

    // Status bar
    pub status_bar: ElementStyle,
    pub status_mode_normal: ElementStyle,
    pub status_mode_edit: ElementStyle,
    pub status_mode_confirm: ElementStyle,
    pub history_available: ElementStyle,
    pub history_unavailable: ElementStyle,

    // Bottom line
    pub message: ElementStyle,
    pub prompt: ElementStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            slot: ElementStyle::fg(ThemeColor::Named(White)),
            slot_cursor: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            slot_number: ElementStyle::fg(ThemeColor::Named(Yellow)).with_bold(),
            placeholder: ElementStyle::fg(ThemeColor::Named(DarkGray)),
            list_name: ElementStyle::fg(ThemeColor::Named(Gray)),
            list_current: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Cyan))
                .with_bold(),
            status_bar: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray)),
            status_mode_normal: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            status_mode_edit: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Green))
                .with_bold(),
            status_mode_confirm: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Red))
                .with_bold(),
            history_available: ElementStyle::fg(ThemeColor::Named(Green)),
            history_unavailable: ElementStyle::fg(ThemeColor::Named(Gray)).with_dim(),
            message: ElementStyle::fg(ThemeColor::Named(White)),
            prompt: ElementStyle::fg(ThemeColor::Named(Yellow)),
        }
    }

    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            name: "light".to_string(),
            slot: ElementStyle::fg(ThemeColor::Named(Black)),
            slot_cursor: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            slot_number: ElementStyle::fg(ThemeColor::Named(Magenta)).with_bold(),
            placeholder: ElementStyle::fg(ThemeColor::Named(Gray)),
            list_name: ElementStyle::fg(ThemeColor::Named(Black)),
            list_current: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Magenta))
                .with_bold(),
            status_bar: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Gray)),
            status_mode_normal: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            status_mode_edit: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Green))
                .with_bold(),
            status_mode_confirm: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Red))
                .with_bold(),
            history_available: ElementStyle::fg(ThemeColor::Named(Green)).with_bold(),
            history_unavailable: ElementStyle::fg(ThemeColor::Named(Gray)),
            message: ElementStyle::fg(ThemeColor::Named(Black)),
            prompt: ElementStyle::fg(ThemeColor::Named(Blue)),
        }
    }

    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse theme file: {}", e))
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

/// Runtime style manager
#[derive(Default)]
pub struct Style {
    pub theme: Theme,
}

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn slot(&self, selected: bool, placeholder: bool) -> RatStyle {
        if selected {
            self.theme.slot_cursor.to_ratatui()
        } else if placeholder {
            self.theme.placeholder.to_ratatui()
        } else {
            self.theme.slot.to_ratatui()
        }
    }

    pub fn slot_number(&self) -> RatStyle {
        self.theme.slot_number.to_ratatui()
    }

    pub fn list_name(&self, current: bool) -> RatStyle {
        if current {
            self.theme.list_current.to_ratatui()
        } else {
            self.theme.list_name.to_ratatui()
        }
    }

    pub fn status_bar(&self) -> RatStyle {
        self.theme.status_bar.to_ratatui()
    }

    pub fn status_mode(&self, mode: Mode) -> RatStyle {
        match mode {
            Mode::Normal => self.theme.status_mode_normal.to_ratatui(),
            Mode::EditItem | Mode::EditName | Mode::MoveItem => self.theme.status_mode_edit.to_ratatui(),
            Mode::ConfirmDelete => self.theme.status_mode_confirm.to_ratatui(),
        }
    }

    pub fn history(&self, available: bool) -> RatStyle {
        if available {
            self.theme.history_available.to_ratatui()
        } else {
            self.theme.history_unavailable.to_ratatui()
        }
    }

    pub fn message(&self) -> RatStyle {
        self.theme.message.to_ratatui()
    }

    pub fn prompt(&self) -> RatStyle {
        self.theme.prompt.to_ratatui()
    }
}
