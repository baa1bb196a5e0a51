use clap::ValueEnum;
use crossterm::style::Color;

/// Selectable theme names (CLI and theme menu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::Dark, ThemeName::Light, ThemeName::HighContrast]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
            ThemeName::HighContrast => "High contrast",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
            ThemeName::HighContrast => Theme::high_contrast(),
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board border color
    pub border: Color,
    /// Light board square
    pub light_square: Color,
    /// Dark board square
    pub dark_square: Color,
    /// Marker drawn on threatened squares
    pub threat: Color,
    /// Placed figure color
    pub figure: Color,
    /// Cursor background
    pub selected_bg: Color,
    /// Error color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            light_square: Color::Rgb { r: 48, g: 52, b: 66 },
            dark_square: Color::Rgb { r: 32, g: 35, b: 46 },
            threat: Color::Rgb { r: 200, g: 90, b: 90 },
            figure: Color::Rgb { r: 255, g: 210, b: 100 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 60, g: 60, b: 80 },
            light_square: Color::Rgb { r: 240, g: 217, b: 181 },
            dark_square: Color::Rgb { r: 181, g: 136, b: 99 },
            threat: Color::Rgb { r: 200, g: 40, b: 40 },
            figure: Color::Rgb { r: 20, g: 20, b: 30 },
            selected_bg: Color::Rgb { r: 150, g: 190, b: 255 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            light_square: Color::Grey,
            dark_square: Color::DarkGrey,
            threat: Color::Red,
            figure: Color::Yellow,
            selected_bg: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
