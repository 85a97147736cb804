use crate::catalog::Mood;
use ratatui::style::Color;

#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

impl Theme {
    /// Terminal stand-in for each mood's gradient color token
    pub fn mood_accent(&self, mood: Mood) -> Color {
        match mood {
            Mood::Joy => self.yellow,
            Mood::Melancholy => self.blue,
            Mood::Focus => self.green,
            Mood::Energy => self.red,
            Mood::Serenity => self.cyan,
        }
    }

    pub fn accent(&self, mood: Option<Mood>) -> Color {
        mood.map(|m| self.mood_accent(m)).unwrap_or(self.magenta)
    }
}

/// Glyph for a descriptor's icon identifier
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "Sun" => "☀",
        "CloudRain" => "☂",
        "Brain" => "◉",
        "Zap" => "⚡",
        "Wind" => "≋",
        _ => "♪",
    }
}
