use crate::catalog::Mood;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Three lines per mood plus the border
pub const MOOD_PANEL_HEIGHT: u16 = Mood::ALL.len() as u16 * 3 + 2;

pub struct MainLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub struct ContentLayout {
    pub left: Rect,
    pub right: Rect,
}

/// Side by side when wide, stacked otherwise
pub fn get_content_layout(area: Rect) -> ContentLayout {
    let (direction, constraints) = if area.width >= 90 {
        (
            Direction::Horizontal,
            [Constraint::Percentage(45), Constraint::Min(30)],
        )
    } else {
        (
            Direction::Vertical,
            [Constraint::Length(MOOD_PANEL_HEIGHT), Constraint::Min(8)],
        )
    };

    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    ContentLayout {
        left: chunks[0],
        right: chunks[1],
    }
}
