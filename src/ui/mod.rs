pub mod layout;
pub mod terminal;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::{App, ViewMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);
    render_header(f, main_layout.header_area, app);

    // 2. Content
    let content_layout = layout::get_content_layout(main_layout.body_area);
    widgets::moods::render(f, content_layout.left, app);

    // 3. Right panel: detection sits above the player while active
    match app.view_mode {
        ViewMode::Manual => widgets::player::render(f, content_layout.right, app),
        ViewMode::Detect => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(9), Constraint::Min(0)])
                .split(content_layout.right);
            widgets::detect::render(f, chunks[0], app);
            widgets::player::render(f, chunks[1], app);
        }
    }

    render_footer(f, main_layout.footer_area, app);

    // 4. Overlays
    widgets::toast::render(f, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(theme.base)
                    .bg(theme.accent(app.mood))
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(theme.overlay))
        }
    };

    let header = Line::from(vec![
        Span::styled(" ♫ moodsync ", Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        tab("Manual", app.view_mode == ViewMode::Manual),
        Span::raw(" "),
        tab("Detect", app.view_mode == ViewMode::Detect),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;
    let pairs = [
        (keys.display(&keys.toggle_view), "view"),
        ("1-5".to_string(), "mood"),
        (keys.display(&keys.detect), "detect"),
        (keys.display(&keys.play_pause), "play"),
        (format!("{}/{}", keys.display(&keys.prev_track), keys.display(&keys.next_track)), "skip"),
        (format!("{}/{}", keys.display(&keys.seek_backward), keys.display(&keys.seek_forward)), "seek"),
        (keys.display(&keys.quit), "quit"),
    ];

    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, action) in pairs {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{} ", action), Style::default().fg(theme.surface)));
    }
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    f.render_widget(footer, area);
}
