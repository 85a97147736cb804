use crate::app::App;
use crate::ui::utils::{format_time, truncate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let accent = theme.accent(app.mood);

    let title = match app.mood {
        Some(mood) => format!(" {} playlist ", mood.descriptor().label),
        None => " Player ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (Some(track), Some(state)) = (app.player.current_track(), app.player.state()) else {
        let hint = Paragraph::new("Pick a mood to get a playlist")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.overlay));
        f.render_widget(hint, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Artist
            Constraint::Length(1),
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Time
            Constraint::Length(1),
            Constraint::Min(0), // Up next
        ])
        .split(inner);

    let width = inner.width as usize;
    let title = Paragraph::new(Span::styled(
        truncate(&track.title, width),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let artist = Paragraph::new(Span::styled(truncate(&track.artist, width), Style::default().fg(theme.overlay)))
        .alignment(Alignment::Center);
    f.render_widget(artist, chunks[1]);

    render_progress(f, chunks[3], app, state.elapsed, state.duration);

    let status = if state.playing { "▶" } else { "⏸" };
    let time = Paragraph::new(format!(
        "{}  {} / {}   {}/{}",
        status,
        format_time(Some(state.elapsed)),
        format_time(state.duration),
        state.index + 1,
        app.tracks().len()
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.overlay));
    f.render_widget(time, chunks[4]);

    let queue: Vec<Line> = app
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i == state.index {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.overlay)
            };
            Line::from(Span::styled(truncate(&format!("{}. {} · {}", i + 1, t.title, t.artist), width), style))
        })
        .collect();
    f.render_widget(Paragraph::new(queue), chunks[6]);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App, elapsed: f64, duration: Option<f64>) {
    let theme = &app.theme;
    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = match duration {
        Some(d) if d > 0.0 => elapsed / d,
        _ => 0.0,
    };

    let width = gauge_area.width as usize;
    let occupied = (width as f64 * ratio.clamp(0.0, 1.0)) as usize;
    let fill_style = Style::default().fg(theme.accent(app.mood));
    let empty_style = Style::default().fg(theme.surface);

    let mut bar: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if i < occupied {
            if i == occupied.saturating_sub(1) {
                // Playhead knob
                bar.push(Span::styled("●", fill_style));
            } else {
                bar.push(Span::styled("━", fill_style));
            }
        } else {
            bar.push(Span::styled("─", empty_style));
        }
    }

    f.render_widget(Paragraph::new(Line::from(bar)), gauge_area);
}
