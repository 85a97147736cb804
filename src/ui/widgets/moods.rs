use crate::app::{App, ViewMode};
use crate::catalog::Mood;
use crate::ui::theme::icon_glyph;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.view_mode == ViewMode::Manual;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { theme.text } else { theme.surface }))
        .title(" How are you feeling? ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let desc_width = inner.width.saturating_sub(6) as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(Mood::ALL.len() * 3);

    for (i, descriptor) in Mood::descriptors().iter().enumerate() {
        let accent = theme.mood_accent(descriptor.mood);
        let is_active = app.mood == Some(descriptor.mood);
        let is_cursor = focused && i == app.mood_selected;

        let marker = if is_cursor { "›" } else { " " };
        let mut label_style = Style::default().fg(accent);
        if is_active {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", marker, i + 1), Style::default().fg(theme.overlay)),
            Span::styled(format!("{} {}", icon_glyph(descriptor.icon), descriptor.label), label_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", truncate(descriptor.description, desc_width)),
            Style::default().fg(theme.overlay),
        )));
        lines.push(Line::default());
    }

    f.render_widget(Paragraph::new(lines), inner);
}
