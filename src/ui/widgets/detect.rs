use crate::app::App;
use crate::detect::EngineStatus;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.magenta))
        .title(" Expression detection ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let spin = SPINNER[(app.frame_count / 8) as usize % SPINNER.len()];
    let width = inner.width.saturating_sub(2) as usize;
    let mut lines = vec![Line::default()];

    match app.detection.status() {
        EngineStatus::Loading => {
            lines.push(Line::from(Span::styled(
                format!("{} Initializing AI models...", spin),
                Style::default().fg(theme.overlay),
            )));
        }
        EngineStatus::Failed(msg) => {
            lines.push(Line::from(Span::styled("Models unavailable", Style::default().fg(theme.red))));
            lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(theme.overlay))));
        }
        EngineStatus::Ready if app.detection.is_busy() => {
            lines.push(Line::from(Span::styled(
                format!("{} Analyzing expression...", spin),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )));
        }
        EngineStatus::Ready => {
            let image = match &app.image_path {
                Some(path) => truncate(&path.display().to_string(), width),
                None => "none (start with --image <path>)".to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled("Image: ", Style::default().fg(theme.overlay)),
                Span::styled(image, Style::default().fg(theme.text)),
            ]));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Press {} to detect emotion", app.keys.display(&app.keys.detect)),
                Style::default().fg(theme.overlay),
            )));
        }
    }

    if let Some(label) = app.detection.last_expression() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("✔ Detected: {}", label.to_uppercase()),
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
        )));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, inner);
}
