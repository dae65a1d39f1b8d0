//! Text screens: title and game over

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use super::shapes::color;
use crate::consts::MAX_SCORE;
use crate::palette;
use crate::sim::Side;

fn white() -> Style {
    Style::default().fg(color(palette::WHITE))
}

fn grey() -> Style {
    Style::default().fg(color(palette::LIGHT_GREY))
}

/// Lines of the title screen
pub fn start_lines(variant: &str) -> Vec<Line<'static>> {
    vec![
        Line::styled("PONGULARITY", white().add_modifier(Modifier::BOLD)),
        Line::styled(format!("{} mode", variant), grey()),
        Line::default(),
        Line::styled("Press SPACE to start", grey()),
        Line::styled(format!("First to {} points wins!", MAX_SCORE), grey()),
        Line::default(),
        Line::from(vec![
            Span::styled("Left Controls", white()),
            Span::raw("        "),
            Span::styled("Right Controls", white()),
        ]),
        Line::from(vec![
            Span::styled("W (up)       ", grey()),
            Span::raw("        "),
            Span::styled("Up Arrow (up)    ", grey()),
        ]),
        Line::from(vec![
            Span::styled("S (down)     ", grey()),
            Span::raw("        "),
            Span::styled("Down Arrow (down)", grey()),
        ]),
        Line::default(),
        Line::styled("Q / Esc to quit", Style::default().fg(Color::DarkGray)),
    ]
}

/// Lines of the game over screen
pub fn game_over_lines(winner: Side) -> Vec<Line<'static>> {
    vec![
        Line::styled("GAME OVER", white().add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::styled(format!("{} PLAYER WINS!", winner.as_str()), white()),
        Line::default(),
        Line::styled("Press SPACE to play again", white()),
    ]
}

/// Draw lines centred vertically and horizontally in `area`
pub fn draw_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let inner = Rect::new(area.x, top, area.width, height.min(area.height));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default());
    frame.render_widget(paragraph, inner);
}
