//! Terminal rendering module
//!
//! Draws a [`FrameView`] with ratatui: a braille canvas for the field, plain
//! paragraphs for the title and game over screens, and a one-line HUD.

pub mod screens;
pub mod shapes;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::consts::{GRID, WIDTH};
use crate::palette;
use crate::sim::MatchPhase;
use crate::view::FrameView;

/// HUD options taken from settings plus per-frame stats
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub variant: &'static str,
    pub show_effect_timers: bool,
    pub fps: Option<u32>,
}

/// Draw one frame
pub fn draw(frame: &mut Frame, view: &FrameView, hud: &Hud) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(" Pongularity ")
        .style(Style::default().bg(Color::Black));
    let field = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    match view.phase {
        MatchPhase::StartScreen => {
            screens::draw_centered(frame, field, screens::start_lines(hud.variant));
        }
        MatchPhase::Playing => draw_field(frame, field, view),
        MatchPhase::GameOver => {
            // Final field and scores stay visible behind the result
            draw_field(frame, field, view);
            if let Some(winner) = view.winner {
                screens::draw_centered(frame, field, screens::game_over_lines(winner));
            }
        }
    }

    frame.render_widget(Paragraph::new(status_line(view, hud)), chunks[1]);
}

fn draw_field(frame: &mut Frame, area: Rect, view: &FrameView) {
    let (x_bounds, y_bounds) = shapes::bounds();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(Color::Black)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for border in shapes::borders() {
                ctx.draw(&border);
            }
            for dash in shapes::center_line() {
                ctx.draw(&dash);
            }
            ctx.draw(&shapes::rectangle(&view.left_paddle, palette::WHITE));
            ctx.draw(&shapes::rectangle(&view.right_paddle, palette::WHITE));
            for pickup in &view.pickups {
                ctx.draw(&shapes::rectangle(&pickup.rect, pickup.color));
            }
            for ball in &view.balls {
                ctx.draw(&shapes::rectangle(ball, palette::WHITE));
            }

            let score_y = shapes::flip_y(GRID * 4.0);
            let white = Style::default().fg(shapes::color(palette::WHITE));
            ctx.print(
                (WIDTH / 4.0) as f64,
                score_y,
                Line::styled(view.score.left.to_string(), white),
            );
            ctx.print(
                (3.0 * WIDTH / 4.0) as f64,
                score_y,
                Line::styled(view.score.right.to_string(), white),
            );
        });
    frame.render_widget(canvas, area);
}

/// Bottom HUD line: mode, active power-ups, FPS
pub fn status_line(view: &FrameView, hud: &Hud) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", hud.variant),
        Style::default().fg(Color::DarkGray),
    )];

    if hud.show_effect_timers && view.phase == MatchPhase::Playing {
        for effect in &view.effects {
            spans.push(Span::styled(
                format!(" {}: {}s ", effect.label, effect.remaining_secs),
                Style::default().fg(shapes::color(effect.kind.color())),
            ));
        }
    }

    if let Some(fps) = hud.fps {
        spans.push(Span::styled(
            format!(" {} fps ", fps),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}
