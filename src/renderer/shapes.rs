//! Field-space shapes for the terminal canvas
//!
//! The simulation uses screen coordinates (origin top-left, y down); the
//! ratatui canvas uses y up, so every rectangle is flipped on the way in.

use ratatui::style::Color;
use ratatui::widgets::canvas::Rectangle;

use crate::Rgb;
use crate::consts::{GRID, HEIGHT, WIDTH};
use crate::palette;
use crate::sim::Rect;

/// Convert an RGB triple to a terminal colour
#[inline]
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Canvas x/y bounds covering the whole field
pub fn bounds() -> ([f64; 2], [f64; 2]) {
    ([0.0, WIDTH as f64], [0.0, HEIGHT as f64])
}

/// Canvas y of a field-space point
#[inline]
pub fn flip_y(y: f32) -> f64 {
    (HEIGHT - y) as f64
}

/// A field rectangle as a canvas shape
pub fn rectangle(rect: &Rect, rgb: Rgb) -> Rectangle {
    Rectangle {
        x: rect.x as f64,
        y: flip_y(rect.y + rect.height),
        width: rect.width as f64,
        height: rect.height as f64,
        color: color(rgb),
    }
}

/// Top and bottom border bars
pub fn borders() -> [Rectangle; 2] {
    [
        rectangle(&Rect::new(0.0, 0.0, WIDTH, GRID), palette::LIGHT_GREY),
        rectangle(&Rect::new(0.0, HEIGHT - GRID, WIDTH, GRID), palette::LIGHT_GREY),
    ]
}

/// Dashed centre line: GRID squares every other GRID between the borders
pub fn center_line() -> Vec<Rectangle> {
    let x = (WIDTH / 2.0).floor() - (GRID / 2.0).floor();
    let mut dashes = Vec::new();
    let mut y = GRID;
    while y < HEIGHT - GRID {
        dashes.push(rectangle(&Rect::new(x, y, GRID, GRID), palette::LIGHT_GREY));
        y += GRID * 2.0;
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_flips_y() {
        let shape = rectangle(&Rect::new(30.0, 0.0, 15.0, 75.0), palette::WHITE);
        assert_eq!(shape.x, 30.0);
        assert_eq!(shape.y, (HEIGHT - 75.0) as f64);
        assert_eq!(shape.height, 75.0);
        assert_eq!(shape.color, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_borders_span_field() {
        let [top, bottom] = borders();
        assert_eq!(top.y, (HEIGHT - GRID) as f64);
        assert_eq!(bottom.y, 0.0);
        assert_eq!(top.width, WIDTH as f64);
    }

    #[test]
    fn test_center_line_dashes() {
        let dashes = center_line();
        assert_eq!(dashes.len(), 19);
        assert!(dashes.iter().all(|d| d.x == 368.0 && d.width == GRID as f64));
        // First dash sits just below the top border
        assert_eq!(dashes[0].y, flip_y(GRID * 2.0));
        let last = dashes.last().expect("dashes");
        assert!(last.y >= GRID as f64);
    }
}
