//! Pure render functions for the demo view.
//!
//! Functions here take glyph snapshots by reference, draw to a ratatui
//! frame, and never mutate state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::store::GlyphView;

/// Horizontal margin kept clear on each side of the animated line.
pub const CONTAINER_MARGIN: u16 = 2;

/// Hint shown at the bottom of the screen.
const FOOTER: &str = "q quits · space skips to the next text";

/// Width available to the slot sequence inside `area`.
pub fn container_width(area: Rect) -> u16 {
    area.width.saturating_sub(CONTAINER_MARGIN * 2)
}

/// Renders the animated line centered in the frame, one styled span per
/// glyph, brightness mapped to a gray ramp.
pub fn render(glyphs: &[GlyphView], frame: &mut Frame) {
    let area = frame.area();

    let spans: Vec<Span<'_>> = glyphs
        .iter()
        .map(|glyph| {
            let level = (glyph.brightness * 255.0).round() as u8;
            Span::styled(
                glyph.ch.to_string(),
                Style::default().fg(Color::Rgb(level, level, level)),
            )
        })
        .collect();

    let line_area = Rect {
        x: area.x + CONTAINER_MARGIN,
        y: area.y + area.height / 2,
        width: container_width(area),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        line_area,
    );

    if area.height > 2 {
        let footer_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(FOOTER)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            footer_area,
        );
    }
}

/// Total terminal columns the glyphs occupy. Used for log lines, not
/// layout; the engine measures extents through the adapter.
pub fn rendered_width(glyphs: &[GlyphView]) -> usize {
    glyphs
        .iter()
        .map(|glyph| glyph.ch.width().unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_width_reserves_margins() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(container_width(area), 76);
    }

    #[test]
    fn test_container_width_saturates_on_tiny_areas() {
        let area = Rect::new(0, 0, 3, 24);
        assert_eq!(container_width(area), 0);
    }

    #[test]
    fn test_rendered_width_counts_wide_glyphs() {
        let glyphs = [
            GlyphView { ch: 'a', column: 0, brightness: 1.0 },
            GlyphView { ch: '日', column: 1, brightness: 1.0 },
        ];
        assert_eq!(rendered_width(&glyphs), 3);
    }
}
