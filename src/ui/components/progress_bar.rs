use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// One-row bar showing how much of the drill word has been typed.
pub struct ProgressBar<'a> {
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(ratio: f64, theme: &'a Theme) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }

    fn filled_width(&self, width: u16) -> u16 {
        (self.ratio * width as f64).round() as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled = self.filled_width(area.width);
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled {
                Style::default().bg(colors.text_correct)
            } else {
                Style::default().bg(colors.border)
            };
            buf[(x, area.y)].set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_clamped() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new(1.7, &theme).ratio, 1.0);
        assert_eq!(ProgressBar::new(-0.2, &theme).ratio, 0.0);
    }

    #[test]
    fn fills_proportionally() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar::new(0.5, &theme).render(area, &mut buf);
        assert_eq!(buf[(4, 0)].bg, theme.colors.text_correct);
        assert_eq!(buf[(5, 0)].bg, theme.colors.border);
    }
}
