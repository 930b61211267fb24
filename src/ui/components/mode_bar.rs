use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::game::Mode;
use crate::ui::theme::Theme;

/// The two mode toggles, with the active one highlighted.
pub struct ModeBar<'a> {
    pub mode: Mode,
    pub theme: &'a Theme,
}

impl<'a> ModeBar<'a> {
    pub fn new(mode: Mode, theme: &'a Theme) -> Self {
        Self { mode, theme }
    }

    fn tab(&self, label: &'static str, mode: Mode) -> Span<'static> {
        let colors = &self.theme.colors;
        let style = if self.mode == mode {
            Style::default()
                .fg(colors.bg)
                .bg(colors.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.hint)
        };
        Span::styled(label, style)
    }
}

impl Widget for ModeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::raw(" "),
            self.tab(" Easy [F1] ", Mode::Easy),
            Span::raw("  "),
            self.tab(" Hard [F2] ", Mode::Hard),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

/// Score and high score. Only drawn in Hard mode.
pub struct ScorePanel<'a> {
    pub score: u32,
    pub high_score: u32,
    pub theme: &'a Theme,
}

impl<'a> ScorePanel<'a> {
    pub fn new(score: u32, high_score: u32, theme: &'a Theme) -> Self {
        Self {
            score,
            high_score,
            theme,
        }
    }

    pub fn lines(&self) -> [String; 2] {
        [
            format!("Score: {}", self.score),
            format!("High Score: {}", self.high_score),
        ]
    }
}

impl Widget for ScorePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let [score, high] = self.lines();
        let lines = vec![
            Line::from(Span::styled(
                score,
                Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(high, Style::default().fg(colors.hint))),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_lines() {
        let theme = Theme::default();
        let panel = ScorePanel::new(3, 7, &theme);
        assert_eq!(panel.lines(), ["Score: 3".to_string(), "High Score: 7".to_string()]);
    }

    #[test]
    fn active_tab_is_highlighted() {
        let theme = Theme::default();
        let bar = ModeBar::new(Mode::Hard, &theme);
        assert_eq!(bar.tab("x", Mode::Hard).style.bg, Some(theme.colors.accent));
        assert_eq!(bar.tab("x", Mode::Easy).style.bg, None);
    }
}
