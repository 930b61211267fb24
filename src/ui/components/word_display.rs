use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::game::{DrillState, LetterTag};
use crate::ui::theme::Theme;

/// The drill word, one styled span per letter.
pub struct WordDisplay<'a> {
    drill: &'a DrillState,
    theme: &'a Theme,
}

impl<'a> WordDisplay<'a> {
    pub fn new(drill: &'a DrillState, theme: &'a Theme) -> Self {
        Self { drill, theme }
    }
}

pub fn tag_style(tag: LetterTag, theme: &Theme) -> Style {
    let colors = &theme.colors;
    match tag {
        LetterTag::Correct => Style::default()
            .fg(colors.text_correct)
            .add_modifier(Modifier::BOLD),
        LetterTag::Current => Style::default()
            .fg(colors.text_current_fg)
            .bg(colors.text_current_bg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LetterTag::Remaining => Style::default().fg(colors.text_remaining),
    }
}

fn word_spans(drill: &DrillState, theme: &Theme) -> Vec<Span<'static>> {
    drill
        .letter_tags()
        .into_iter()
        .map(|(ch, tag)| Span::styled(format!(" {ch} "), tag_style(tag, theme)))
        .collect()
}

impl Widget for WordDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let top = area.y + area.height.saturating_sub(1) / 2;
        let line_area = Rect::new(area.x, top, area.width, 1);
        Paragraph::new(Line::from(word_spans(self.drill, self.theme)))
            .alignment(Alignment::Center)
            .render(line_area, buf);
    }
}
