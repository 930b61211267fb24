use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

const GLYPH_HEIGHT: u16 = 5;
const GLYPH_WIDTH: u16 = 5;
const PIXEL: &str = "██";

#[rustfmt::skip]
fn glyph(ch: char) -> Option<[&'static str; 5]> {
    let rows = match ch {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ### "],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["#####", "  #  ", "  #  ", "  #  ", "#####"],
        'J' => ["#####", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '0' => [" ### ", "#  ##", "# # #", "##  #", " ### "],
        '1' => ["  #  ", " ##  ", "  #  ", "  #  ", " ### "],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => ["#### ", "    #", " ### ", "    #", "#### "],
        '4' => ["#   #", "#   #", "#####", "    #", "    #"],
        '5' => ["#####", "#    ", "#### ", "    #", "#### "],
        '6' => [" ### ", "#    ", "#### ", "#   #", " ### "],
        '7' => ["#####", "   # ", "  #  ", " #   ", " #   "],
        '8' => [" ### ", "#   #", " ### ", "#   #", " ### "],
        '9' => [" ### ", "#   #", " ####", "    #", " ### "],
        _ => return None,
    };
    Some(rows)
}

/// Expands a glyph into terminal rows, two cells per pixel so it looks square.
pub fn big_rows(ch: char) -> Option<Vec<String>> {
    glyph(ch.to_ascii_uppercase()).map(|rows| {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| if c == '#' { PIXEL } else { "  " })
                    .collect::<String>()
            })
            .collect()
    })
}

/// Easy mode display: the last key pressed drawn large, or the start prompt.
pub struct KeyDisplay<'a> {
    key: Option<char>,
    pressed: bool,
    theme: &'a Theme,
}

impl<'a> KeyDisplay<'a> {
    pub fn new(key: Option<char>, pressed: bool, theme: &'a Theme) -> Self {
        Self {
            key,
            pressed,
            theme,
        }
    }
}

impl Widget for KeyDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut style = Style::default().fg(colors.fg).add_modifier(Modifier::BOLD);
        if self.pressed {
            style = style.fg(colors.accent);
        }

        let rows = match self.key {
            Some(key) => big_rows(key)
                .filter(|_| area.width >= GLYPH_WIDTH * 2 && area.height >= GLYPH_HEIGHT)
                .unwrap_or_else(|| vec![key.to_string()]),
            None => vec!["Press any key to start!".to_string()],
        };

        let height = rows.len() as u16;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let text_area = Rect::new(area.x, top, area.width, height.min(area.height));
        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        Paragraph::new(lines)
            .style(style)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}
