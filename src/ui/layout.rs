use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::game::Mode;

pub struct AppLayout {
    pub header: Rect,
    pub score: Option<Rect>,
    pub main: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    /// `footer_rows` is the number of wrapped hint rows; the footer is never
    /// shorter than one row.
    pub fn new(area: Rect, mode: Mode, footer_rows: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(footer_rows.max(1)),
            ])
            .split(area);

        let drilling = mode == Mode::Hard;
        Self {
            header: vertical[0],
            score: drilling.then_some(vertical[1]),
            main: vertical[2],
            progress: drilling.then(|| horizontal_inset(vertical[3], 25)),
            footer: vertical[4],
        }
    }
}

/// Shrinks `area` horizontally by `percent` on each side.
fn horizontal_inset(area: Rect, percent: u16) -> Rect {
    let margin = area.width.saturating_mul(percent.min(50)) / 100;
    Rect::new(
        area.x + margin,
        area.y,
        area.width.saturating_sub(margin * 2),
        area.height,
    )
}

/// Lays the key hints out in as few rows as `width` allows. Each row starts
/// with one space; hints on the same row are two spaces apart. A hint wider
/// than the row gets a row of its own and is clipped when drawn.
pub fn wrap_hints(hints: &[&str], width: u16) -> Vec<String> {
    let width = width as usize;
    let mut rows: Vec<String> = Vec::new();
    if width == 0 {
        return rows;
    }

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        match rows.last_mut() {
            Some(row) if row.chars().count() + 2 + hint.chars().count() <= width => {
                row.push_str("  ");
                row.push_str(hint);
            }
            _ => rows.push(format!(" {hint}")),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_and_progress_only_in_hard_mode() {
        let area = Rect::new(0, 0, 80, 24);
        let easy = AppLayout::new(area, Mode::Easy, 1);
        assert!(easy.score.is_none());
        assert!(easy.progress.is_none());

        let hard = AppLayout::new(area, Mode::Hard, 1);
        assert!(hard.score.is_some());
        let progress = hard.progress.unwrap();
        assert_eq!(progress.width, 40);
        assert_eq!(progress.x, 20);
    }

    #[test]
    fn hints_wrap_to_width() {
        let hints = ["[Tab] Switch", "[Esc] Quit"];
        assert_eq!(wrap_hints(&hints, 16), vec![" [Tab] Switch", " [Esc] Quit"]);
        assert_eq!(wrap_hints(&hints, 80), vec![" [Tab] Switch  [Esc] Quit"]);
        assert_eq!(wrap_hints(&hints, 25), vec![" [Tab] Switch  [Esc] Quit"]);
        assert_eq!(wrap_hints(&hints, 24).len(), 2);
        assert!(wrap_hints(&hints, 0).is_empty());
    }

    #[test]
    fn footer_grows_with_wrapped_hints() {
        let area = Rect::new(0, 0, 24, 24);
        let hints = ["[Tab] Switch mode", "[F1] Easy", "[F2] Hard", "[Esc] Quit"];
        let rows = wrap_hints(&hints, area.width);
        assert_eq!(rows.len(), 3);

        let layout = AppLayout::new(area, Mode::Hard, rows.len() as u16);
        assert_eq!(layout.footer.height, 3);
        assert_eq!(layout.footer.y + layout.footer.height, area.height);

        let layout = AppLayout::new(area, Mode::Easy, 0);
        assert_eq!(layout.footer.height, 1);
    }
}
