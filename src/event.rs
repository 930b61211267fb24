use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{InputEvent, Mode};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read().ok().and_then(forward) {
                        Some(app_event) => tx.send(app_event),
                        None => Ok(()),
                    };
                    if forwarded.is_err() {
                        return;
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Terminal events the run loop cares about. A resize is delivered as an
/// early tick so the next frame is drawn at the new size right away.
fn forward(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Resize(_, _) => Some(AppEvent::Tick),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleMode,
    Game(InputEvent),
}

/// Maps a terminal key to what the toy should do with it. Releases, repeats
/// and keys with no meaning here map to `None`.
pub fn translate_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(Command::ToggleMode),
        KeyCode::F(1) => Some(Command::Game(InputEvent::SwitchMode(Mode::Easy))),
        KeyCode::F(2) => Some(Command::Game(InputEvent::SwitchMode(Mode::Hard))),
        KeyCode::Char(ch) if !ch.is_control() => Some(Command::Game(InputEvent::Key(ch))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn letters_become_game_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Command::Game(InputEvent::Key('a')))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Command::Game(InputEvent::Key('A')))
        );
    }

    #[test]
    fn control_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(translate_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Command::Quit));
        assert_eq!(
            translate_key(press(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Command::ToggleMode)
        );
        assert_eq!(
            translate_key(press(KeyCode::F(2), KeyModifiers::NONE)),
            Some(Command::Game(InputEvent::SwitchMode(Mode::Hard)))
        );
        assert_eq!(translate_key(press(KeyCode::Left, KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(release), None);
    }

    #[test]
    fn resize_redraws_and_other_events_are_dropped() {
        let key = press(KeyCode::Char('b'), KeyModifiers::NONE);
        assert!(matches!(forward(Event::Key(key)), Some(AppEvent::Key(k)) if k == key));
        assert!(matches!(forward(Event::Resize(120, 40)), Some(AppEvent::Tick)));
        assert!(forward(Event::FocusGained).is_none());
        assert!(forward(Event::Paste("hi".to_string())).is_none());
    }
}
