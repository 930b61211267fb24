pub mod drill;
pub mod machine;
pub mod words;

pub use drill::{DrillState, KeyOutcome, LetterTag};
pub use machine::Game;
pub use words::WordList;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Easy,
    Hard,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Hard => "hard",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Easy => Mode::Hard,
            Mode::Hard => Mode::Easy,
        }
    }
}

/// Input understood by the game, independent of any terminal or UI toolkit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    SwitchMode(Mode),
}

/// Side effects requested by the game. The host decides how to perform them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Play the cached sample for an uppercase letter or digit.
    PlayLetter(char),
    /// Pronounce a whole word once it has been typed.
    SpeakWord(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Plain,
    /// Index into the configured palette.
    Palette(usize),
    Error,
}
