use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::drill::{DrillState, KeyOutcome};
use crate::game::words::WordList;
use crate::game::{Background, Effect, InputEvent, Mode};

pub const SUCCESS_ADVANCE_DELAY: Duration = Duration::from_millis(1500);
pub const MISTAKE_ADVANCE_DELAY: Duration = Duration::from_millis(1000);
pub const PRESS_FLASH: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdvanceReason {
    Completed,
    Mistake,
}

#[derive(Clone, Copy, Debug)]
struct PendingAdvance {
    due: Instant,
    reason: AdvanceReason,
}

/// The whole toy: Easy mode key exploration and the Hard mode word drill.
///
/// All mutation goes through [`Game::handle`] and [`Game::tick`], so the
/// front end only translates its own key events and clock into calls here.
/// A pending word advance is dropped on any mode switch.
pub struct Game {
    mode: Mode,
    drill: Option<DrillState>,
    score: u32,
    high_score: u32,
    words: WordList,
    palette_len: usize,
    background: Background,
    easy_key: Option<char>,
    pressed_until: Option<Instant>,
    pending: Option<PendingAdvance>,
    rng: SmallRng,
}

impl Game {
    pub fn new(words: WordList, palette_len: usize) -> Self {
        Self::with_rng(words, palette_len, SmallRng::from_entropy())
    }

    pub fn with_rng(words: WordList, palette_len: usize, rng: SmallRng) -> Self {
        Self {
            mode: Mode::Easy,
            drill: None,
            score: 0,
            high_score: 0,
            words,
            palette_len,
            background: Background::Plain,
            easy_key: None,
            pressed_until: None,
            pending: None,
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn drill(&self) -> Option<&DrillState> {
        self.drill.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Last key shown in Easy mode, uppercased. `None` means the start prompt.
    pub fn easy_key(&self) -> Option<char> {
        self.easy_key
    }

    pub fn is_pressed(&self, now: Instant) -> bool {
        self.pressed_until.is_some_and(|until| now < until)
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        match event {
            InputEvent::SwitchMode(mode) => {
                self.switch_mode(mode);
                Vec::new()
            }
            InputEvent::Key(key) => match self.mode {
                Mode::Easy => self.handle_easy_key(key, now),
                Mode::Hard => self.handle_hard_key(key, now),
            },
        }
    }

    /// Fires a due word advance and expires the Easy mode key flash.
    pub fn tick(&mut self, now: Instant) {
        if self.pressed_until.is_some_and(|until| now >= until) {
            self.pressed_until = None;
        }

        if let Some(pending) = self.pending {
            if now >= pending.due {
                debug!(reason = ?pending.reason, "advancing to next word");
                self.pending = None;
                self.start_new_word();
            }
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        debug!(mode = mode.as_str(), "switching mode");
        self.mode = mode;
        self.pending = None;
        self.background = Background::Plain;
        self.pressed_until = None;

        match mode {
            Mode::Easy => {
                self.drill = None;
                self.easy_key = None;
            }
            Mode::Hard => {
                self.score = 0;
                self.start_new_word();
            }
        }
    }

    fn start_new_word(&mut self) {
        self.drill = self.words.pick(&mut self.rng).map(DrillState::new);
        self.background = Background::Plain;
    }

    fn random_palette_color(&mut self) -> Background {
        if self.palette_len == 0 {
            Background::Plain
        } else {
            Background::Palette(self.rng.gen_range(0..self.palette_len))
        }
    }

    fn handle_easy_key(&mut self, key: char, now: Instant) -> Vec<Effect> {
        if !key.is_ascii_alphanumeric() {
            return Vec::new();
        }
        let key = key.to_ascii_uppercase();
        self.easy_key = Some(key);
        self.background = self.random_palette_color();
        self.pressed_until = Some(now + PRESS_FLASH);
        vec![Effect::PlayLetter(key)]
    }

    fn handle_hard_key(&mut self, key: char, now: Instant) -> Vec<Effect> {
        // The word is frozen until the pending replacement arrives.
        if self.pending.is_some() {
            return Vec::new();
        }
        let Some(drill) = self.drill.as_mut() else {
            return Vec::new();
        };

        match drill.process_key(key) {
            KeyOutcome::Advanced => vec![Effect::PlayLetter(key.to_ascii_uppercase())],
            KeyOutcome::Completed => {
                let word = drill.target_word();
                self.score += 1;
                self.high_score = self.high_score.max(self.score);
                self.background = self.random_palette_color();
                self.pending = Some(PendingAdvance {
                    due: now + SUCCESS_ADVANCE_DELAY,
                    reason: AdvanceReason::Completed,
                });
                debug!(word = %word, score = self.score, "word completed");
                vec![
                    Effect::PlayLetter(key.to_ascii_uppercase()),
                    Effect::SpeakWord(word),
                ]
            }
            KeyOutcome::Mistake => {
                debug!(key = %key, expected = ?drill.expected(), "wrong letter");
                self.score = 0;
                self.background = Background::Error;
                self.pending = Some(PendingAdvance {
                    due: now + MISTAKE_ADVANCE_DELAY,
                    reason: AdvanceReason::Mistake,
                });
                Vec::new()
            }
        }
    }
}
