use tracing::debug;

use crate::audio::{AudioCache, SoundOutput, Speaker};
use crate::game::Effect;

/// Performs the game's sound effects. Nothing here can fail the caller: a
/// missing sample or a playback error just means silence.
pub struct Jukebox {
    cache: AudioCache,
    output: Box<dyn SoundOutput>,
    speaker: Box<dyn Speaker>,
}

impl Jukebox {
    pub fn new(cache: AudioCache, output: Box<dyn SoundOutput>, speaker: Box<dyn Speaker>) -> Self {
        Self {
            cache,
            output,
            speaker,
        }
    }

    pub fn cache(&self) -> &AudioCache {
        &self.cache
    }

    /// Returns true when a sample was handed to the output.
    pub fn play_letter(&mut self, letter: char) -> bool {
        let Some(sample) = self.cache.get(letter) else {
            debug!(letter = %letter, "no sample for letter");
            return false;
        };
        match self.output.play(sample) {
            Ok(()) => true,
            Err(err) => {
                debug!(letter = %letter, error = %err, "letter playback failed");
                false
            }
        }
    }

    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::PlayLetter(letter) => {
                    self.play_letter(*letter);
                }
                Effect::SpeakWord(word) => self.speaker.say(word),
            }
        }
    }
}
