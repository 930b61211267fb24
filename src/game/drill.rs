/// How a single letter of the target word should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterTag {
    Correct,
    Current,
    Remaining,
}

/// Outcome of feeding one key into a drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Advanced,
    Completed,
    Mistake,
}

pub struct DrillState {
    pub target: Vec<char>,
    pub typed: Vec<char>,
}

impl DrillState {
    pub fn new(word: &str) -> Self {
        Self {
            target: word.chars().collect(),
            typed: Vec::new(),
        }
    }

    pub fn target_word(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed_prefix(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.typed.len() >= self.target.len()
    }

    /// The letter the player has to type next, if any.
    pub fn expected(&self) -> Option<char> {
        self.target.get(self.typed.len()).copied()
    }

    /// Compares a key press case-insensitively against the next expected letter.
    /// The typed prefix only ever grows by a matching letter, so it stays a
    /// prefix of the target.
    pub fn process_key(&mut self, key: char) -> KeyOutcome {
        let key = key.to_ascii_lowercase();
        match self.expected() {
            Some(expected) if expected.to_ascii_lowercase() == key => {
                self.typed.push(expected);
                if self.is_complete() {
                    KeyOutcome::Completed
                } else {
                    KeyOutcome::Advanced
                }
            }
            _ => KeyOutcome::Mistake,
        }
    }

    pub fn letter_tags(&self) -> Vec<(char, LetterTag)> {
        let cursor = self.typed.len();
        self.target
            .iter()
            .enumerate()
            .map(|(idx, &ch)| {
                let tag = if idx < cursor {
                    LetterTag::Correct
                } else if idx == cursor {
                    LetterTag::Current
                } else {
                    LetterTag::Remaining
                };
                (ch, tag)
            })
            .collect()
    }

    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        self.typed.len() as f64 / self.target.len() as f64
    }
}
