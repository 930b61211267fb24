use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Pause between the last letter sound and the spoken word.
pub const SPEECH_DELAY: Duration = Duration::from_millis(500);

pub trait Speaker {
    /// Pronounce a word. Must not block the caller.
    fn say(&mut self, word: &str);
}

pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn say(&mut self, word: &str) {
        debug!(word, "speech disabled");
    }
}

/// Hands words to an external text-to-speech program, e.g. `espeak` or `say`.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    delay: Duration,
}

impl CommandSpeaker {
    /// Parses a whitespace separated command line; the word is appended as the
    /// last argument. Returns `None` for a blank command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            delay: SPEECH_DELAY,
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Speaker for CommandSpeaker {
    fn say(&mut self, word: &str) {
        let program = self.program.clone();
        let args = self.args.clone();
        let word = word.to_string();
        let delay = self.delay;

        thread::spawn(move || {
            thread::sleep(delay);
            let status = Command::new(&program)
                .args(&args)
                .arg(&word)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(status) if status.success() => debug!(word = %word, "spoke word"),
                Ok(status) => warn!(program = %program, %status, "speech command failed"),
                Err(err) => warn!(program = %program, error = %err, "could not run speech command"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Instant;

    use super::*;

    #[test]
    fn default_delay_is_half_a_second() {
        assert_eq!(SPEECH_DELAY, Duration::from_millis(500));
        let speaker = CommandSpeaker::from_command_line("espeak").unwrap();
        assert_eq!(speaker.delay(), SPEECH_DELAY);
        let speaker = speaker.with_delay(Duration::from_millis(20));
        assert_eq!(speaker.delay(), Duration::from_millis(20));
    }

    #[cfg(unix)]
    #[test]
    fn word_is_last_argument_and_waits_for_delay() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("tts.sh");
        let out = dir.path().join("spoken.txt");
        fs::write(
            &script,
            "out=\"$1\"; shift; printf '%s' \"$*\" > \"$out.tmp\" && mv \"$out.tmp\" \"$out\"\n",
        )
        .unwrap();

        let command = format!("sh {} {} -v en", script.display(), out.display());
        let mut speaker = CommandSpeaker::from_command_line(&command)
            .unwrap()
            .with_delay(Duration::from_millis(1_000));
        let start = Instant::now();
        speaker.say("cat");
        assert!(!out.exists(), "command ran before the delay");

        let deadline = start + Duration::from_secs(10);
        while !out.exists() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert!(start.elapsed() >= Duration::from_millis(1_000));
        assert_eq!(fs::read_to_string(&out).unwrap(), "-v en cat");
    }

    #[test]
    fn parses_program_and_args() {
        let speaker = CommandSpeaker::from_command_line("espeak -s 120").unwrap();
        assert_eq!(speaker.program(), "espeak");
        assert_eq!(speaker.args(), &["-s".to_string(), "120".to_string()]);
    }

    #[test]
    fn blank_command_is_none() {
        assert!(CommandSpeaker::from_command_line("   ").is_none());
    }

    #[test]
    fn missing_program_does_not_panic() {
        let mut speaker = CommandSpeaker::from_command_line("kidkeys-no-such-tts-binary")
            .unwrap()
            .with_delay(Duration::ZERO);
        speaker.say("cat");
    }
}
