pub mod jukebox;
pub mod output;
pub mod speech;
pub mod wav;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

pub use jukebox::Jukebox;
pub use output::{NullOutput, SoundOutput};
pub use speech::{CommandSpeaker, SilentSpeaker, Speaker};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read sample: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed wav data: {0}")]
    Malformed(String),
    #[error("unsupported wav encoding (format tag {format}, {bits} bits)")]
    Unsupported { format: u16, bits: u16 },
    #[error("audio device error: {0}")]
    Device(String),
}

/// A decoded sample, interleaved `f32` frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: Vec<f32>,
}

impl Sample {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.channels as f64 / self.sample_rate as f64
    }
}

#[derive(Debug)]
pub enum PreloadOutcome {
    Loaded,
    Skipped(AudioError),
}

/// Per-letter result of [`AudioCache::preload`].
#[derive(Debug, Default)]
pub struct PreloadReport {
    pub outcomes: Vec<(char, PreloadOutcome)>,
}

impl PreloadReport {
    pub fn loaded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, PreloadOutcome::Loaded))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (char, &AudioError)> {
        self.outcomes.iter().filter_map(|(letter, o)| match o {
            PreloadOutcome::Skipped(err) => Some((*letter, err)),
            PreloadOutcome::Loaded => None,
        })
    }
}

/// Letter samples A-Z, filled once at startup and never invalidated.
#[derive(Default)]
pub struct AudioCache {
    samples: HashMap<char, Sample>,
}

impl AudioCache {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads `<dir>/a.wav` .. `<dir>/z.wav`. A letter that fails is logged and
    /// left out; there are no retries.
    pub fn preload(dir: &Path) -> (Self, PreloadReport) {
        let mut cache = Self::default();
        let mut report = PreloadReport::default();

        for letter in 'A'..='Z' {
            let path = dir.join(format!("{}.wav", letter.to_ascii_lowercase()));
            let result = fs::read(&path)
                .map_err(AudioError::from)
                .and_then(|bytes| wav::decode(&bytes));

            match result {
                Ok(sample) => {
                    cache.samples.insert(letter, sample);
                    report.outcomes.push((letter, PreloadOutcome::Loaded));
                }
                Err(err) => {
                    warn!(letter = %letter, path = %path.display(), error = %err, "failed to preload letter sound");
                    report.outcomes.push((letter, PreloadOutcome::Skipped(err)));
                }
            }
        }

        info!(
            dir = %dir.display(),
            loaded = report.loaded_count(),
            "letter sounds preloaded"
        );
        (cache, report)
    }

    pub fn insert(&mut self, letter: char, sample: Sample) {
        self.samples.insert(letter.to_ascii_uppercase(), sample);
    }

    pub fn get(&self, letter: char) -> Option<&Sample> {
        self.samples.get(&letter.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preload_reports_every_letter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.wav"), wav::encode_pcm16(8_000, 1, &[0, 1, 2])).unwrap();
        fs::write(dir.path().join("b.wav"), b"garbage").unwrap();

        let (cache, report) = AudioCache::preload(dir.path());
        assert_eq!(report.outcomes.len(), 26);
        assert_eq!(report.loaded_count(), 1);
        assert_eq!(cache.len(), 1);

        let skipped: Vec<char> = report.skipped().map(|(l, _)| l).collect();
        assert_eq!(skipped.len(), 25);
        assert!(skipped.contains(&'B'));
        assert!(matches!(
            report.skipped().find(|(l, _)| *l == 'B'),
            Some((_, AudioError::Malformed(_)))
        ));
        assert!(matches!(
            report.skipped().find(|(l, _)| *l == 'C'),
            Some((_, AudioError::Io(_)))
        ));
    }

    #[test]
    fn preload_skips_implausible_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.wav"), wav::encode_pcm16(1, 1, &vec![0; 200_000])).unwrap();

        let (cache, report) = AudioCache::preload(dir.path());
        assert!(cache.get('z').is_none());
        assert!(matches!(
            report.skipped().find(|(l, _)| *l == 'Z'),
            Some((_, AudioError::Malformed(_)))
        ));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("m.wav"), wav::encode_pcm16(8_000, 1, &[5])).unwrap();
        let (cache, _) = AudioCache::preload(dir.path());
        assert!(cache.get('m').is_some());
        assert!(cache.get('M').is_some());
        assert!(cache.get('n').is_none());
        assert!(cache.get('4').is_none());
    }

    #[test]
    fn missing_dir_yields_empty_cache() {
        let (cache, report) = AudioCache::preload(Path::new("/no/such/audio/dir"));
        assert!(cache.is_empty());
        assert_eq!(report.loaded_count(), 0);
    }

    #[test]
    fn sample_duration() {
        let sample = Sample {
            sample_rate: 4,
            channels: 2,
            frames: vec![0.0; 16],
        };
        assert_eq!(sample.duration_secs(), 2.0);
    }
}
