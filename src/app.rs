use std::time::Instant;

use tracing::info;

use crate::audio::output;
use crate::audio::{AudioCache, CommandSpeaker, Jukebox, SilentSpeaker, Speaker};
use crate::config::Config;
use crate::event::Command;
use crate::game::{Game, InputEvent, WordList};
use crate::ui::theme::Theme;

pub struct App {
    pub game: Game,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    jukebox: Jukebox,
}

impl App {
    pub fn new(mut config: Config) -> Self {
        config.normalize_palette();

        let words = WordList::load(config.word_list.as_deref());
        let (cache, report) = AudioCache::preload(&config.audio_dir());
        if report.loaded_count() == 0 {
            info!(dir = %config.audio_dir().display(), "no letter sounds found, playing silently");
        }

        let speaker: Box<dyn Speaker> = if config.speech_enabled {
            match CommandSpeaker::from_command_line(&config.speech_command) {
                Some(speaker) => Box::new(speaker),
                None => Box::new(SilentSpeaker),
            }
        } else {
            Box::new(SilentSpeaker)
        };
        let jukebox = Jukebox::new(cache, output::open_default(config.sound_enabled), speaker);

        let game = Game::new(words, config.palette.len());
        Self::from_parts(config, game, jukebox)
    }

    pub fn from_parts(config: Config, game: Game, jukebox: Jukebox) -> Self {
        Self {
            theme: Theme::from_config(&config),
            game,
            config,
            should_quit: false,
            jukebox,
        }
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleMode => {
                let mode = self.game.mode().toggled();
                self.dispatch(InputEvent::SwitchMode(mode), now);
            }
            Command::Game(event) => self.dispatch(event, now),
        }
    }

    fn dispatch(&mut self, event: InputEvent, now: Instant) {
        let effects = self.game.handle(event, now);
        self.jukebox.apply(&effects);
    }

    pub fn tick(&mut self, now: Instant) {
        self.game.tick(now);
    }
}
