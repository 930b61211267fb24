use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{error, warn};

use kidkeys::app::App;
use kidkeys::config::Config;
use kidkeys::event::{AppEvent, Command, EventHandler, translate_key};
use kidkeys::game::{InputEvent, Mode};
use kidkeys::ui::components::key_display::KeyDisplay;
use kidkeys::ui::components::mode_bar::{ModeBar, ScorePanel};
use kidkeys::ui::components::progress_bar::ProgressBar;
use kidkeys::ui::components::word_display::WordDisplay;
use kidkeys::ui::layout::{AppLayout, wrap_hints};
use kidkeys::{logging, server};

#[derive(Parser)]
#[command(name = "kidkeys", version, about = "Typing toy for small children")]
struct Cli {
    #[arg(short, long, global = true, help = "Public asset directory (index.html, audio/)")]
    root: Option<PathBuf>,

    #[arg(long, global = true, help = "Log level (error, warn, info, debug, trace)")]
    log_level: Option<String>,

    #[arg(long, help = "Write the effective settings to the config file and exit")]
    write_config: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Play in the terminal (default)
    Play {
        #[arg(short, long, help = "JSON file with an array of drill words")]
        words: Option<PathBuf>,

        #[arg(long, help = "Disable letter sounds and speech")]
        mute: bool,

        #[arg(long, help = "Start in Hard mode")]
        hard: bool,
    },
    /// Serve the public directory over HTTP
    Serve {
        #[arg(short, long, help = "Port to listen on")]
        port: Option<u16>,

        #[arg(short, long, help = "Address to bind")]
        bind: Option<IpAddr>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load();
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    if let Some(root) = cli.root {
        config.public_root = root;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.write_config {
        if let Err(err) = &loaded {
            anyhow::bail!("refusing to overwrite unreadable config: {err}");
        }
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    match cli.command.unwrap_or(CliCommand::Play {
        words: None,
        mute: false,
        hard: false,
    }) {
        CliCommand::Serve { port, bind } => {
            logging::init_console(&config.log_level)?;
            if let Err(err) = &loaded {
                warn!(error = %err, path = %Config::config_path().display(), "ignoring unreadable config");
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind_address = bind;
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::run(config.socket_addr(), config.public_root.clone()))
        }
        CliCommand::Play { words, mute, hard } => {
            let _guard = match logging::init_file(&Config::log_dir(), &config.log_level) {
                Ok(guard) => Some(guard),
                Err(err) => {
                    eprintln!("Logging disabled: {err}");
                    None
                }
            };
            if let Err(err) = &loaded {
                warn!(error = %err, path = %Config::config_path().display(), "ignoring unreadable config");
            }
            if words.is_some() {
                config.word_list = words;
            }
            if mute {
                config.sound_enabled = false;
                config.speech_enabled = false;
            }
            play(config, hard)
        }
    }
}

fn play(config: Config, start_hard: bool) -> Result<()> {
    let mut app = App::new(config);
    if start_hard {
        app.handle_command(
            Command::Game(InputEvent::SwitchMode(Mode::Hard)),
            Instant::now(),
        );
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "app exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                if let Some(command) = translate_key(key) {
                    app.handle_command(command, Instant::now());
                }
            }
            AppEvent::Tick => app.tick(Instant::now()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    let colors = &theme.colors;
    let game = &app.game;
    let now = Instant::now();

    let bg = Block::default().style(
        Style::default()
            .bg(theme.background(game.background()))
            .fg(colors.fg),
    );
    frame.render_widget(bg, area);

    let hints = ["[Tab] Switch mode", "[F1] Easy", "[F2] Hard", "[Esc] Quit"];
    let hint_rows = wrap_hints(&hints, area.width);
    let layout = AppLayout::new(area, game.mode(), hint_rows.len() as u16);

    frame.render_widget(ModeBar::new(game.mode(), theme), layout.header);

    if let Some(score_area) = layout.score {
        frame.render_widget(
            ScorePanel::new(game.score(), game.high_score(), theme),
            score_area,
        );
    }

    match game.mode() {
        Mode::Easy => frame.render_widget(
            KeyDisplay::new(game.easy_key(), game.is_pressed(now), theme),
            layout.main,
        ),
        Mode::Hard => {
            if let Some(drill) = game.drill() {
                frame.render_widget(WordDisplay::new(drill, theme), layout.main);
                if let Some(progress_area) = layout.progress {
                    frame.render_widget(ProgressBar::new(drill.progress(), theme), progress_area);
                }
            }
        }
    }

    let footer_lines: Vec<Line> = hint_rows
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.hint))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}
