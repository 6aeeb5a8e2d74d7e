pub mod app_dirs;
pub mod config;
pub mod console;
pub mod effects;
pub mod game;
pub mod runtime;
pub mod scores;
pub mod ui;
pub mod util;
pub mod vocab;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    console::{Console, ConsoleAction},
    game::{GameSession, GameTuning},
    runtime::{CrosstermEventSource, FixedTicker, FrameClock, GameEvent, Runner},
    scores::{ScoreDb, ScoreRecord},
    vocab::{RandomPicker, Vocabulary},
};
use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 50;

/// falling-words typing defense with a hidden creative console
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Words fall down the play field and speed up as you score; type them before one reaches the bottom. Ships with a toy console shell, persistent score history, and CSV export."
)]
pub struct Cli {
    /// vocabulary the falling words are drawn from
    #[clap(short = 'v', long, value_enum)]
    vocabulary: Option<VocabChoice>,

    /// seed word selection and placement for a reproducible run
    #[clap(long)]
    seed: Option<u64>,

    /// require exact case when matching typed input against words
    #[clap(long)]
    strict_case: bool,

    /// skip the console and start a game immediately
    #[clap(short = 'g', long)]
    game: bool,

    /// write the full score history as CSV to the given path and exit
    #[clap(long, value_name = "PATH")]
    export_scores: Option<PathBuf>,

    /// print the best recorded score and exit
    #[clap(long)]
    best: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum VocabChoice {
    Design,
    System,
    Arcade,
}

impl VocabChoice {
    fn as_vocab(&self) -> Vocabulary {
        Vocabulary::new(&self.to_string().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Console,
    Playing,
    GameOver,
    Scores,
}

#[derive(Debug)]
pub struct App {
    pub console: Console,
    pub session: GameSession,
    pub state: AppState,
    pub best_score: Option<u32>,
    pub recent_scores: Vec<ScoreRecord>,
    pub scores_scroll: usize,
    vocab_name: String,
    strict_case: bool,
    score_db: Option<ScoreDb>,
}

impl App {
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let choice = cli.vocabulary.unwrap_or_else(|| {
            VocabChoice::value_variants()
                .iter()
                .copied()
                .find(|v| v.to_string().to_lowercase() == config.vocabulary)
                .unwrap_or(VocabChoice::Design)
        });
        let vocab = choice.as_vocab();
        let vocab_name = vocab.name.clone();

        let tuning = GameTuning {
            strict_case: cli.strict_case || config.strict_case,
            ..GameTuning::default()
        };
        let strict_case = tuning.strict_case;

        let session = match cli.seed {
            Some(seed) => GameSession::with_seed(vocab, tuning, seed),
            None => GameSession::new(vocab, tuning, Box::new(RandomPicker::new())),
        };

        Self {
            console: Console::new(),
            session,
            state: if cli.game {
                AppState::Playing
            } else {
                AppState::Console
            },
            best_score: None,
            recent_scores: Vec::new(),
            scores_scroll: 0,
            vocab_name,
            strict_case,
            score_db: ScoreDb::new().ok(),
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            vocabulary: self.vocab_name.clone(),
            strict_case: self.strict_case,
        }
    }

    pub fn on_tick(&mut self, delta_ms: f64) {
        self.session.update_effects(delta_ms);

        if self.state == AppState::Playing {
            self.session.tick(delta_ms);
            if self.session.is_over() {
                self.finish_game();
            }
        }
    }

    fn finish_game(&mut self) {
        let record = ScoreRecord {
            played_at: Local::now(),
            score: self.session.score(),
            words_cleared: self.session.words_cleared(),
            duration_secs: self.session.elapsed_secs(),
            vocabulary: self.vocab_name.clone(),
        };
        if let Some(ref db) = self.score_db {
            let _ = db.record(&record);
            self.best_score = db.best_score().ok().flatten();
        }
        self.state = AppState::GameOver;
    }

    fn load_scores(&mut self) {
        if let Some(ref db) = self.score_db {
            self.recent_scores = db.recent(50).unwrap_or_default();
            self.best_score = db.best_score().ok().flatten();
        }
        self.scores_scroll = 0;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.export_scores {
        let db = ScoreDb::new()?;
        db.export_csv(path)?;
        println!("score history written to {}", path.display());
        return Ok(());
    }

    if cli.best {
        let db = ScoreDb::new()?;
        match db.best_score()? {
            Some(best) => println!("best score: {best}"),
            None => println!("no games recorded yet"),
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store.load();
    let mut app = App::new(&cli, &config);
    let _ = store.save(&app.to_config());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut clock = FrameClock::new();

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Tick => {
                let delta = clock.delta_ms();
                app.on_tick(delta);
            }
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }
                if !handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns false when the app should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::Console => match key.code {
            KeyCode::Esc => return false,
            KeyCode::Enter => {
                let line = app.console.input.clone();
                match app.console.interpret(&line) {
                    ConsoleAction::StartGame => {
                        app.session.reset();
                        app.state = AppState::Playing;
                    }
                    ConsoleAction::ShowScores => {
                        app.load_scores();
                        app.state = AppState::Scores;
                    }
                    ConsoleAction::Quit => return false,
                    ConsoleAction::None => {}
                }
            }
            KeyCode::Backspace => {
                app.console.input.pop();
            }
            KeyCode::Char(c) => {
                app.console.input.push(c);
            }
            _ => {}
        },
        AppState::Playing => match key.code {
            KeyCode::Esc => {
                app.state = AppState::Console;
            }
            KeyCode::Backspace => {
                app.session.backspace();
            }
            KeyCode::Char(c) => {
                app.session.push_char(c);
            }
            _ => {}
        },
        AppState::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Enter => {
                app.session.reset();
                app.state = AppState::Playing;
            }
            KeyCode::Esc => {
                app.state = AppState::Console;
            }
            _ => {}
        },
        AppState::Scores => match key.code {
            KeyCode::Up => {
                app.scores_scroll = app.scores_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                if app.scores_scroll + 1 < app.recent_scores.len() {
                    app.scores_scroll += 1;
                }
            }
            KeyCode::PageUp => {
                app.scores_scroll = app.scores_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                app.scores_scroll =
                    (app.scores_scroll + 10).min(app.recent_scores.len().saturating_sub(1));
            }
            KeyCode::Home => {
                app.scores_scroll = 0;
            }
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => {
                app.state = AppState::Console;
            }
            _ => {}
        },
    }

    true
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
