pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};
use tracing::{info, Level};
use typewriter::{
    config::{Language, TestType, TimerSettings},
    runtime::{dispatch, CrosstermEventSource, Runner, TypewriterEvent},
    TestConfig, TestStatistics, Typewriter,
};

use crate::ui::Screen;

/// typing-speed test with live wpm and a results chart
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// kind of test to run
    #[clap(short = 't', long, value_enum, default_value_t = TestType::Time)]
    test_type: TestType,

    /// number of seconds for a time test
    #[clap(short = 's', long, default_value_t = 30)]
    duration: u32,

    /// number of words for a words test
    #[clap(short = 'w', long, default_value_t = 25)]
    word_count: usize,

    /// dictionary to draw words from
    #[clap(short = 'l', long, value_enum, default_value_t = Language::Spanish)]
    language: Language,

    /// keep accented letters instead of folding them to ascii
    #[clap(long)]
    accents: bool,

    /// mix numbers in with the words
    #[clap(long)]
    numbers: bool,

    /// wait for enter instead of starting on the first keystroke
    #[clap(long)]
    no_auto_start: bool,

    /// never highlight the timer near the end of a time test
    #[clap(long)]
    no_warnings: bool,

    /// read the test configuration from a json file; other test flags are ignored
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write debug logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn to_test_config(&self) -> Result<TestConfig, Box<dyn Error>> {
        if let Some(path) = &self.config {
            return Ok(TestConfig::from_file(path)?);
        }

        let mut config = match self.test_type {
            TestType::Time => TestConfig::timed(self.duration),
            TestType::Words => TestConfig::words(self.word_count),
        };
        config.language = self.language;
        config.include_accents = self.accents;
        config.include_numbers = self.numbers;
        config.timer_settings = TimerSettings {
            auto_start: !self.no_auto_start,
            show_warnings: !self.no_warnings,
            ..TimerSettings::default()
        };
        Ok(config)
    }
}

/// What the host does with a key before the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostAction {
    Quit,
    TogglePause,
    Start,
    Forward,
}

fn host_action(key: &KeyEvent, finished: bool) -> HostAction {
    if key.kind == KeyEventKind::Release {
        return HostAction::Forward;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => HostAction::Quit,
        KeyCode::Char('q') if finished => HostAction::Quit,
        KeyCode::Tab => HostAction::TogglePause,
        KeyCode::Enter => HostAction::Start,
        _ => HostAction::Forward,
    }
}

fn init_logging(path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| -> Box<dyn Error> { e })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.to_test_config()?;
    let mut typewriter = Typewriter::new(config)?;
    info!(config = ?typewriter.config(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut typewriter);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(report) = result? {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Run until the user quits; hands back the last finished report, if any.
fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    typewriter: &mut Typewriter,
) -> Result<Option<TestStatistics>, Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());
    let mut last_report = None;

    loop {
        let view = typewriter.view();
        terminal.draw(|f| f.render_widget(&Screen { view: &view }, f.area()))?;

        let next_tick = typewriter.clock().until_next_tick(Instant::now());
        let Some(event) = runner.step(next_tick) else {
            break;
        };

        if let TypewriterEvent::Key(key) = &event {
            match host_action(key, typewriter.view().is_finished()) {
                HostAction::Quit => break,
                HostAction::TogglePause => {
                    typewriter.toggle_pause();
                    continue;
                }
                HostAction::Start => {
                    typewriter.start();
                    continue;
                }
                HostAction::Forward => {}
            }
        }

        dispatch(typewriter, &event);
        if let Some(report) = typewriter.report() {
            last_report = Some(report.clone());
        }
    }

    Ok(last_report)
}
