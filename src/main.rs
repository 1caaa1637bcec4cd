use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
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
    io::{self, stdin},
    time::{Duration, Instant},
};
use tracing::{info, warn};

use typing_speed::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    engine::Engine,
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    shell::{Flow, Shell},
    ui,
};

/// terminal typing speed test with live highlighting, wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sample sentence as fast and as accurately as you can. Characters are highlighted as you go and words-per-minute, accuracy and errors update every second."
)]
pub struct Cli {
    /// screen redraw interval in milliseconds
    #[clap(long)]
    frame_interval_ms: Option<u64>,

    /// hide the key hints footer
    #[clap(long)]
    no_hints: bool,

    /// log filter directive, e.g. "typing_speed=debug" (RUST_LOG takes precedence)
    #[clap(long)]
    log_filter: Option<String>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay command line flags on top of the stored configuration
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(ms) = self.frame_interval_ms {
            cfg.frame_interval_ms = ms;
        }
        if self.no_hints {
            cfg.show_key_hints = false;
        }
        if let Some(filter) = &self.log_filter {
            cfg.log_filter = filter.clone();
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());

    // logging is best effort, the test runs fine without a log file
    let _log_guard =
        AppDirs::log_dir().and_then(|dir| logging::init(&dir, &config.log_filter).ok());
    info!(path = %store.path().display(), ?config, "starting");

    if cli.save_config {
        if let Err(err) = store.save(&config) {
            warn!(%err, "could not save config");
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut shell = Shell::new(Engine::new(), config.show_key_hints);
    let frame_interval = Duration::from_millis(config.frame_interval_ms.max(1));
    let result = start_tui(&mut terminal, &mut shell, frame_interval);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    shell: &mut Shell,
    frame_interval: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(frame_interval));

    shell.mount(Instant::now());
    let result = run_loop(shell, || runner.step(), |shell| {
        terminal.draw(|f| ui::draw(shell, f)).map(|_| ())
    });
    shell.unmount(Instant::now());
    result
}

/// Draw, then feed the next event to the shell, until quit or a draw error.
fn run_loop(
    shell: &mut Shell,
    mut next_event: impl FnMut() -> AppEvent,
    mut draw: impl FnMut(&Shell) -> io::Result<()>,
) -> Result<(), Box<dyn Error>> {
    loop {
        draw(shell)?;

        if shell.handle_event(next_event(), Instant::now()) == Flow::Quit {
            return Ok(());
        }
    }
}
