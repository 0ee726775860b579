use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use rsvp::{
    app::{App, StartOptions},
    app_dirs::AppDirs,
    config::FileConfigStore,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};
use std::{
    error::Error,
    fs,
    io::{self, stdin, Read},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info, warn};

/// Longest the loop sleeps while nothing is scheduled (paused, idle)
const IDLE_TICK_MS: u64 = 250;

/// speed read text in the terminal, one word at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Rapid serial visual presentation in the terminal: words flash one at a time at a fixed rate with the recognition point of each word held on the same column."
)]
pub struct Cli {
    /// file to read; stdin is used when it is piped and no file or prompt is given
    file: Option<PathBuf>,

    /// text to read instead of a file
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// words per minute for this run (defaults to the last rate you picked, or 300)
    #[clap(short = 'w', long, value_parser = clap::value_parser!(i64).range(1..))]
    wpm: Option<i64>,

    /// open paused instead of starting playback right away
    #[clap(long)]
    paused: bool,
}

impl Cli {
    fn start_options(&self) -> StartOptions {
        StartOptions {
            wpm: self.wpm,
            autoplay: !self.paused,
        }
    }

    /// Resolve the text to read: prompt, then file, then piped stdin
    fn read_text(&self) -> io::Result<String> {
        if let Some(prompt) = &self.prompt {
            return Ok(prompt.clone());
        }
        if let Some(path) = &self.file {
            return fs::read(path).map(decode_lossy);
        }
        if !stdin().is_tty() {
            let mut bytes = Vec::new();
            stdin().read_to_end(&mut bytes)?;
            return Ok(decode_lossy(bytes));
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "nothing to read: pass a file, --prompt, or pipe text on stdin",
        ))
    }
}

/// Invalid UTF-8 sequences become U+FFFD instead of failing the whole read
fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("input is not valid UTF-8, replacing bad sequences");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(AppDirs::log_path().as_deref());

    let text = match cli.read_text() {
        Ok(text) => text,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, err).exit();
        }
    };

    let mut app = App::new(Box::new(FileConfigStore::new()));
    if !app.start(&text, cli.start_options()) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "no words to read").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);
    if let Err(err) = &result {
        error!(%err, "reader loop failed");
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(IDLE_TICK_MS)),
    );

    draw(terminal, app)?;
    while app.is_open() {
        let event = runner.step(app.reader.next_deadline());
        if app.handle_event(event) && app.is_open() {
            draw(terminal, app)?;
        }
    }

    info!("reader closed");
    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        app.set_area(area);
        f.render_widget(&*app, area);
    })?;
    Ok(())
}
