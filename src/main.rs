mod app;
mod config;
mod fileio;
mod list;
mod mode;
mod model;
mod style;
mod transaction;
mod ui;
mod viewstate;

use std::fs::File;
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::fmt::writer::MakeWriter;

use crossterm::{
    execute,
    cursor::MoveToColumn,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::{AppConfig, ConfigFile};
use fileio::CsvStore;
use model::ListModel;
use style::{Style, Theme};
use viewstate::ViewState;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    theme: Option<String>,
    delimiter: Option<u8>,
    log: Option<PathBuf>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let value = |i: usize| -> String {
            match args.get(i + 1) {
                Some(v) => v.clone(),
                None => {
                    eprintln!("Error: {} requires an argument", args[i]);
                    std::process::exit(1);
                }
            }
        };
        match args[i].as_str() {
            "-c" | "--config" => {
                parsed.config = Some(PathBuf::from(value(i)));
                i += 2;
            }
            "-s" | "--store" => {
                parsed.store = Some(PathBuf::from(value(i)));
                i += 2;
            }
            "-t" | "--theme" => {
                parsed.theme = Some(value(i));
                i += 2;
            }
            "-d" | "--delimiter" => {
                parsed.delimiter = Some(parse_delimiter(&value(i)));
                i += 2;
            }
            "--log" => {
                parsed.log = Some(PathBuf::from(value(i)));
                i += 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
        }
    }

    parsed
}

/// Parse a delimiter string into a byte
fn parse_delimiter(s: &str) -> u8 {
    match s.to_lowercase().as_str() {
        "comma" | "," => b',',
        "tab" | "\\t" | "\t" => b'\t',
        "semicolon" | ";" => b';',
        "pipe" | "|" => b'|',
        _ if s.len() == 1 => s.as_bytes()[0],
        _ => {
            eprintln!("Invalid delimiter: '{}'. Use comma, tab, semicolon, pipe, or a single character.", s);
            std::process::exit(1);
        }
    }
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occurred"
            );
        } else {
            error!("panic occurred");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

/// A `MakeWriter` for `tracing` that logs to the **main screen** by leaving the alternate screen temporarily.
pub struct MainScreenWriter;

impl<'a> MakeWriter<'a> for MainScreenWriter {
    type Writer = MainScreenWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenWriterHandle
    }
}

/// A handle that writes to stdout outside the alternate screen
pub struct MainScreenWriterHandle;

impl Write for MainScreenWriterHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        execute!(io::stdout(), MoveToColumn(0))?;
        let result = io::stdout().write(buf);
        io::stdout().flush()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Log to `path` when given, otherwise only warnings and errors to the main screen
fn init_logging(path: Option<&PathBuf>) -> io::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(MainScreenWriter)
                .with_max_level(tracing::Level::WARN)
                .init();
        }
    }
    Ok(())
}

fn print_help() {
    eprintln!("topfive - keep ranked top 5 lists in the terminal");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    topfive [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <PATH>   Read settings and key bindings from a TOML file");
    eprintln!("    -s, --store <PATH>    CSV file the lists are saved to (default: ~/.topfive.csv)");
    eprintln!("    -t, --theme <NAME>    Built-in theme: dark, light");
    eprintln!("    -d, --delimiter <D>   Store delimiter: comma, tab, semicolon, pipe, or a char");
    eprintln!("    --log <PATH>          Write a debug log to PATH");
    eprintln!("    -h, --help            Print this help message");
    eprintln!();
    eprintln!("KEYS:");
    eprintln!("    j/k  select slot     J/K  move slot down/up   i/Enter  edit slot");
    eprintln!("    u    undo            U    redo                r        rename list");
    eprintln!("    n    new list        d    delete list         [ / ]    previous/next list");
    eprintln!("    m    grab slot, then j/k and m/Enter to drop it anywhere (Esc cancels)");
    eprintln!("    c    close list      q    quit");
}

fn load_config(args: &Args) -> Result<AppConfig, String> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_config_file(ConfigFile::from_file(path)?)?,
        None => AppConfig::new(),
    };
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if let Some(theme) = &args.theme {
        config.theme = Some(theme.clone());
    }
    Ok(config)
}

fn load_theme(config: &AppConfig) -> Result<Theme, String> {
    if let Some(path) = &config.theme_file {
        return Theme::from_file(path);
    }
    match &config.theme {
        Some(name) => Theme::by_name(name).ok_or_else(|| format!("Unknown theme: {}", name)),
        None => Ok(Theme::default()),
    }
}

fn main() -> io::Result<()> {
    let args = parse_args();
    init_logging(args.log.as_ref())?;
    info!("topfive started");

    install_panic_hook();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let theme = load_theme(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut store = CsvStore::new(config.store_path.clone());
    if let Some(delimiter) = args.delimiter {
        store = store.with_delimiter(delimiter);
    }
    let mut model = ListModel::new(ViewState::new(), store);
    let loaded = model.load_lists().map_err(|e| {
        error!(error = %e, path = %config.store_path.display(), "Failed to load lists");
        e
    })?;
    if !loaded {
        info!(path = %config.store_path.display(), "Starting with no lists");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(model, Style::with_theme(theme), config.keys);
    let count = app.model.lists().len();
    app.set_message(format!("{} list(s) in {}", count, app.store_name()));

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
