mod app;
mod config;
mod fileio;
mod format;
mod inventory;
mod menu;
mod style;
mod system;
mod transaction;

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use tracing::{error, info, Level};

use app::App;
use config::AppConfig;
use style::Style;

/// Parse command line arguments
/// Returns (config_path, verbose)
fn parse_args() -> (Option<PathBuf>, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires an argument");
                    std::process::exit(1);
                }
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
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

    (config_path, verbose)
}

/// Log panics through tracing before the default hook runs
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

fn print_help() {
    eprintln!("seatbook - A terminal seat reservation manager");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    seatbook [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>  Load the seat catalog and data file path from a TOML file");
    eprintln!("    -v, --verbose        Log every operation to stderr");
    eprintln!("    -h, --help           Print this help message");
    eprintln!();
    eprintln!("Without a config file the catalog is VIP (1000, 100 seats) and Economy (500, 400 seats),");
    eprintln!("saved to and loaded from seats.txt.");
}

fn main() -> io::Result<()> {
    let (config_path, verbose) = parse_args();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    install_panic_hook();

    let config = match config_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
            error!(error = %e, path = %path.display(), "failed to load config");
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => AppConfig::new(),
    };
    info!(categories = config.categories.len(), data_file = %config.data_file.display(), "seatbook started");

    let stdout = io::stdout();
    let style = Style::new(stdout.is_terminal());
    let mut app = App::new(&config, style);

    app.run(io::stdin().lock(), stdout.lock())?;

    info!(
        seats = app.system.inventory().seat_count(),
        bookings = app.system.history().booking_len(),
        cancellations = app.system.history().cancellation_len(),
        "seatbook exiting"
    );
    Ok(())
}
