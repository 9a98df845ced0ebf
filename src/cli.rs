use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

mod clock;
mod console;
mod menu;
mod session;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use clock::SystemClock;
use console::Console;
use session::Session;
use terminal::Tone;
use ticketing::{Config, LoadError, StaticCredentials, TicketFile, TicketStore};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The file tickets are loaded from and saved to
    #[arg(short, long, default_value = "tickets.txt")]
    file: PathBuf,

    /// A TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(anyhow::Error::msg)?,
            None => Config::default(),
        };

        let file = TicketFile::new(self.file);
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut console = Console::new(stdin.lock(), stdout.lock());

        let store = load_store(&file, &config, &mut console)?;
        let mut session = Session::new(
            store,
            file,
            StaticCredentials::from_config(&config),
            SystemClock,
            config.max_login_attempts(),
        );

        session
            .run(&mut console)
            .with_context(|| format!("ticket session for {} failed", session.file().display()))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the menus
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the ticket file, starting empty if it does not exist yet.
#[instrument(level = "debug", skip_all, fields(path = %file.path().display()))]
fn load_store<R: BufRead, W: Write>(
    file: &TicketFile,
    config: &Config,
    console: &mut Console<R, W>,
) -> anyhow::Result<TicketStore> {
    match file.load() {
        Ok(tickets) => Ok(TicketStore::with_tickets(tickets, config)),
        Err(LoadError::NotFound(path)) => {
            tracing::warn!("no tickets file at {}", path.display());
            console.say(Tone::Problem.paint(&format!(
                "Tickets file not found at '{}'. Starting with no tickets.",
                path.display()
            )))?;
            Ok(TicketStore::new(config))
        }
        Err(e) => Err(e).with_context(|| format!("failed to load {}", file.path().display())),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;

    fn console() -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(Vec::new()), Vec::new())
    }

    #[test]
    fn load_store_starts_empty_when_file_is_missing() {
        let tmp = tempdir().unwrap();
        let file = TicketFile::new(tmp.path().join("tickets.txt"));
        let mut console = console();

        let store = load_store(&file, &Config::default(), &mut console).unwrap();

        assert!(store.is_empty());
        assert!(console.output_str().contains("Tickets file not found"));
    }

    #[test]
    fn load_store_reads_existing_tickets() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tickets.txt");
        std::fs::write(&path, "tick001, E1, bob, 20240101, 5\n").unwrap();

        let store =
            load_store(&TicketFile::new(path), &Config::default(), &mut console()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.tickets()[0].event_id, "E1");
    }

    #[test]
    fn load_store_fails_on_malformed_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tickets.txt");
        std::fs::write(&path, "tick001, E1\n").unwrap();

        let error =
            load_store(&TicketFile::new(path), &Config::default(), &mut console()).unwrap_err();

        assert!(format!("{error:#}").contains("line 1"));
    }
}
