//! Market Viewer — an interactive terminal front end for the market table.
//!
//! The viewer reads a table file once, mirrors it into a `market_table`
//! controller and then reacts to commands typed on stdin: search, category
//! filter, column sorting, the change-sort toggle, row highlighting, refresh and
//! CSV export. The table is redrawn on stdout after every command that changed
//! it; logs go to stderr.
//!
//! Usage example (CLI):
//! ```bash
//! market_viewer --path ./market_data.csv --format snapshot --export-dir ./exports
//! ```
//!
//! Concurrency and shutdown:
//! - A helper thread reads stdin lines and forwards them over a `crossbeam_channel`.
//! - The main loop multiplexes input, the Ctrl+C signal and the next timer deadline
//!   with `select!`; all table operations run on the main thread.
//! - Quitting (command, Ctrl+C or closed stdin) cancels every pending effect.
#![warn(missing_docs)]
mod args;
mod input;
mod source;
mod terminal;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::args::Args;
use crate::input::{Command, HELP, parse_command, spawn_stdin_reader};
use crate::source::TableSource;
use crate::terminal::TerminalView;
use clap::Parser;
use crossbeam_channel::{Receiver, bounded, select, unbounded};
use log::{error, info, warn};
use market_common::{Result, RowSource, TableError};
use market_table::export::DirectorySink;
use market_table::{Controller, Event};

/// How long the loop waits for input when no effect is pending.
const IDLE_WAIT: Duration = Duration::from_millis(500);

type Viewer<S> = Controller<S, TerminalView, DirectorySink>;

fn main() -> Result<(), TableError> {
    init_logger();
    let args = Args::parse();

    let (stop_tx, stop_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down viewer...");
        let _ = stop_tx.try_send(());
    })
    .map_err(|e| TableError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;

    let table_path = args.table_path();
    info!("Loading {} as {:?}", table_path.display(), args.format);
    let source = TableSource::open(args.format, table_path);
    let sink = DirectorySink::new(args.export_dir());
    let mut viewer = Controller::load(source, TerminalView::new(), sink)?;

    let now = Instant::now();
    for event in args.initial_events() {
        viewer.handle(event, now)?;
    }
    redraw(&mut viewer, true)?;

    let (line_tx, line_rx) = unbounded::<String>();
    spawn_stdin_reader(line_tx);
    println!("Type `help` for commands.");

    let result = run_event_loop(&mut viewer, &line_rx, &stop_rx);
    viewer.shutdown();
    result
}

/// Process input lines, Ctrl+C and timer deadlines until asked to stop.
fn run_event_loop<S: RowSource>(
    viewer: &mut Viewer<S>,
    lines: &Receiver<String>,
    stop: &Receiver<()>,
) -> Result<()> {
    loop {
        let wait = viewer
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);
        let mut force_redraw = false;

        select! {
            recv(stop) -> _ => break,
            recv(lines) -> msg => match msg {
                Ok(line) => match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(Command::Show) => force_redraw = true,
                    Ok(Command::Event(event)) => {
                        let exporting = matches!(event, Event::Export);
                        match viewer.handle(event, Instant::now()) {
                            Ok(()) if exporting => {
                                if let Some(path) = viewer.sink().last_saved() {
                                    println!("Saved {}", path.display());
                                }
                            }
                            Ok(()) => {}
                            Err(e) => error!("Command failed: {}", e),
                        }
                    }
                    Err(e) => warn!("{}", e),
                },
                Err(_) => {
                    info!("Input closed");
                    break;
                }
            },
            default(wait) => {}
        }

        if let Err(e) = viewer.tick(Instant::now()) {
            error!("Scheduled effect failed: {}", e);
        }
        redraw(viewer, force_redraw)?;
    }
    Ok(())
}

fn redraw<S: RowSource>(viewer: &mut Viewer<S>, force: bool) -> Result<()> {
    if viewer.view_mut().take_dirty() || force {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        viewer.view().render(&mut out)?;
        out.flush()?;
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
