//! Line-based input for the terminal front end.
//!
//! A background thread reads stdin and forwards raw lines over a channel; the
//! event loop turns each line into a `Command` with `parse_command`.
use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::Sender;
use log::{debug, error, info};
use market_common::{Result, RowId, TableError};
use market_table::{Event, Key};

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  search <text> | /<text>   set the search text (empty clears it)
  category [value]          filter by category (empty shows all)
  sort                      toggle the change-column sort
  header <column>           click a column header, e.g. `header volume24h`
  click <row> [other]       click a row's symbol cell (or another cell)
  ctrl+f | esc              focus search / clear and blur search
  refresh | export          reload the table / save market_data_filtered.csv
  show | help | quit";

/// What a line of input asks for.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Forward to the controller.
    Event(Event),
    /// Redraw the table.
    Show,
    /// Print usage.
    Help,
    /// Leave the event loop.
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if let Some(text) = line.strip_prefix('/') {
        return Ok(Command::Event(Event::SearchInput(text.trim().to_string())));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word.to_lowercase().as_str() {
        "search" => Event::SearchInput(rest.to_string()),
        "category" => Event::CategoryChanged(rest.to_string()),
        "sort" => Event::SortButton,
        "header" if !rest.is_empty() => Event::HeaderClick(rest.to_string()),
        "click" => parse_click(rest)?,
        "ctrl+f" => Event::KeyDown {
            key: Key::Char('f'),
            ctrl: true,
        },
        "esc" | "escape" => Event::KeyDown {
            key: Key::Escape,
            ctrl: false,
        },
        "refresh" => Event::Refresh,
        "export" => Event::Export,
        "show" | "" => return Ok(Command::Show),
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {
            return Err(TableError::Format(format!(
                "Unknown command {:?}; type `help`",
                line
            )));
        }
    };
    Ok(Command::Event(event))
}

fn parse_click(rest: &str) -> Result<Event> {
    let mut parts = rest.split_whitespace();
    let row = parts
        .next()
        .and_then(|id| id.parse::<usize>().ok())
        .ok_or_else(|| TableError::Format(format!("Expected a row number, got {:?}", rest)))?;
    let in_symbol_zone = !matches!(parts.next(), Some(zone) if zone != "symbol");
    Ok(Event::RowClick {
        row: RowId(row),
        in_symbol_zone,
    })
}

/// Forward every line of `reader` to `tx`. Stops with an error when reading
/// fails or the receiver is gone.
pub fn forward_lines<R: BufRead>(reader: R, tx: &Sender<String>) -> Result<()> {
    for line in reader.lines() {
        tx.send(line?)?;
    }
    Ok(())
}

/// Spawn a thread that forwards stdin lines to `tx` until stdin closes or the
/// receiver goes away. Dropping `tx` on exit tells the loop that input ended.
pub fn spawn_stdin_reader(tx: Sender<String>) {
    thread::spawn(move || {
        match forward_lines(io::stdin().lock(), &tx) {
            Ok(()) => debug!("Stdin closed"),
            Err(TableError::ChannelSend(e)) => debug!("Input receiver closed: {}", e),
            Err(e) => error!("Failed to read stdin: {}", e),
        }
        info!("Input thread stopping...");
    });
}
