//! Terminal setup and the event loop
//!
//! Raw mode and the alternate screen are entered once and always restored,
//! including on error.

use crate::db::Database;
use crate::error::{PgdbaError, Result};
use crate::navigator::Navigator;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Tag an IO failure with the terminal step that produced it
fn terminal_error(step: &'static str) -> impl FnOnce(io::Error) -> PgdbaError {
    move |e| PgdbaError::Terminal(format!("{}: {}", step, e))
}

pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error("enter alternate screen"))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(terminal_error("create terminal"))
}

pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(terminal_error("leave alternate screen"))?;
    terminal
        .show_cursor()
        .map_err(terminal_error("show cursor"))?;
    Ok(())
}

/// Draw, wait for a key or a connection failure, repeat until quit
pub async fn run<D: Database>(
    terminal: &mut Tui,
    navigator: &mut Navigator<D>,
    mut connection_errors: mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let mut events = EventStream::new();

    while navigator.is_running() {
        terminal
            .draw(|frame| navigator.render(frame))
            .map_err(terminal_error("draw"))?;
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    navigator.dispatch(key).await;
                }
                // Resize and the rest only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(terminal_error("read input")(e)),
                None => break,
            },
            Some(message) = connection_errors.recv() => {
                navigator.connection_lost(&message);
            }
        }
    }
    Ok(())
}
