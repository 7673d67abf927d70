//! Terminal dashboard.
//!
//! The render loop only ever reads the buffer; it never waits on the
//! network, so its cadence is independent of transit API latency.

mod terminal;
mod view;

use std::future::Future;
use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::cursor::{Hide, Show};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::buffer::ConnectionBuffer;

pub use terminal::draw;
pub use view::{BoardView, DepartureRow, PLATFORM_PLACEHOLDER};

/// Default time between redraws.
pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_secs(1);

/// How long the input thread waits for a key before checking whether the
/// board has closed.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the dashboard on stdout until `shutdown` resolves or a quit key
/// (`q`, Esc, Ctrl-C) is pressed.
///
/// Raw mode keeps typed characters off the board. The terminal is
/// restored on exit, including when drawing fails.
pub async fn run<T, L>(
    buffer: &ConnectionBuffer<T, L>,
    limit: usize,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> io::Result<()> {
    let mut terminal = enter()?;

    let keys = spawn_input_reader();
    let stop = async {
        tokio::select! {
            _ = shutdown => {}
            _ = quit_requested(keys) => {}
        }
    };

    let result = render_loop(&mut terminal, buffer, limit, interval, stop).await;
    let restored = leave(&mut terminal);
    result.and(restored)
}

/// Whether `event` asks the board to close.
pub fn is_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Resolves on the first quit key; never resolves if input ends first.
async fn quit_requested(mut events: mpsc::Receiver<Event>) {
    while let Some(event) = events.recv().await {
        if is_quit(&event) {
            return;
        }
    }
    std::future::pending::<()>().await;
}

/// Read terminal events on a blocking thread.
///
/// The thread exits once the receiver is dropped, so it never holds up
/// runtime shutdown for longer than one poll.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel(16);

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!("terminal input closed: {e}");
                        break;
                    }
                },
                Err(e) => {
                    debug!("terminal input closed: {e}");
                    break;
                }
            }
        }
    });

    rx
}

/// Redraw every `interval` until `shutdown` resolves.
pub async fn render_loop<B: Backend, T, L>(
    terminal: &mut Terminal<B>,
    buffer: &ConnectionBuffer<T, L>,
    limit: usize,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> io::Result<()> {
    tokio::pin!(shutdown);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            _ = ticker.tick() => {
                let view = BoardView::capture(buffer, limit);
                terminal.draw(|frame| draw(frame, &view))?;
            }
        }
    }
}

fn enter() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen, Hide)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
    if terminal.is_err() {
        // Best effort: the setup error is the one worth reporting.
        let _ = disable_raw_mode();
    }
    terminal
}

fn leave(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen, Show);
    disable_raw_mode().and(screen)
}
