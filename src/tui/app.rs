//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::provider::{PayloadSource, fetch_payload};
use crate::view::table::ColumnPolicy;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, Route};

/// Main TUI application.
pub struct App {
    source: Arc<dyn PayloadSource>,
    state: AppState,
}

impl App {
    pub fn new(source: Arc<dyn PayloadSource>, column_policy: ColumnPolicy) -> Self {
        let label = source.describe();
        Self {
            source,
            state: AppState::new(column_policy, label),
        }
    }

    /// Runs the TUI until the user quits, starting at `route`.
    pub fn run(mut self, route: Route, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        self.mount(route, events.sender());

        let result = self.event_loop(&mut terminal, &events);

        // The current mount must not deliver into a dead channel.
        self.state.unmount();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Navigate(route) => self.mount(route, events.sender()),
                    KeyAction::None => {}
                },
                Ok(Event::Fetched { mount, payload }) => {
                    self.state.apply_fetch(mount, payload);
                }
                Err(_) => {
                    warn!("event channel closed");
                    return Ok(());
                }
            }
        }
    }

    /// Mounts `route` and starts its fetch on a worker thread. The result
    /// is posted back as [`Event::Fetched`] unless the mount was cancelled
    /// in the meantime.
    fn mount(&mut self, route: Route, tx: Sender<Event>) {
        let token = self.state.mount(route);
        let mount = token.id();
        let source = Arc::clone(&self.source);

        let spawned = thread::Builder::new()
            .name(format!("fetch-{mount}"))
            .spawn(move || {
                let payload = fetch_payload(source.as_ref());
                if token.is_cancelled() {
                    debug!(mount = token.id(), "fetch finished after unmount, dropped");
                    return;
                }
                let _ = tx.send(Event::Fetched {
                    mount: token.id(),
                    payload,
                });
            });

        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn fetch thread");
            self.state.apply_fetch(mount, None);
            return;
        }
        info!(route = %route, mount, source = %self.source.describe(), "fetch started");
    }
}
