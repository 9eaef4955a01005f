//! Event handling for TUI.
//!
//! A separate thread polls for terminal events and timer ticks. Fetch workers
//! post their results into the same channel via [`EventHandler::sender`], so
//! the main loop handles input and data arrival in one place.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::payload::Payload;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick (redraw).
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
    /// A fetch settled for the given mount.
    Fetched {
        mount: u64,
        payload: Option<Payload>,
    },
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            // Ignore key release/repeat reports (Windows).
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Resize(_, _) => Event::Resize,
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for posting events from worker threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
