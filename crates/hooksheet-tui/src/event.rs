//! Terminal event source for the cheat sheet

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossterm::event as crossterm_event;
use crossterm::event::{KeyEvent, MouseEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// How long the reader thread blocks waiting for terminal input
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Events delivered to the application loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// Periodic tick used to expire copy acknowledgments
    Tick,
}

impl Event {
    /// Map a crossterm event, dropping the kinds the sheet ignores
    pub fn from_crossterm(event: crossterm_event::Event) -> Option<Self> {
        match event {
            crossterm_event::Event::Key(key) => Some(Event::Key(key)),
            crossterm_event::Event::Mouse(mouse) => Some(Event::Mouse(mouse)),
            crossterm_event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            crossterm_event::Event::FocusGained
            | crossterm_event::Event::FocusLost
            | crossterm_event::Event::Paste(_) => None,
        }
    }
}

/// Background reader turning crossterm input into [`Event`]s
///
/// A plain thread polls crossterm and forwards events over an unbounded
/// tokio channel, adding a [`Event::Tick`] every `tick` interval. The thread
/// checks a shutdown flag before every poll; [`EventLoop::shutdown`] sets it
/// and waits for the thread, so no input is read once the terminal is handed
/// back.
pub struct EventLoop {
    rx: UnboundedReceiver<Event>,
    tx: UnboundedSender<Event>,
    shutdown: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl EventLoop {
    pub fn new(tick: Duration) -> Self {
        Self::with_reader(tick, |timeout| {
            if crossterm_event::poll(timeout)? {
                crossterm_event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    /// Spawn the reader thread around a poll function
    ///
    /// `poll` waits up to the given timeout and returns the next raw event,
    /// if any.
    pub fn with_reader<P>(tick: Duration, mut poll: P) -> Self
    where
        P: FnMut(Duration) -> io::Result<Option<crossterm_event::Event>> + Send + 'static,
    {
        let (tx, rx) = unbounded_channel();
        let reader_tx = tx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);

        let reader = thread::spawn(move || {
            let mut last_tick = Instant::now();

            while !stop.load(Ordering::Acquire) {
                match poll(POLL_TIMEOUT) {
                    Ok(Some(event)) => {
                        if let Some(event) = Event::from_crossterm(event) {
                            if reader_tx.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                }

                if last_tick.elapsed() >= tick {
                    if reader_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }

            tracing::debug!("Event reader stopped");
        });

        Self {
            rx,
            tx,
            shutdown,
            reader: Some(reader),
        }
    }

    /// An event source with no reader thread, fed only through [`EventLoop::sender`]
    pub fn detached() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            rx,
            tx,
            shutdown: Arc::new(AtomicBool::new(false)),
            reader: None,
        }
    }

    /// Wait for the next event; `None` once the reader has gone away
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Handle for injecting events programmatically
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Stop the reader thread and wait for it to exit
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                tracing::error!("Event reader panicked");
            }
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_from_crossterm_keeps_input_events() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(
            Event::from_crossterm(crossterm_event::Event::Key(key)),
            Some(Event::Key(key))
        );
        assert_eq!(
            Event::from_crossterm(crossterm_event::Event::Resize(80, 24)),
            Some(Event::Resize { width: 80, height: 24 })
        );
    }

    #[test]
    fn test_from_crossterm_drops_focus_and_paste() {
        assert_eq!(Event::from_crossterm(crossterm_event::Event::FocusGained), None);
        assert_eq!(
            Event::from_crossterm(crossterm_event::Event::Paste("x".into())),
            None
        );
    }

    #[tokio::test]
    async fn test_reader_forwards_input_and_ticks() {
        let mut sent = false;
        let mut events = EventLoop::with_reader(Duration::from_millis(20), move |timeout| {
            thread::sleep(timeout);
            if sent {
                return Ok(None);
            }
            sent = true;
            Ok(Some(crossterm_event::Event::Key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::NONE,
            ))))
        });

        assert!(matches!(events.next().await, Some(Event::Key(_))));
        assert_eq!(events.next().await, Some(Event::Tick));
        events.shutdown();
    }

    #[test]
    fn test_shutdown_stops_polling() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let mut events = EventLoop::with_reader(Duration::from_secs(60), move |timeout| {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(timeout);
            Ok(None)
        });

        thread::sleep(Duration::from_millis(30));
        events.shutdown();
        let after_shutdown = polls.load(Ordering::SeqCst);
        assert!(after_shutdown > 0);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(polls.load(Ordering::SeqCst), after_shutdown);
    }
}
