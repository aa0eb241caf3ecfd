use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

use wrap_context::raw_context;

/// Terminal events.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Forwards terminal events from a background task.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    handler: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (sender, receiver) = mpsc::unbounded_channel();

        let handler = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                let tick_delay = tick.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = sender.closed() => break,
                    _ = tick_delay => Some(Event::Tick),
                    Some(Ok(event)) = crossterm_event => match event {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
                        _ => None,
                    },
                };

                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { receiver, handler }
    }

    pub async fn next(&mut self) -> anyhow::Result<Event> {
        raw_context!(self.receiver.recv().await)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
