use crate::types::KeyEvent;
use crossbeam_channel::Sender;
use tracing::warn;

/// Downstream of the engine: receives every forwarded event, in order.
pub trait EventSink {
    fn forward(&mut self, event: KeyEvent);
}

impl EventSink for Vec<KeyEvent> {
    fn forward(&mut self, event: KeyEvent) {
        self.push(event);
    }
}

/// Hands events to a report transmitter running on another thread.
impl EventSink for Sender<KeyEvent> {
    fn forward(&mut self, event: KeyEvent) {
        if self.send(event).is_err() {
            warn!("Output channel closed, dropping {:?}", event);
        }
    }
}

/// Adapter for plain callbacks.
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(KeyEvent),
{
    fn forward(&mut self, event: KeyEvent) {
        (self.0)(event)
    }
}
