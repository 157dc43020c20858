use std::sync::{Arc, Mutex};

use terravest_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::mpsc;

use super::notifier::{notification_worker, NotifierDeps};

/// Queues events on an unbounded channel.
///
/// The sink is created before the services that emit into it, and the worker
/// is started once those services exist. Events emitted in between stay
/// buffered in the channel.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Spawns the notification worker. Calling it twice is a no-op.
    pub fn start_worker(&self, deps: Arc<NotifierDeps>) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match rx {
            Some(rx) => {
                tokio::spawn(notification_worker(rx, deps));
            }
            None => tracing::warn!("Domain event worker already started"),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Domain event dropped: worker is no longer running");
        }
    }
}
