//! Domain events runtime bridge for the web server.
//!
//! Core services emit events through [`WebDomainEventSink`]; a background
//! worker resolves each recipient and records the notification that would be
//! sent to them.

mod notifier;
mod sink;

pub use notifier::NotifierDeps;
pub use sink::WebDomainEventSink;
