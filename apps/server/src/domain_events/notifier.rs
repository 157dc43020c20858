//! Turns domain events into user notifications.
//!
//! Delivery is a structured log record per event; the recipient's address is
//! resolved at delivery time so it reflects the current account.

use std::sync::Arc;

use terravest_core::events::DomainEvent;
use terravest_core::users::UserServiceTrait;
use tokio::sync::mpsc;

pub struct NotifierDeps {
    pub user_service: Arc<dyn UserServiceTrait>,
}

/// Human-readable notification text for an event.
pub fn describe(event: &DomainEvent) -> String {
    match event {
        DomainEvent::UserRegistered { email, .. } => {
            format!("Welcome to Terravest, {email}")
        }
        DomainEvent::InvestmentCreated {
            investment_id,
            category,
            principal,
            expected_return,
            ..
        } => format!(
            "Investment {investment_id} of {principal} ({category}) was received, expected return {expected_return}"
        ),
        DomainEvent::InvestmentStatusChanged {
            investment_id,
            old_status,
            new_status,
            ..
        } => format!("Investment {investment_id} moved from {old_status} to {new_status}"),
    }
}

pub async fn notification_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    deps: Arc<NotifierDeps>,
) {
    tracing::info!("Domain event notification worker started");
    while let Some(event) = rx.recv().await {
        let recipient = match deps.user_service.get_identity(event.recipient()) {
            Ok(Some(identity)) => identity.email,
            Ok(None) => {
                tracing::warn!("No user {} for notification", event.recipient());
                continue;
            }
            Err(e) => {
                tracing::error!("Failed to resolve notification recipient: {}", e);
                continue;
            }
        };
        tracing::info!(
            target: "terravest::notifications",
            recipient = %recipient,
            "{}",
            describe(&event)
        );
    }
    tracing::info!("Domain event notification worker stopped");
}
