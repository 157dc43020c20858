//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::{InvestmentStatus, PlanCategory};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// translate them into side effects such as notification emails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new user account was created.
    UserRegistered { user_id: String, email: String },

    /// An investment was placed and is awaiting approval.
    InvestmentCreated {
        investment_id: String,
        user_id: String,
        category: PlanCategory,
        principal: Decimal,
        expected_return: Decimal,
    },

    /// An investment moved to a new lifecycle status.
    InvestmentStatusChanged {
        investment_id: String,
        user_id: String,
        old_status: InvestmentStatus,
        new_status: InvestmentStatus,
    },
}

impl DomainEvent {
    /// Id of the user the event should be reported to.
    pub fn recipient(&self) -> &str {
        match self {
            DomainEvent::UserRegistered { user_id, .. }
            | DomainEvent::InvestmentCreated { user_id, .. }
            | DomainEvent::InvestmentStatusChanged { user_id, .. } => user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::InvestmentCreated {
            investment_id: "inv1".to_string(),
            user_id: "u1".to_string(),
            category: PlanCategory::Annual,
            principal: dec!(10000),
            expected_return: dec!(3000),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("investment_created"));
        assert!(json.contains("\"ANNUAL\""));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
        assert_eq!(deserialized.recipient(), "u1");
    }

    #[test]
    fn test_status_changed_serialization() {
        let event = DomainEvent::InvestmentStatusChanged {
            investment_id: "inv1".to_string(),
            user_id: "u2".to_string(),
            old_status: InvestmentStatus::Pending,
            new_status: InvestmentStatus::Active,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"PENDING\""));
        assert!(json.contains("\"ACTIVE\""));
        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.recipient(), "u2");
    }
}
