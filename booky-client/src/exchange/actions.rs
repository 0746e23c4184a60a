//! Role-gated exchange actions
//!
//! Decides which buttons an exchange card shows. This is presentation only:
//! the backend still accepts or refuses every request on its own terms.

use shared::models::{Exchange, ExchangeStatus};

/// The current user's side of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeRole {
    /// Holds the requested books and received the offer
    Owner,
    /// Made the offer
    Requester,
}

/// An action the user may trigger on an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeAction {
    Accept,
    Reject,
    CounterOffer,
    Cancel,
    Complete,
}

impl ExchangeAction {
    /// Status requested by this action; `None` for counter-offers, which go
    /// through their own endpoint
    pub fn target_status(&self) -> Option<ExchangeStatus> {
        match self {
            Self::Accept => Some(ExchangeStatus::Accepted),
            Self::Reject => Some(ExchangeStatus::Rejected),
            Self::Cancel => Some(ExchangeStatus::Cancelled),
            Self::Complete => Some(ExchangeStatus::Completed),
            Self::CounterOffer => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Reject => "Reject",
            Self::CounterOffer => "Counter-offer",
            Self::Cancel => "Cancel",
            Self::Complete => "Mark as completed",
        }
    }
}

/// Role of `user_id` in `exchange`, `None` for outsiders
pub fn role_of(exchange: &Exchange, user_id: &str) -> Option<ExchangeRole> {
    if exchange.owner_id == user_id {
        Some(ExchangeRole::Owner)
    } else if exchange.requester_id == user_id {
        Some(ExchangeRole::Requester)
    } else {
        None
    }
}

/// Actions offered to `user_id` for the exchange's current status
pub fn available_actions(exchange: &Exchange, user_id: &str) -> Vec<ExchangeAction> {
    use ExchangeAction::*;

    let Some(role) = role_of(exchange, user_id) else {
        return Vec::new();
    };

    if exchange.status.is_negotiable() {
        return match (role, exchange.status) {
            (ExchangeRole::Owner, _) => vec![Accept, Reject, CounterOffer],
            // the requester may take up the owner's counter-offer
            (ExchangeRole::Requester, ExchangeStatus::Countered) => {
                vec![Accept, CounterOffer, Cancel]
            }
            (ExchangeRole::Requester, _) => vec![Cancel],
        };
    }

    match exchange.status {
        ExchangeStatus::Accepted => vec![Complete],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExchangeAction::*;

    fn exchange(status: ExchangeStatus) -> Exchange {
        Exchange {
            id: "ex-1".into(),
            requester_id: "req".into(),
            owner_id: "own".into(),
            status,
            created_at: None,
            updated_at: None,
            owner_book_ids: vec!["b1".into()],
            requester_book_ids: vec!["b2".into()],
            requester: None,
            owner: None,
        }
    }

    #[test]
    fn test_roles() {
        let ex = exchange(ExchangeStatus::Pending);
        assert_eq!(role_of(&ex, "own"), Some(ExchangeRole::Owner));
        assert_eq!(role_of(&ex, "req"), Some(ExchangeRole::Requester));
        assert_eq!(role_of(&ex, "someone"), None);
    }

    #[test]
    fn test_pending_actions() {
        let ex = exchange(ExchangeStatus::Pending);
        assert_eq!(available_actions(&ex, "own"), vec![Accept, Reject, CounterOffer]);
        assert_eq!(available_actions(&ex, "req"), vec![Cancel]);
        assert!(available_actions(&ex, "someone").is_empty());
    }

    #[test]
    fn test_countered_and_accepted_actions() {
        let ex = exchange(ExchangeStatus::Countered);
        assert_eq!(available_actions(&ex, "req"), vec![Accept, CounterOffer, Cancel]);

        let ex = exchange(ExchangeStatus::Accepted);
        assert_eq!(available_actions(&ex, "own"), vec![Complete]);
        assert_eq!(available_actions(&ex, "req"), vec![Complete]);
    }

    #[test]
    fn test_terminal_statuses_have_no_actions() {
        for status in [
            ExchangeStatus::Rejected,
            ExchangeStatus::Cancelled,
            ExchangeStatus::Completed,
        ] {
            let ex = exchange(status);
            assert!(available_actions(&ex, "own").is_empty());
            assert!(available_actions(&ex, "req").is_empty());
        }
    }

    #[test]
    fn test_offered_actions_are_legal_transitions() {
        for status in ExchangeStatus::ALL {
            let ex = exchange(status);
            for user in ["own", "req"] {
                for action in available_actions(&ex, user) {
                    let target = action.target_status().unwrap_or(ExchangeStatus::Countered);
                    assert!(status.can_transition_to(target), "{status} -> {target}");
                }
            }
        }
    }
}
