//! Ownership authorization.
//!
//! A single pure function, [`decide`], answers "may this principal act on
//! this card?" with a three-valued [`Decision`]. Keeping the rule out of the
//! HTTP layer makes it testable without a server and forces the hide/forbid
//! distinction to be explicit instead of scattered through handlers.
//!
//! The hiding rule: a card that exists but belongs to someone else and a
//! card that does not exist at all must be indistinguishable to the caller.
//! Both come back as [`Decision::Hidden`], which the HTTP layer renders as
//! the same 404 an unknown id gets. [`Decision::Forbidden`] is reserved for
//! principals whose role bars them from the card resource class entirely —
//! it never depends on any particular record.

use serde::{Deserialize, Serialize};

use crate::card::CashCard;

/// Role attached to an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// May create and manage their own cards.
    CardOwner,
    /// Authenticated, but barred from the card resource class.
    NonOwner,
}

/// The authenticated identity making a request.
///
/// Credential verification happens in the server's auth middleware; by the
/// time a `Principal` exists, the name is trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Verified principal name. Card ownership is matched against this.
    pub name: String,
    /// Role granted to the principal.
    pub role: Role,
}

impl Principal {
    /// Convenience constructor for a card-owner principal.
    #[must_use]
    pub fn card_owner(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::CardOwner,
        }
    }
}

/// Outcome of an authorization check for one operation on one card slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The principal owns the card; proceed.
    Allow,
    /// The card is absent or owned by someone else. Respond exactly as if
    /// the id did not exist.
    Hidden,
    /// The principal's role denies the whole resource class.
    Forbidden,
}

/// Decide whether `principal` may operate on the card found (or not found)
/// at some id.
///
/// `card` is the store's answer for the requested id: `None` when the id is
/// unknown. The role gate is evaluated first, so a non-owner role learns
/// nothing about which ids exist.
#[must_use]
pub fn decide(principal: &Principal, card: Option<&CashCard>) -> Decision {
    if principal.role != Role::CardOwner {
        return Decision::Forbidden;
    }

    match card {
        Some(card) if card.owner == principal.name => Decision::Allow,
        _ => Decision::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn card_owned_by(owner: &str) -> CashCard {
        CashCard {
            id: 1,
            amount: Decimal::new(12345, 2),
            owner: owner.to_owned(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        let principal = Principal::card_owner("LeudiX1");
        let card = card_owned_by("LeudiX1");
        assert_eq!(decide(&principal, Some(&card)), Decision::Allow);
    }

    #[test]
    fn other_owners_card_is_hidden() {
        let principal = Principal::card_owner("Sarah");
        let card = card_owned_by("Lucy2");
        assert_eq!(decide(&principal, Some(&card)), Decision::Hidden);
    }

    #[test]
    fn missing_card_is_hidden() {
        let principal = Principal::card_owner("Sarah");
        assert_eq!(decide(&principal, None), Decision::Hidden);
    }

    #[test]
    fn cross_owner_and_missing_are_indistinguishable() {
        let principal = Principal::card_owner("Sarah");
        let someone_elses = card_owned_by("Lucy2");
        assert_eq!(
            decide(&principal, Some(&someone_elses)),
            decide(&principal, None),
        );
    }

    #[test]
    fn non_owner_role_is_forbidden_even_for_missing_cards() {
        let principal = Principal {
            name: "hank-owns-no-cards".to_owned(),
            role: Role::NonOwner,
        };
        assert_eq!(decide(&principal, None), Decision::Forbidden);
    }

    #[test]
    fn non_owner_role_is_forbidden_before_ownership_is_consulted() {
        // Even a card whose owner field happens to match the principal name
        // is refused when the role does not grant card access.
        let principal = Principal {
            name: "hank-owns-no-cards".to_owned(),
            role: Role::NonOwner,
        };
        let card = card_owned_by("hank-owns-no-cards");
        assert_eq!(decide(&principal, Some(&card)), Decision::Forbidden);
    }
}
