//! Verification gates on swipes.
//!
//! Passing ("no") is always allowed. Liking ("yes") is gated for two pairs:
//! buyers liking listings, and sellers accepting buyer intents. Every other
//! role and target combination is open.

use ez_core::entities::{SwipeActor, SwipeDecision};
use ez_core::enums::{ActorRole, SwipeDirection, SwipeTarget};

/// Level a buyer needs before liking a listing.
pub const BUYER_LIKE_LEVEL: i64 = 3;

/// Level a seller without a verified listing needs to accept a buyer.
pub const SELLER_ACCEPT_LEVEL: i64 = 2;

#[must_use]
pub fn check_swipe(
    actor: &SwipeActor,
    target: SwipeTarget,
    direction: SwipeDirection,
) -> SwipeDecision {
    if direction == SwipeDirection::No {
        return SwipeDecision::Allowed;
    }

    match (actor.role, target) {
        (ActorRole::Buyer, SwipeTarget::Listing) if actor.verification_level < BUYER_LIKE_LEVEL => {
            SwipeDecision::Denied {
                reason: format!("Buyers need verification level {BUYER_LIKE_LEVEL} to like listings"),
                required_verification: BUYER_LIKE_LEVEL,
            }
        }
        (ActorRole::Seller, SwipeTarget::BuyerIntent)
            if !actor.has_verified_listing && actor.verification_level < SELLER_ACCEPT_LEVEL =>
        {
            SwipeDecision::Denied {
                reason: "Sellers need verified listings or verification level 2+ to accept buyers"
                    .to_string(),
                required_verification: SELLER_ACCEPT_LEVEL,
            }
        }
        _ => SwipeDecision::Allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn actor(role: ActorRole, level: i64, verified_listing: bool) -> SwipeActor {
        SwipeActor {
            role,
            verification_level: level,
            has_verified_listing: verified_listing,
        }
    }

    #[rstest]
    #[case(2, false)]
    #[case(3, true)]
    #[case(5, true)]
    fn buyer_likes_listing(#[case] level: i64, #[case] allowed: bool) {
        let decision = check_swipe(
            &actor(ActorRole::Buyer, level, false),
            SwipeTarget::Listing,
            SwipeDirection::Yes,
        );
        assert_eq!(decision.is_allowed(), allowed);
    }

    #[test]
    fn denied_buyer_reports_requirement() {
        let decision = check_swipe(
            &actor(ActorRole::Buyer, 0, false),
            SwipeTarget::Listing,
            SwipeDirection::Yes,
        );
        assert_eq!(
            decision,
            SwipeDecision::Denied {
                reason: "Buyers need verification level 3 to like listings".into(),
                required_verification: 3,
            }
        );
    }

    #[rstest]
    #[case(0, false, false)]
    #[case(1, false, false)]
    #[case(2, false, true)]
    #[case(0, true, true)]
    fn seller_accepts_buyer(#[case] level: i64, #[case] verified: bool, #[case] allowed: bool) {
        let decision = check_swipe(
            &actor(ActorRole::Seller, level, verified),
            SwipeTarget::BuyerIntent,
            SwipeDirection::Yes,
        );
        assert_eq!(decision.is_allowed(), allowed);
    }

    #[rstest]
    #[case(ActorRole::Buyer, SwipeTarget::Listing)]
    #[case(ActorRole::Seller, SwipeTarget::BuyerIntent)]
    fn passing_is_always_allowed(#[case] role: ActorRole, #[case] target: SwipeTarget) {
        assert!(check_swipe(&actor(role, 0, false), target, SwipeDirection::No).is_allowed());
    }

    #[rstest]
    #[case(ActorRole::Agent, SwipeTarget::Listing)]
    #[case(ActorRole::Vendor, SwipeTarget::BuyerIntent)]
    #[case(ActorRole::Buyer, SwipeTarget::BuyerIntent)]
    #[case(ActorRole::Seller, SwipeTarget::Listing)]
    fn ungated_pairs(#[case] role: ActorRole, #[case] target: SwipeTarget) {
        assert!(check_swipe(&actor(role, 0, false), target, SwipeDirection::Yes).is_allowed());
    }
}
