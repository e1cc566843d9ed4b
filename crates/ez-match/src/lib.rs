//! # ez-match
//!
//! Stateless matching heuristics for Ezriya.
//!
//! Every function here is pure: it reads its arguments, computes, and returns.
//! Nothing is cached and nothing touches storage, so all of it is safe to call
//! from any number of request handlers at once.
//!
//! - [`intent::parse`] turns a buyer's free text into a [`BuyerNeed`](ez_core::entities::BuyerNeed)
//! - [`score::score`] rates one listing against a need (0..=100 plus an explanation)
//! - [`triage::classify`] labels a message SCHEDULING / OFFER / QUESTION
//! - [`suggest::suggest`] returns the hard-coded next-step tasks for a stage
//! - [`matchmake::rank`] orders candidate listings for a saved buyer intent
//! - [`eligibility::check_swipe`] applies the verification gates to a swipe
//! - [`summary::summarize`] renders a listing's facts as short display lines

pub mod eligibility;
pub mod intent;
pub mod matchmake;
pub mod score;
pub mod suggest;
pub mod summary;
pub mod triage;
