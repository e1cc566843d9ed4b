//! Entity structs for all Ezriya domain objects.
//!
//! Persisted entities (`WorkflowTemplate`, `Task`, `Swipe`, `MutualMatch`,
//! `ListingPost`) map to tables in the libSQL database owned by `ez-db`. The
//! rest are request-scoped values that are computed per call and never stored
//! by this workspace. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod intent;
mod listing;
mod matching;
mod need;
mod swipe;
mod task;
mod template;

pub use intent::{BuyerIntent, CommuteAnchor};
pub use listing::{CandidateListing, Listing, ListingFacts, ListingPost};
pub use matching::{MatchResult, RankedMatch};
pub use need::BuyerNeed;
pub use swipe::{MutualMatch, Swipe, SwipeActor, SwipeDecision};
pub use task::{Task, TaskContext};
pub use template::{TaskTemplate, WorkflowTemplate};
