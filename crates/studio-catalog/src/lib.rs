//! Unified AI model catalog for AINative Studio.
//!
//! Merges the live model and embeddings listings with curated entries into one
//! de-duplicated list, assigns each entry a display category and a unique
//! URL slug, and provides the browse/detail lookups consumers navigate with.

mod aggregator;
mod best_effort;
mod catalog;
mod category;
mod curated;
mod model;
mod normalize;
mod slug;
mod snapshot;

pub use aggregator::*;
pub use best_effort::*;
pub use catalog::*;
pub use category::*;
pub use curated::*;
pub use model::*;
pub use normalize::*;
pub use slug::*;
pub use snapshot::*;
