//! Knowledge-base topic collection.
//!
//! This crate owns the topic model and the in-memory collection manager used
//! by the `server` and `cli` crates. It is synchronous and single-writer:
//! callers that share a [`TopicStore`] across tasks wrap it in their own lock.
//!
//! LAYOUT
//! ======
//! - [`topic`]: `Topic`, `ExampleQuery`, `TopicPatch`.
//! - [`queries`]: example-query row editing (auto-grow, guarded delete).
//! - [`view`]: pure filter + sort + emptiness classification.
//! - [`store`]: the collection manager (CRUD + collapse state).
//! - [`card`]: ephemeral per-card presentation state.
//! - [`seed`]: the stock topics a fresh dashboard starts with.

pub mod card;
pub mod error;
pub mod queries;
pub mod seed;
pub mod store;
pub mod topic;
pub mod view;

pub use card::CardState;
pub use error::{ErrorCode, TopicError};
pub use queries::MAX_EXAMPLE_QUERIES;
pub use store::TopicStore;
pub use topic::{ExampleQuery, QueryId, Topic, TopicId, TopicPatch};
pub use view::{SortKey, ViewState};
