//! Test helpers shared across Autodidact crates.

pub mod search;
pub mod store;

pub use search::{FailingWebProvider, StubWebProvider, search_result};
pub use store::{FailingStore, MemoryStore};
