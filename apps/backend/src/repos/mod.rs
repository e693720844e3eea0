//! Persistence functions and the partial-update merge.

pub mod credentials;
pub mod merge;
pub mod orders;
pub mod products;
pub mod store;
pub mod users;

pub use merge::{merge, FieldRule, Mergeable};
pub use store::{merge_and_save, RecordStore, SeaStore};
