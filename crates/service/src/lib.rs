//! Service layer owning the user store and its persistence.
//! - Keeps all mutable state behind a single reader/writer lock.
//! - Persists the whole store to a JSON snapshot on every mutation.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod storage;
pub mod store;

pub use store::UserStore;
