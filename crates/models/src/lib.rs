pub mod user;

pub use user::{IncompleteUser, User};
