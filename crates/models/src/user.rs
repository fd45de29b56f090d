use serde::{Deserialize, Serialize};

/// A stored user record. The UID is assigned by the store and never
/// changes for the lifetime of the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: u64,
    pub name: String,
}

impl User {
    /// Combine a freshly allocated UID with client-supplied fields.
    pub fn from_incomplete(uid: u64, incomplete: IncompleteUser) -> Self {
        Self { uid, name: incomplete.name }
    }
}

/// Client-supplied user payload without an identity, used as the input
/// shape for create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteUser {
    pub name: String,
}
