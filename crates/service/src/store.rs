use std::{collections::HashMap, path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, error};

use models::{IncompleteUser, User};

use crate::errors::ServiceError;
use crate::storage::snapshot::Snapshot;

/// In-memory user store persisted to a single JSON snapshot file.
///
/// All state sits behind one reader/writer lock: reads take the shared
/// lock, mutations hold the exclusive lock across both the in-memory
/// update and the snapshot write, so the file on disk always matches a
/// state some writer observed. When the write itself fails the in-memory
/// mutation is kept and the error surfaced to the caller, so memory can
/// run ahead of the file until the next successful write.
pub struct UserStore {
    inner: RwLock<StoreInner>,
    file_path: PathBuf,
}

struct StoreInner {
    last_uid: u64,
    by_id: HashMap<u64, User>,
    users: Vec<User>,
}

impl StoreInner {
    /// Recompute the list view from the index. Order follows map
    /// iteration and is not stable across mutations.
    fn rebuild_list(&mut self) {
        self.users = self.by_id.values().cloned().collect();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { users: self.users.clone(), lastuid: self.last_uid }
    }
}

impl UserStore {
    /// Load the store from its snapshot file and rebuild the index from
    /// the persisted list. Fails if the file is missing or malformed; an
    /// initial file must be seeded explicitly (see [`Snapshot::empty`]).
    pub async fn load<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let snapshot = Snapshot::read(&file_path).await?;
        let by_id: HashMap<u64, User> =
            snapshot.users.iter().map(|u| (u.uid, u.clone())).collect();
        let mut inner = StoreInner { last_uid: snapshot.lastuid, by_id, users: Vec::new() };
        inner.rebuild_list();
        Ok(Arc::new(Self { inner: RwLock::new(inner), file_path }))
    }

    /// Fetch a user by UID.
    pub async fn get(&self, uid: u64) -> Option<User> {
        let inner = self.inner.read().await;
        inner.by_id.get(&uid).cloned()
    }

    /// All users in the current list view. Order is unspecified.
    pub async fn list(&self) -> Vec<User> {
        let inner = self.inner.read().await;
        inner.users.clone()
    }

    /// Create a user under a freshly allocated UID and persist. UIDs are
    /// never reused, even after deletes.
    pub async fn insert(&self, incomplete: IncompleteUser) -> Result<User, ServiceError> {
        let mut inner = self.inner.write().await;
        inner.last_uid += 1;
        let uid = inner.last_uid;
        let user = User::from_incomplete(uid, incomplete);
        inner.by_id.insert(uid, user.clone());
        inner.rebuild_list();
        self.save(&inner).await?;
        debug!(uid, "user inserted");
        Ok(user)
    }

    /// Replace the non-UID fields of an existing user and persist.
    /// Returns `Ok(None)` for an unknown UID without mutating anything or
    /// touching the file.
    pub async fn update(
        &self,
        uid: u64,
        incomplete: IncompleteUser,
    ) -> Result<Option<User>, ServiceError> {
        let mut inner = self.inner.write().await;
        if !inner.by_id.contains_key(&uid) {
            return Ok(None);
        }
        let user = User::from_incomplete(uid, incomplete);
        inner.by_id.insert(uid, user.clone());
        inner.rebuild_list();
        self.save(&inner).await?;
        debug!(uid, "user updated");
        Ok(Some(user))
    }

    /// Remove a user and persist. Deleting an unknown UID is a silent
    /// no-op that still rewrites the snapshot.
    pub async fn delete(&self, uid: u64) -> Result<(), ServiceError> {
        let mut inner = self.inner.write().await;
        inner.by_id.remove(&uid);
        inner.rebuild_list();
        self.save(&inner).await?;
        debug!(uid, "user deleted");
        Ok(())
    }

    // Runs while the caller still holds the write lock, so every snapshot
    // on disk corresponds to a state a writer actually saw.
    async fn save(&self, inner: &StoreInner) -> Result<(), ServiceError> {
        if let Err(e) = inner.snapshot().write(&self.file_path).await {
            error!(error = %e, path = %self.file_path.display(), "persisting user snapshot failed");
            return Err(e);
        }
        Ok(())
    }
}
