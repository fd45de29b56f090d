use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::errors::ServiceError;
use models::User;

/// On-disk representation of the whole store: every user record plus the
/// last allocated UID. The file is rewritten in full on each mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub lastuid: u64,
}

impl Snapshot {
    /// A snapshot with no users and the UID counter at zero, used to seed
    /// the storage file before first startup.
    pub fn empty() -> Self {
        Self { users: Vec::new(), lastuid: 0 }
    }

    /// Read and parse a snapshot file. A missing or malformed file is an
    /// error; there is no empty-store fallback.
    pub async fn read(path: &Path) -> Result<Self, ServiceError> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| ServiceError::Load(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Load(format!("parse {}: {}", path.display(), e)))
    }

    /// Serialize indented and overwrite the file in place. Not atomic: a
    /// crash mid-write can leave a truncated file behind.
    pub async fn write(&self, path: &Path) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;
        fs::write(path, data)
            .await
            .map_err(|e| ServiceError::Persistence(format!("write {}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_round_trips_through_file() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("snapshot_{}.json", uuid::Uuid::new_v4()));
        let snapshot = Snapshot {
            users: vec![User { uid: 1, name: "Alice".into() }],
            lastuid: 4,
        };
        snapshot.write(&tmp).await?;

        let loaded = Snapshot::read(&tmp).await?;
        assert_eq!(loaded.lastuid, 4);
        assert_eq!(loaded.users, snapshot.users);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_file_uses_wire_field_names() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("snapshot_{}.json", uuid::Uuid::new_v4()));
        Snapshot { users: vec![User { uid: 2, name: "Bob".into() }], lastuid: 2 }
            .write(&tmp)
            .await?;

        let raw = tokio::fs::read(&tmp).await?;
        let json: serde_json::Value = serde_json::from_slice(&raw)?;
        assert_eq!(json["lastuid"], 2);
        assert_eq!(json["users"][0]["uid"], 2);
        assert_eq!(json["users"][0]["name"], "Bob");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let tmp = std::env::temp_dir().join(format!("snapshot_{}.json", uuid::Uuid::new_v4()));
        let err = Snapshot::read(&tmp).await.expect_err("missing file must fail");
        assert!(matches!(err, ServiceError::Load(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_a_load_error() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("snapshot_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{ not json").await?;
        let err = Snapshot::read(&tmp).await.expect_err("malformed file must fail");
        assert!(matches!(err, ServiceError::Load(_)));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
