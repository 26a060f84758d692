//! Media store adapter. Uploads land under `{root}/{bucket}/` keyed by
//! `{owner}-{unix_millis}` so re-uploads never collide, and the public
//! URL is returned as soon as the write is flushed.

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::APP_CONFIG;

pub const BUCKET_AVATARS: &str = "avatars";
pub const BUCKET_MENTOR_AVATARS: &str = "mentor_avatars";

pub struct MediaStore {
    root: String,
    public_base_url: String,
}

impl MediaStore {
    pub fn new() -> Self {
        Self {
            root: APP_CONFIG.media_root.clone(),
            public_base_url: APP_CONFIG.media_public_url.clone(),
        }
    }

    pub fn media_key(owner_id: Uuid, timestamp_millis: i64) -> String {
        format!("{owner_id}-{timestamp_millis}")
    }

    pub async fn upload(&self, bucket: &str, owner_id: Uuid, bytes: &[u8]) -> Result<String> {
        let key = Self::media_key(owner_id, chrono::Utc::now().timestamp_millis());
        let dir = format!("{}/{}", self.root, bucket);
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create media directory {dir}"))?;

        let path = format!("{dir}/{key}");
        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create media file {path}"))?;
        file.write_all(bytes)
            .await
            .context("Failed to write media file")?;
        file.flush().await.context("Failed to flush media file")?;

        Ok(format!("{}/{}/{}", self.public_base_url, bucket, key))
    }
}

impl Default for MediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_key_is_owner_and_timestamp() {
        let owner: Uuid = "a5e3b7f0-1234-4321-aaaa-bbbbccccdddd".parse().unwrap();
        assert_eq!(
            MediaStore::media_key(owner, 1_700_000_000_000),
            "a5e3b7f0-1234-4321-aaaa-bbbbccccdddd-1700000000000"
        );
    }
}
