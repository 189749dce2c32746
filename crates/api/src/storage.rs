//! On-disk store for entity icons and covers.
//!
//! Files live under `{root}/{folder}/{kind}_{entity_id}{ext}`. At most one
//! file per kind and entity exists; saving removes every earlier extension.

use std::io;
use std::path::{Path, PathBuf};

use simcc_core::uploads::{stored_file_name, stored_file_stem, FileKind};

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

/// A file written by [`ImageStore::save`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredImage {
    pub filename: String,
    /// Location relative to the store root.
    pub path: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn folder(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }

    /// Every stored file of `kind` for `entity_id`, regardless of extension.
    async fn matching(&self, folder: &str, kind: FileKind, entity_id: &str) -> io::Result<Vec<PathBuf>> {
        let dir = self.folder(folder);
        let prefix = format!("{}.", stored_file_stem(kind, entity_id));

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    pub async fn find(
        &self,
        folder: &str,
        kind: FileKind,
        entity_id: &str,
    ) -> io::Result<Option<PathBuf>> {
        Ok(self.matching(folder, kind, entity_id).await?.into_iter().next())
    }

    /// Write `data` as the `kind` image of `entity_id`, replacing any
    /// earlier file. `ext` includes the leading dot.
    pub async fn save(
        &self,
        folder: &str,
        kind: FileKind,
        entity_id: &str,
        ext: &str,
        data: &[u8],
    ) -> io::Result<StoredImage> {
        let dir = self.folder(folder);
        tokio::fs::create_dir_all(&dir).await?;
        self.remove(folder, kind, entity_id).await?;

        let filename = stored_file_name(kind, entity_id, ext);
        tokio::fs::write(dir.join(&filename), data).await?;
        Ok(StoredImage {
            path: format!("{folder}/{filename}"),
            filename,
        })
    }

    /// Delete every stored file of `kind` for `entity_id`. Returns whether
    /// anything was removed.
    pub async fn remove(&self, folder: &str, kind: FileKind, entity_id: &str) -> io::Result<bool> {
        let existing = self.matching(folder, kind, entity_id).await?;
        for path in &existing {
            tokio::fs::remove_file(path).await?;
        }
        Ok(!existing.is_empty())
    }
}

/// `Content-Type` for a stored image, from its extension.
pub fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_replaces_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.save("group", FileKind::Icon, "g1", ".png", b"png").await.unwrap();
        let stored = store.save("group", FileKind::Icon, "g1", ".jpg", b"jpg").await.unwrap();

        assert_eq!(stored.filename, "icon_g1.jpg");
        assert_eq!(stored.path, "group/icon_g1.jpg");
        let found = store.find("group", FileKind::Icon, "g1").await.unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "icon_g1.jpg");
        assert!(!dir.path().join("group/icon_g1.png").exists());
    }

    #[tokio::test]
    async fn kinds_and_entities_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.save("user", FileKind::Icon, "u1", ".png", b"a").await.unwrap();
        store.save("user", FileKind::Cover, "u1", ".png", b"b").await.unwrap();
        store.save("user", FileKind::Icon, "u10", ".png", b"c").await.unwrap();

        assert!(store.remove("user", FileKind::Icon, "u1").await.unwrap());
        assert!(store.find("user", FileKind::Cover, "u1").await.unwrap().is_some());
        assert!(store.find("user", FileKind::Icon, "u10").await.unwrap().is_some());
        assert!(!store.remove("user", FileKind::Icon, "u1").await.unwrap());
    }

    #[tokio::test]
    async fn missing_folder_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("absent"));
        assert!(store.find("department", FileKind::Cover, "7").await.unwrap().is_none());
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("icon_a.PNG")), "image/png");
        assert_eq!(content_type(Path::new("cover_b.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("x.bin")), "application/octet-stream");
    }
}
